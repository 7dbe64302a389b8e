//! Rebasing liquid-staking ledger.
//!
//! Depositors receive *shares* of a common pool. A holder's visible balance is
//! never stored; it is derived on demand:
//!
//! `balance(h) = shares(h) × total_pooled_value / total_shares`
//!
//! so value credited to the pool (staking rewards) is distributed to every
//! holder at once without touching per-holder state.
//!
//! This crate handles:
//! - Share ↔ pooled-value conversion against one consistent snapshot
//! - Share minting and burning with the sum invariant
//! - The pause flag gating stake and unstake
//! - The stake/unstake controller and the one-time initial-holder bootstrap

pub mod conversion;
pub mod error;
pub mod events;
pub mod ledger;
pub mod pause;
pub mod pool;
pub mod recipient;

pub use conversion::PoolTotals;
pub use error::StakingError;
pub use events::{EventLog, StakingEvent};
pub use ledger::{BurnReceipt, ShareLedger};
pub use pause::{PauseState, StakingMode};
pub use pool::{StakingPool, UnstakeAmount};
pub use recipient::{PayoutRejected, ValueRecipient};

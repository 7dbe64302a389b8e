//! Nullable infrastructure for deterministic testing.
//!
//! Everything the ledger treats as an outside collaborator (the clock, the
//! allowance store, payout recipients) gets an in-memory implementation
//! here that:
//! - Returns deterministic values
//! - Can be controlled programmatically
//! - Records what happened to it for later assertions
//!
//! Usage: swap real implementations for nullables in tests.

pub mod allowance;
pub mod clock;
pub mod recipient;

pub use allowance::NullAllowanceLedger;
pub use clock::NullClock;
pub use recipient::{ReentrantRecipient, RecordingRecipient, ReentryObservation, RejectingRecipient};

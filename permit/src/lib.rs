//! Delegated approvals ("permits").
//!
//! An owner signs, offline, a message granting `spender` an allowance of
//! `value`. Anyone can submit the signed message; the authority checks the
//! deadline, rebuilds the digest with the owner's *current* nonce, asks the
//! [`Verifier`] who signed it, and on success sets the allowance and bumps
//! the nonce. A replayed signature embeds a stale nonce and no longer
//! verifies.

pub mod authority;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod message;
pub mod nonces;
pub mod verifier;

pub use authority::PermitAuthority;
pub use domain::Domain;
pub use error::PermitError;
pub use ledger::AllowanceLedger;
pub use message::PermitMessage;
pub use nonces::NonceTable;
pub use verifier::{Ed25519Verifier, PermitSignature, Verifier};

//! Permit-specific errors.

use bido_types::Timestamp;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PermitError {
    #[error("permit deadline {deadline} has passed (now {now})")]
    DeadlineExpired { deadline: Timestamp, now: Timestamp },

    #[error("invalid permit signature")]
    InvalidSignature,

    #[error("owner and spender must be non-null addresses")]
    ZeroAddressTarget,

    #[error("nonce space exhausted")]
    NonceOverflow,

    #[error("allowance ledger rejected approval: {0}")]
    Ledger(String),
}

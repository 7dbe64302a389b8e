//! Errors raised while parsing shared primitives.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BidoError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

//! Payout hooks for addresses that receive unstaked value.

use bido_types::Address;
use thiserror::Error;

use crate::pool::StakingPool;

/// A recipient refused a payout.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct PayoutRejected {
    pub reason: String,
}

impl PayoutRejected {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Code attached to an address that runs when the pool pays it.
///
/// The hook receives the pool itself and may call back into it. By the time
/// it runs, the payer's shares are already burned and the pool already
/// debited.
pub trait ValueRecipient {
    fn on_value_received(
        &self,
        pool: &StakingPool,
        recipient: Address,
        amount: u128,
    ) -> Result<(), PayoutRejected>;
}

//! Nullable payout recipients.

use std::cell::{Cell, RefCell};

use bido_staking::{PayoutRejected, StakingError, StakingPool, UnstakeAmount, ValueRecipient};
use bido_types::Address;

/// Accepts every payout and keeps a running total.
#[derive(Default)]
pub struct RecordingRecipient {
    received: Cell<u128>,
    payouts: Cell<usize>,
}

impl RecordingRecipient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn received(&self) -> u128 {
        self.received.get()
    }

    pub fn payouts(&self) -> usize {
        self.payouts.get()
    }
}

impl ValueRecipient for RecordingRecipient {
    fn on_value_received(
        &self,
        _pool: &StakingPool,
        _recipient: Address,
        amount: u128,
    ) -> Result<(), PayoutRejected> {
        self.received.set(self.received.get() + amount);
        self.payouts.set(self.payouts.get() + 1);
        Ok(())
    }
}

/// Refuses every payout.
pub struct RejectingRecipient {
    reason: String,
}

impl RejectingRecipient {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl ValueRecipient for RejectingRecipient {
    fn on_value_received(
        &self,
        _pool: &StakingPool,
        _recipient: Address,
        _amount: u128,
    ) -> Result<(), PayoutRejected> {
        Err(PayoutRejected::new(self.reason.clone()))
    }
}

/// What the re-entrant recipient observed during its first payout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReentryObservation {
    pub amount: u128,
    pub shares_seen: u128,
    pub total_shares_seen: u128,
    pub pooled_value_seen: u128,
    pub nested_result: Result<u128, StakingError>,
}

/// On its first payout, calls back into the pool with a second unstake of
/// `nested` and records what it saw. Later payouts are accepted silently.
pub struct ReentrantRecipient {
    nested: UnstakeAmount,
    entered: Cell<bool>,
    observation: RefCell<Option<ReentryObservation>>,
    received: Cell<u128>,
}

impl ReentrantRecipient {
    pub fn new(nested: UnstakeAmount) -> Self {
        Self {
            nested,
            entered: Cell::new(false),
            observation: RefCell::new(None),
            received: Cell::new(0),
        }
    }

    pub fn observation(&self) -> Option<ReentryObservation> {
        self.observation.borrow().clone()
    }

    pub fn received(&self) -> u128 {
        self.received.get()
    }
}

impl ValueRecipient for ReentrantRecipient {
    fn on_value_received(
        &self,
        pool: &StakingPool,
        recipient: Address,
        amount: u128,
    ) -> Result<(), PayoutRejected> {
        self.received.set(self.received.get() + amount);
        if self.entered.replace(true) {
            return Ok(());
        }
        let shares_seen = pool.shares_of(&recipient);
        let total_shares_seen = pool.total_shares();
        let pooled_value_seen = pool.total_pooled_value();
        let nested_result = pool.unstake(recipient, self.nested);
        *self.observation.borrow_mut() = Some(ReentryObservation {
            amount,
            shares_seen,
            total_shares_seen,
            pooled_value_seen,
            nested_result,
        });
        Ok(())
    }
}

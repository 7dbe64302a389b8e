//! Events emitted by the staking pool, in emission order.

use std::cell::RefCell;
use std::rc::Rc;

use bido_types::Address;
use serde::{Deserialize, Serialize};

/// Pool-level events. Observers rely on their relative order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StakingEvent {
    StakingPaused,
    StakingResumed,
    /// A deposit was accounted for.
    Staked {
        sender: Address,
        amount: u128,
        referral: Address,
    },
    /// Shares were burned and their value paid out.
    Unstaked { sender: Address, amount: u128 },
    /// Balance-transfer notification in pooled-value units.
    Transfer {
        from: Address,
        to: Address,
        value: u128,
    },
    /// The same movement expressed in shares.
    TransferShares {
        from: Address,
        to: Address,
        shares: u128,
    },
    /// Value arrived without minting shares.
    RewardsAccrued { amount: u128 },
}

type Listener = Rc<dyn Fn(&StakingEvent)>;

/// Ordered event record with synchronous fan-out.
///
/// Listeners run inline on the emitting call, after the event is recorded.
/// No borrow is held while listeners run, so a listener may call back
/// into the pool and trigger further events.
#[derive(Default)]
pub struct EventLog {
    recorded: RefCell<Vec<StakingEvent>>,
    listeners: RefCell<Vec<Listener>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl Fn(&StakingEvent) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    pub fn emit(&self, event: StakingEvent) {
        self.recorded.borrow_mut().push(event.clone());
        let listeners: Vec<Listener> = self.listeners.borrow().clone();
        for listener in listeners {
            listener(&event);
        }
    }

    /// Snapshot of every event recorded so far.
    pub fn recorded(&self) -> Vec<StakingEvent> {
        self.recorded.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.recorded.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.recorded.borrow().is_empty()
    }
}

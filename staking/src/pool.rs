//! Stake/unstake controller.
//!
//! [`StakingPool`] is the single owner of the share ledger, the pooled value
//! and the pause flag. All operations take `&self` and run to completion
//! one at a time; state lives behind a `RefCell` that is never held across a
//! call into outside code.
//!
//! Ordering contract for payouts: every ledger write of an unstake (share
//! burn, pool debit) is applied *before* the recipient hook runs. A hook
//! that calls back into the pool sees the already-reduced balances.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use bido_types::Address;
use tracing::{debug, info, warn};

use crate::conversion::PoolTotals;
use crate::error::StakingError;
use crate::events::{EventLog, StakingEvent};
use crate::ledger::{BurnReceipt, ShareLedger};
use crate::pause::PauseState;
use crate::recipient::ValueRecipient;

/// How much to unstake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnstakeAmount {
    /// A pooled-value amount, converted to shares at the current rate.
    Value(u128),
    /// Burn the caller's entire share balance.
    All,
}

impl UnstakeAmount {
    /// Maps the raw "all" sentinel (`u128::MAX`) to [`UnstakeAmount::All`].
    pub fn from_raw(raw: u128) -> Self {
        if raw == u128::MAX {
            Self::All
        } else {
            Self::Value(raw)
        }
    }
}

#[derive(Default)]
struct PoolState {
    ledger: ShareLedger,
    /// Value currently held by the pool.
    pooled_value: u128,
    pause: PauseState,
    initialized: bool,
}

impl PoolState {
    fn totals(&self) -> PoolTotals {
        PoolTotals::new(self.ledger.total_shares(), self.pooled_value)
    }
}

pub struct StakingPool {
    initial_holder: Address,
    state: RefCell<PoolState>,
    events: EventLog,
    recipients: RefCell<HashMap<Address, Rc<dyn ValueRecipient>>>,
}

impl StakingPool {
    /// Create an empty, uninitialized pool whose share floor will be held by
    /// `initial_holder`.
    pub fn new(initial_holder: Address) -> Self {
        Self {
            initial_holder,
            state: RefCell::new(PoolState::default()),
            events: EventLog::new(),
            recipients: RefCell::new(HashMap::new()),
        }
    }

    pub fn initial_holder(&self) -> Address {
        self.initial_holder
    }

    // ── Bootstrap ──────────────────────────────────────────────────────

    /// One-time bootstrap.
    ///
    /// Credits `endowment` to the pool, then mints shares equal to the full
    /// pool value to the initial holder. Returns the shares minted.
    pub fn initialize(&self, endowment: u128) -> Result<u128, StakingError> {
        let minted = {
            let mut state = self.state.borrow_mut();
            if state.initialized {
                return Err(StakingError::AlreadyInitialized);
            }
            let pool_value = state
                .pooled_value
                .checked_add(endowment)
                .ok_or(StakingError::Overflow)?;
            if pool_value == 0 {
                return Err(StakingError::ZeroPoolBalance);
            }
            let minted = if state.ledger.total_shares() == 0 {
                state.ledger.mint_shares(self.initial_holder, pool_value)?;
                pool_value
            } else {
                0
            };
            state.pooled_value = pool_value;
            state.initialized = true;
            minted
        };

        if minted > 0 {
            // Staked precedes the transfer notifications.
            self.events.emit(StakingEvent::Staked {
                sender: self.initial_holder,
                amount: minted,
                referral: Address::ZERO,
            });
            self.emit_mint_notifications(self.initial_holder, minted, minted);
        }
        info!(
            initial_holder = %self.initial_holder,
            shares = minted,
            "staking pool initialized"
        );
        Ok(minted)
    }

    // ── Pause ──────────────────────────────────────────────────────────

    pub fn pause_staking(&self) {
        let previous = self.state.borrow_mut().pause.pause();
        self.events.emit(StakingEvent::StakingPaused);
        info!(?previous, "staking paused");
    }

    pub fn resume_staking(&self) {
        let previous = self.state.borrow_mut().pause.resume();
        self.events.emit(StakingEvent::StakingResumed);
        info!(?previous, "staking resumed");
    }

    pub fn is_staking_paused(&self) -> bool {
        self.state.borrow().pause.is_paused()
    }

    // ── Stake ──────────────────────────────────────────────────────────

    /// Deposit `deposit` value from `sender` and mint the matching shares.
    ///
    /// The deposit is credited to the pool and accounted for in one step:
    /// shares are priced against the pool value *before* the deposit.
    pub fn stake(
        &self,
        sender: Address,
        deposit: u128,
        referral: Address,
    ) -> Result<u128, StakingError> {
        let (shares, notified_value) = {
            let mut state = self.state.borrow_mut();
            if state.ledger.shares_of(&self.initial_holder) == 0 {
                return Err(StakingError::NotInitialized);
            }
            if deposit == 0 {
                return Err(StakingError::ZeroDeposit);
            }
            if state.pause.is_paused() {
                return Err(StakingError::StakingPaused);
            }

            let pool_value = state
                .pooled_value
                .checked_add(deposit)
                .ok_or(StakingError::Overflow)?;
            if pool_value <= deposit {
                return Err(StakingError::InvalidValue {
                    deposit,
                    pool_value,
                });
            }
            let pre_deposit = pool_value - deposit;
            let shares = PoolTotals::new(state.ledger.total_shares(), pre_deposit)
                .shares_for(deposit)?;

            let post_shares = state
                .ledger
                .total_shares()
                .checked_add(shares)
                .ok_or(StakingError::Overflow)?;
            let notified_value = if shares == 0 {
                0
            } else {
                PoolTotals::new(post_shares, pool_value).pooled_value_for(shares)?
            };

            state.ledger.mint_shares(sender, shares)?;
            state.pooled_value = pool_value;
            (shares, notified_value)
        };

        self.events.emit(StakingEvent::Staked {
            sender,
            amount: deposit,
            referral,
        });
        self.emit_mint_notifications(sender, notified_value, shares);
        info!(%sender, deposit, shares, %referral, "staked");
        Ok(shares)
    }

    /// Plain value transfer into the pool. Stakes with a null referral.
    pub fn receive_value(
        &self,
        sender: Address,
        amount: u128,
        data: &[u8],
    ) -> Result<u128, StakingError> {
        if !data.is_empty() {
            return Err(StakingError::NonEmptyData);
        }
        self.stake(sender, amount, Address::ZERO)
    }

    /// Credit value to the pool without minting shares. Every holder's
    /// balance grows in proportion to their shares.
    pub fn accrue_rewards(&self, amount: u128) -> Result<(), StakingError> {
        if amount == 0 {
            return Err(StakingError::ZeroAmount);
        }
        {
            let mut state = self.state.borrow_mut();
            state.pooled_value = state
                .pooled_value
                .checked_add(amount)
                .ok_or(StakingError::Overflow)?;
        }
        self.events.emit(StakingEvent::RewardsAccrued { amount });
        debug!(amount, "rewards accrued");
        Ok(())
    }

    // ── Unstake ────────────────────────────────────────────────────────

    /// Burn shares for `caller` and pay out their value. Returns the value
    /// released.
    pub fn unstake(&self, caller: Address, amount: UnstakeAmount) -> Result<u128, StakingError> {
        let receipt = {
            let mut state = self.state.borrow_mut();
            if state.pause.is_paused() {
                return Err(StakingError::StakingPaused);
            }
            let shares = match amount {
                UnstakeAmount::Value(0) => return Err(StakingError::UnstakeZero),
                UnstakeAmount::Value(value) => state.totals().shares_for(value)?,
                UnstakeAmount::All => state.ledger.shares_of(&caller),
            };
            if caller == self.initial_holder {
                return Err(StakingError::InitialHolderLocked);
            }
            if shares == 0 {
                return Err(StakingError::BurnZero);
            }

            let pool_value = state.pooled_value;
            let receipt = state.ledger.burn_shares(caller, shares, pool_value)?;
            if pool_value < receipt.pre_burn_value {
                state.ledger.mint_shares(caller, receipt.shares_burned)?;
                return Err(StakingError::InsufficientPoolBalance {
                    needed: receipt.pre_burn_value,
                    available: pool_value,
                });
            }
            state.pooled_value = pool_value - receipt.pre_burn_value;
            receipt
        };

        // Interaction last: no borrow is held past this point.
        if let Err(err) = self.pay_out(caller, receipt.pre_burn_value) {
            self.revert_unstake(caller, &receipt)?;
            return Err(err);
        }

        self.events.emit(StakingEvent::Unstaked {
            sender: caller,
            amount: receipt.pre_burn_value,
        });
        info!(
            %caller,
            shares = receipt.shares_burned,
            value = receipt.pre_burn_value,
            "unstaked"
        );
        Ok(receipt.pre_burn_value)
    }

    fn pay_out(&self, to: Address, amount: u128) -> Result<(), StakingError> {
        let hook = self.recipients.borrow().get(&to).cloned();
        let Some(hook) = hook else {
            return Ok(());
        };
        hook.on_value_received(self, to, amount).map_err(|rejected| {
            warn!(recipient = %to, amount, reason = %rejected, "payout rejected");
            StakingError::TransferRejected {
                recipient: to,
                reason: rejected.reason,
            }
        })
    }

    /// Undo this unstake's own writes after a failed payout.
    fn revert_unstake(&self, caller: Address, receipt: &BurnReceipt) -> Result<(), StakingError> {
        let mut state = self.state.borrow_mut();
        state.ledger.mint_shares(caller, receipt.shares_burned)?;
        state.pooled_value = state
            .pooled_value
            .checked_add(receipt.pre_burn_value)
            .ok_or(StakingError::Overflow)?;
        debug!(%caller, shares = receipt.shares_burned, "unstake reverted");
        Ok(())
    }

    fn emit_mint_notifications(&self, to: Address, value: u128, shares: u128) {
        self.events.emit(StakingEvent::Transfer {
            from: Address::ZERO,
            to,
            value,
        });
        self.events.emit(StakingEvent::TransferShares {
            from: Address::ZERO,
            to,
            shares,
        });
    }

    // ── Recipients and observers ───────────────────────────────────────

    /// Attach a payout hook to `address`. Addresses without a hook always
    /// accept payouts.
    pub fn register_recipient(&self, address: Address, recipient: Rc<dyn ValueRecipient>) {
        self.recipients.borrow_mut().insert(address, recipient);
    }

    pub fn unregister_recipient(&self, address: &Address) {
        self.recipients.borrow_mut().remove(address);
    }

    pub fn subscribe(&self, listener: impl Fn(&StakingEvent) + 'static) {
        self.events.subscribe(listener);
    }

    pub fn events(&self) -> Vec<StakingEvent> {
        self.events.recorded()
    }

    // ── Reads ──────────────────────────────────────────────────────────

    pub fn is_initialized(&self) -> bool {
        self.state.borrow().initialized
    }

    pub fn shares_of(&self, holder: &Address) -> u128 {
        self.state.borrow().ledger.shares_of(holder)
    }

    pub fn total_shares(&self) -> u128 {
        self.state.borrow().ledger.total_shares()
    }

    pub fn total_pooled_value(&self) -> u128 {
        self.state.borrow().pooled_value
    }

    /// One consistent snapshot of both totals.
    pub fn totals(&self) -> PoolTotals {
        self.state.borrow().totals()
    }

    pub fn pooled_value_by_shares(&self, shares: u128) -> Result<u128, StakingError> {
        self.totals().pooled_value_for(shares)
    }

    pub fn shares_by_pooled_value(&self, value: u128) -> Result<u128, StakingError> {
        self.totals().shares_for(value)
    }

    /// Rebased balance of `holder`. Reads 0 before bootstrap.
    pub fn balance_of(&self, holder: &Address) -> u128 {
        let state = self.state.borrow();
        let shares = state.ledger.shares_of(holder);
        state.totals().pooled_value_for(shares).unwrap_or(0)
    }

    pub fn total_supply(&self) -> u128 {
        self.total_pooled_value()
    }

    /// Whether holder balances sum to the share total.
    pub fn ledger_is_consistent(&self) -> bool {
        self.state.borrow().ledger.is_consistent()
    }
}

impl Default for StakingPool {
    fn default() -> Self {
        Self::new(Address::DEAD)
    }
}

//! Share ledger: total shares and per-holder share balances.
//!
//! Holders are stored sparsely; a holder whose balance drops to zero is
//! removed, so `shares_of` on an unknown holder reads as 0.
//!
//! Invariant: the sum of all holder balances equals `total_shares`. Every
//! mutation validates first and writes both sides together.

use std::collections::HashMap;

use bido_types::Address;
use serde::{Deserialize, Serialize};

use crate::conversion::PoolTotals;
use crate::error::StakingError;

/// Outcome of a burn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BurnReceipt {
    pub shares_burned: u128,
    /// The holder's share balance after the burn.
    pub remaining_shares: u128,
    /// Value of the burned shares at the rate before the burn.
    pub pre_burn_value: u128,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ShareLedger {
    total_shares: u128,
    shares: HashMap<Address, u128>,
}

impl ShareLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_shares(&self) -> u128 {
        self.total_shares
    }

    pub fn shares_of(&self, holder: &Address) -> u128 {
        self.shares.get(holder).copied().unwrap_or(0)
    }

    /// Number of holders with a non-zero balance.
    pub fn holder_count(&self) -> usize {
        self.shares.len()
    }

    /// Credit `amount` shares to `holder`. Returns the new holder balance.
    pub fn mint_shares(&mut self, holder: Address, amount: u128) -> Result<u128, StakingError> {
        if holder.is_zero() {
            return Err(StakingError::ZeroAddressTarget);
        }
        let new_total = self
            .total_shares
            .checked_add(amount)
            .ok_or(StakingError::Overflow)?;
        let new_balance = self
            .shares_of(&holder)
            .checked_add(amount)
            .ok_or(StakingError::Overflow)?;

        self.total_shares = new_total;
        if new_balance > 0 {
            self.shares.insert(holder, new_balance);
        }
        Ok(new_balance)
    }

    /// Debit `amount` shares from `holder`.
    ///
    /// The returned `pre_burn_value` is priced against `total_pooled_value`
    /// and the share total *before* the decrement.
    pub fn burn_shares(
        &mut self,
        holder: Address,
        amount: u128,
        total_pooled_value: u128,
    ) -> Result<BurnReceipt, StakingError> {
        if holder.is_zero() {
            return Err(StakingError::ZeroAddressTarget);
        }
        let available = self.shares_of(&holder);
        if available < amount {
            return Err(StakingError::InsufficientShares {
                needed: amount,
                available,
            });
        }
        let pre_burn_value =
            PoolTotals::new(self.total_shares, total_pooled_value).pooled_value_for(amount)?;

        let remaining = available - amount;
        // Holder balance is part of the total, so this cannot underflow.
        self.total_shares -= amount;
        if remaining == 0 {
            self.shares.remove(&holder);
        } else {
            self.shares.insert(holder, remaining);
        }

        Ok(BurnReceipt {
            shares_burned: amount,
            remaining_shares: remaining,
            pre_burn_value,
        })
    }

    /// Whether the holder balances sum to `total_shares`.
    pub fn is_consistent(&self) -> bool {
        let mut sum = 0u128;
        for amount in self.shares.values() {
            match sum.checked_add(*amount) {
                Some(s) => sum = s,
                None => return false,
            }
        }
        sum == self.total_shares
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u8) -> Address {
        let mut bytes = [0u8; 20];
        bytes[0] = n;
        Address::new(bytes)
    }

    #[test]
    fn empty_ledger_reads_zero() {
        let ledger = ShareLedger::new();
        assert_eq!(ledger.total_shares(), 0);
        assert_eq!(ledger.shares_of(&addr(1)), 0);
        assert!(ledger.is_consistent());
    }

    #[test]
    fn mint_credits_holder_and_total() {
        let mut ledger = ShareLedger::new();
        assert_eq!(ledger.mint_shares(addr(1), 100).unwrap(), 100);
        assert_eq!(ledger.mint_shares(addr(1), 50).unwrap(), 150);
        assert_eq!(ledger.mint_shares(addr(2), 25).unwrap(), 25);
        assert_eq!(ledger.total_shares(), 175);
        assert!(ledger.is_consistent());
    }

    #[test]
    fn mint_to_zero_address_fails() {
        let mut ledger = ShareLedger::new();
        assert_eq!(
            ledger.mint_shares(Address::ZERO, 1),
            Err(StakingError::ZeroAddressTarget)
        );
        assert_eq!(ledger.total_shares(), 0);
    }

    #[test]
    fn mint_overflow_leaves_state_untouched() {
        let mut ledger = ShareLedger::new();
        ledger.mint_shares(addr(1), u128::MAX).unwrap();
        assert_eq!(ledger.mint_shares(addr(2), 1), Err(StakingError::Overflow));
        assert_eq!(ledger.shares_of(&addr(2)), 0);
        assert_eq!(ledger.total_shares(), u128::MAX);
    }

    #[test]
    fn mint_zero_does_not_create_holder() {
        let mut ledger = ShareLedger::new();
        ledger.mint_shares(addr(1), 0).unwrap();
        assert_eq!(ledger.holder_count(), 0);
    }

    #[test]
    fn burn_prices_at_pre_burn_rate() {
        let mut ledger = ShareLedger::new();
        ledger.mint_shares(addr(1), 1000).unwrap();
        ledger.mint_shares(addr(2), 500).unwrap();

        // Pool holds 3000 value for 1500 shares: 2 value per share.
        let receipt = ledger.burn_shares(addr(2), 200, 3000).unwrap();
        assert_eq!(receipt.shares_burned, 200);
        assert_eq!(receipt.remaining_shares, 300);
        assert_eq!(receipt.pre_burn_value, 400);
        assert_eq!(ledger.total_shares(), 1300);
        assert!(ledger.is_consistent());
    }

    #[test]
    fn burn_more_than_held_fails() {
        let mut ledger = ShareLedger::new();
        ledger.mint_shares(addr(1), 10).unwrap();
        assert_eq!(
            ledger.burn_shares(addr(1), 11, 10),
            Err(StakingError::InsufficientShares {
                needed: 11,
                available: 10
            })
        );
        assert_eq!(ledger.shares_of(&addr(1)), 10);
    }

    #[test]
    fn burn_everything_removes_holder() {
        let mut ledger = ShareLedger::new();
        ledger.mint_shares(addr(1), 10).unwrap();
        ledger.mint_shares(addr(2), 10).unwrap();
        ledger.burn_shares(addr(1), 10, 20).unwrap();
        assert_eq!(ledger.holder_count(), 1);
        assert_eq!(ledger.shares_of(&addr(1)), 0);
    }

    #[test]
    fn burn_with_empty_pool_value_fails_without_mutation() {
        let mut ledger = ShareLedger::new();
        ledger.mint_shares(addr(1), 10).unwrap();
        assert_eq!(
            ledger.burn_shares(addr(1), 5, 0),
            Err(StakingError::DivisionByZero)
        );
        assert_eq!(ledger.shares_of(&addr(1)), 10);
        assert_eq!(ledger.total_shares(), 10);
    }
}

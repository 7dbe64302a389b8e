//! Nullable allowance ledger: in-memory approvals.

use std::collections::HashMap;

use bido_permit::{AllowanceLedger, PermitError};
use bido_types::Address;

/// In-memory allowance store. Records every approval in order and can be
/// told to reject.
#[derive(Default)]
pub struct NullAllowanceLedger {
    allowances: HashMap<(Address, Address), u128>,
    approvals: Vec<(Address, Address, u128)>,
    reject_with: Option<String>,
}

impl NullAllowanceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `approve` fail with `reason`.
    pub fn reject_approvals(&mut self, reason: impl Into<String>) {
        self.reject_with = Some(reason.into());
    }

    pub fn accept_approvals(&mut self) {
        self.reject_with = None;
    }

    /// Every successful approval, oldest first.
    pub fn approvals(&self) -> &[(Address, Address, u128)] {
        &self.approvals
    }
}

impl AllowanceLedger for NullAllowanceLedger {
    fn approve(&mut self, owner: Address, spender: Address, value: u128) -> Result<(), PermitError> {
        if let Some(reason) = &self.reject_with {
            return Err(PermitError::Ledger(reason.clone()));
        }
        self.allowances.insert((owner, spender), value);
        self.approvals.push((owner, spender, value));
        Ok(())
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> u128 {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approve_overwrites_and_records() {
        let mut ledger = NullAllowanceLedger::new();
        let a = Address::new([1u8; 20]);
        let b = Address::new([2u8; 20]);
        ledger.approve(a, b, 10).unwrap();
        ledger.approve(a, b, 3).unwrap();
        assert_eq!(ledger.allowance(&a, &b), 3);
        assert_eq!(ledger.approvals().len(), 2);
    }

    #[test]
    fn rejection_leaves_allowance_untouched() {
        let mut ledger = NullAllowanceLedger::new();
        let a = Address::new([1u8; 20]);
        let b = Address::new([2u8; 20]);
        ledger.reject_approvals("frozen");
        assert!(ledger.approve(a, b, 10).is_err());
        assert_eq!(ledger.allowance(&a, &b), 0);
        ledger.accept_approvals();
        assert!(ledger.approve(a, b, 10).is_ok());
    }
}

//! The allowance store the authority writes to.

use bido_types::Address;

use crate::error::PermitError;

/// Token bookkeeping that owns allowances. The authority only needs to set
/// one; balance and transfer mechanics live elsewhere.
pub trait AllowanceLedger {
    fn approve(&mut self, owner: Address, spender: Address, value: u128)
        -> Result<(), PermitError>;

    fn allowance(&self, owner: &Address, spender: &Address) -> u128;
}

//! Per-owner replay nonces.

use std::collections::HashMap;

use bido_types::Address;

use crate::error::PermitError;

/// Monotonic counters, lazily zero. Only ever advanced by one.
#[derive(Clone, Debug, Default)]
pub struct NonceTable {
    nonces: HashMap<Address, u64>,
}

impl NonceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self, owner: &Address) -> u64 {
        self.nonces.get(owner).copied().unwrap_or(0)
    }

    /// The value `consume` would store, without storing it.
    pub fn peek_next(&self, owner: &Address) -> Result<u64, PermitError> {
        self.current(owner)
            .checked_add(1)
            .ok_or(PermitError::NonceOverflow)
    }

    /// Advance `owner`'s nonce. Returns the nonce that was consumed.
    pub fn consume(&mut self, owner: Address) -> Result<u64, PermitError> {
        let used = self.current(&owner);
        let next = self.peek_next(&owner)?;
        self.nonces.insert(owner, next);
        Ok(used)
    }
}

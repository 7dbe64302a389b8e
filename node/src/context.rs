//! Top-level ledger context.

use std::rc::Rc;

use bido_permit::{AllowanceLedger, Ed25519Verifier, PermitAuthority, PermitSignature};
use bido_staking::StakingPool;
use bido_types::{Address, MessageDigest, Timestamp};
use tracing::info;

use crate::config::BidoConfig;
use crate::NodeError;

/// Owns the staking pool and the permit authority for one ledger instance.
///
/// The pool is handed out as a shared handle so payout hooks and observers
/// can hold on to it; the authority is owned outright.
pub struct Bido<L: AllowanceLedger> {
    config: BidoConfig,
    pool: Rc<StakingPool>,
    permits: PermitAuthority<Ed25519Verifier, L>,
}

impl<L: AllowanceLedger> Bido<L> {
    pub fn new(config: BidoConfig, allowances: L) -> Self {
        let pool = Rc::new(StakingPool::new(config.initial_holder));
        let permits = PermitAuthority::new(config.domain(), Ed25519Verifier, allowances);
        info!(
            initial_holder = %config.initial_holder,
            chain_id = config.chain_id,
            contract = %config.verifying_contract,
            "bido context created"
        );
        Self {
            config,
            pool,
            permits,
        }
    }

    pub fn config(&self) -> &BidoConfig {
        &self.config
    }

    pub fn pool(&self) -> &Rc<StakingPool> {
        &self.pool
    }

    pub fn permits(&self) -> &PermitAuthority<Ed25519Verifier, L> {
        &self.permits
    }

    pub fn permits_mut(&mut self) -> &mut PermitAuthority<Ed25519Verifier, L> {
        &mut self.permits
    }

    pub fn initialize(&self, endowment: u128) -> Result<u128, NodeError> {
        Ok(self.pool.initialize(endowment)?)
    }

    pub fn domain_separator(&self) -> MessageDigest {
        self.permits.domain_separator()
    }

    pub fn nonces(&self, owner: &Address) -> u64 {
        self.permits.nonces(owner)
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> u128 {
        self.permits.ledger().allowance(owner, spender)
    }

    pub fn approve_by_signature(
        &mut self,
        owner: Address,
        spender: Address,
        value: u128,
        deadline: Timestamp,
        signature: &PermitSignature,
        now: Timestamp,
    ) -> Result<u64, NodeError> {
        Ok(self
            .permits
            .approve_by_signature(owner, spender, value, deadline, signature, now)?)
    }
}

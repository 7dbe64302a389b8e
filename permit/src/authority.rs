//! Delegated-approval authority.

use bido_types::{Address, MessageDigest, Timestamp};
use tracing::{debug, info};

use crate::domain::Domain;
use crate::error::PermitError;
use crate::ledger::AllowanceLedger;
use crate::message::PermitMessage;
use crate::nonces::NonceTable;
use crate::verifier::Verifier;

/// Verifies signed permits and sets allowances on the owner's behalf.
///
/// Owns the nonce table exclusively. A nonce is consumed only when the
/// signature verified *and* the allowance was written.
pub struct PermitAuthority<V: Verifier, L: AllowanceLedger> {
    domain: Domain,
    separator: MessageDigest,
    verifier: V,
    ledger: L,
    nonces: NonceTable,
}

impl<V: Verifier, L: AllowanceLedger> PermitAuthority<V, L> {
    pub fn new(domain: Domain, verifier: V, ledger: L) -> Self {
        let separator = domain.separator();
        Self {
            domain,
            separator,
            verifier,
            ledger,
            nonces: NonceTable::new(),
        }
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn domain_separator(&self) -> MessageDigest {
        self.separator
    }

    pub fn nonces(&self, owner: &Address) -> u64 {
        self.nonces.current(owner)
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// The digest `owner` must sign for the given grant, at their current nonce.
    pub fn permit_digest(
        &self,
        owner: Address,
        spender: Address,
        value: u128,
        deadline: Timestamp,
    ) -> MessageDigest {
        PermitMessage {
            owner,
            spender,
            value,
            nonce: self.nonces.current(&owner),
            deadline,
        }
        .digest(&self.separator)
    }

    /// Set `spender`'s allowance over `owner`'s balance to `value`, authorized
    /// by `signature`. Returns the nonce that was consumed.
    pub fn approve_by_signature(
        &mut self,
        owner: Address,
        spender: Address,
        value: u128,
        deadline: Timestamp,
        signature: &V::Signature,
        now: Timestamp,
    ) -> Result<u64, PermitError> {
        if deadline.is_past(now) {
            return Err(PermitError::DeadlineExpired { deadline, now });
        }
        if owner.is_zero() || spender.is_zero() {
            return Err(PermitError::ZeroAddressTarget);
        }

        // The signed message must embed the nonce as it is *before* this call.
        let nonce = self.nonces.current(&owner);
        self.nonces.peek_next(&owner)?;
        let digest = PermitMessage {
            owner,
            spender,
            value,
            nonce,
            deadline,
        }
        .digest(&self.separator);

        match self.verifier.recover_or_validate(&digest, signature) {
            Some(signer) if signer == owner => {}
            other => {
                debug!(%owner, nonce, signer = ?other, "permit signature rejected");
                return Err(PermitError::InvalidSignature);
            }
        }

        self.ledger.approve(owner, spender, value)?;
        let consumed = self.nonces.consume(owner)?;
        info!(%owner, %spender, value, nonce = consumed, "permit consumed");
        Ok(consumed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verifier::{Ed25519Verifier, PermitSignature};
    use bido_crypto::{derive_address, keypair_from_seed};
    use bido_types::KeyPair;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MapLedger {
        allowances: HashMap<(Address, Address), u128>,
        fail: bool,
    }

    impl AllowanceLedger for MapLedger {
        fn approve(
            &mut self,
            owner: Address,
            spender: Address,
            value: u128,
        ) -> Result<(), PermitError> {
            if self.fail {
                return Err(PermitError::Ledger("frozen".into()));
            }
            self.allowances.insert((owner, spender), value);
            Ok(())
        }

        fn allowance(&self, owner: &Address, spender: &Address) -> u128 {
            self.allowances.get(&(*owner, *spender)).copied().unwrap_or(0)
        }
    }

    fn authority() -> PermitAuthority<Ed25519Verifier, MapLedger> {
        let domain = Domain {
            name: "Bido Staked BTC".into(),
            version: "1".into(),
            chain_id: 1501,
            verifying_contract: Address::new([0xB1; 20]),
        };
        PermitAuthority::new(domain, Ed25519Verifier, MapLedger::default())
    }

    fn owner_key() -> KeyPair {
        keypair_from_seed(&[11u8; 32])
    }

    fn spender() -> Address {
        Address::new([0x22; 20])
    }

    fn signed(
        auth: &PermitAuthority<Ed25519Verifier, MapLedger>,
        kp: &KeyPair,
        value: u128,
        deadline: Timestamp,
    ) -> PermitSignature {
        let owner = derive_address(&kp.public);
        PermitSignature::sign(&auth.permit_digest(owner, spender(), value, deadline), kp)
    }

    #[test]
    fn valid_permit_sets_allowance_and_bumps_nonce() {
        let mut auth = authority();
        let kp = owner_key();
        let owner = derive_address(&kp.public);
        let deadline = Timestamp::new(1_000);
        let sig = signed(&auth, &kp, 500, deadline);

        let used = auth
            .approve_by_signature(owner, spender(), 500, deadline, &sig, Timestamp::new(10))
            .unwrap();
        assert_eq!(used, 0);
        assert_eq!(auth.nonces(&owner), 1);
        assert_eq!(auth.ledger().allowance(&owner, &spender()), 500);
    }

    #[test]
    fn expired_deadline_fails_without_consuming_nonce() {
        let mut auth = authority();
        let kp = owner_key();
        let owner = derive_address(&kp.public);
        let deadline = Timestamp::new(100);
        let sig = signed(&auth, &kp, 500, deadline);

        let err = auth
            .approve_by_signature(owner, spender(), 500, deadline, &sig, Timestamp::new(101))
            .unwrap_err();
        assert!(matches!(err, PermitError::DeadlineExpired { .. }));
        assert_eq!(auth.nonces(&owner), 0);
    }

    #[test]
    fn deadline_equal_to_now_is_accepted() {
        let mut auth = authority();
        let kp = owner_key();
        let owner = derive_address(&kp.public);
        let deadline = Timestamp::new(100);
        let sig = signed(&auth, &kp, 1, deadline);
        assert!(auth
            .approve_by_signature(owner, spender(), 1, deadline, &sig, deadline)
            .is_ok());
    }

    #[test]
    fn replay_fails_with_invalid_signature() {
        let mut auth = authority();
        let kp = owner_key();
        let owner = derive_address(&kp.public);
        let deadline = Timestamp::MAX;
        let sig = signed(&auth, &kp, 500, deadline);
        let now = Timestamp::new(1);

        auth.approve_by_signature(owner, spender(), 500, deadline, &sig, now)
            .unwrap();
        assert_eq!(
            auth.approve_by_signature(owner, spender(), 500, deadline, &sig, now),
            Err(PermitError::InvalidSignature)
        );
        assert_eq!(auth.nonces(&owner), 1);
    }

    #[test]
    fn signature_from_another_key_fails() {
        let mut auth = authority();
        let owner = derive_address(&owner_key().public);
        let intruder = keypair_from_seed(&[12u8; 32]);
        let deadline = Timestamp::MAX;
        let sig = PermitSignature::sign(
            &auth.permit_digest(owner, spender(), 500, deadline),
            &intruder,
        );
        assert_eq!(
            auth.approve_by_signature(owner, spender(), 500, deadline, &sig, Timestamp::new(1)),
            Err(PermitError::InvalidSignature)
        );
        assert_eq!(auth.nonces(&owner), 0);
    }

    #[test]
    fn altered_value_fails() {
        let mut auth = authority();
        let kp = owner_key();
        let owner = derive_address(&kp.public);
        let deadline = Timestamp::MAX;
        let sig = signed(&auth, &kp, 500, deadline);
        assert_eq!(
            auth.approve_by_signature(owner, spender(), 501, deadline, &sig, Timestamp::new(1)),
            Err(PermitError::InvalidSignature)
        );
    }

    #[test]
    fn ledger_failure_does_not_consume_nonce() {
        let mut auth = authority();
        auth.ledger_mut().fail = true;
        let kp = owner_key();
        let owner = derive_address(&kp.public);
        let deadline = Timestamp::MAX;
        let sig = signed(&auth, &kp, 500, deadline);
        assert_eq!(
            auth.approve_by_signature(owner, spender(), 500, deadline, &sig, Timestamp::new(1)),
            Err(PermitError::Ledger("frozen".into()))
        );
        assert_eq!(auth.nonces(&owner), 0);
    }

    #[test]
    fn zero_spender_fails() {
        let mut auth = authority();
        let kp = owner_key();
        let owner = derive_address(&kp.public);
        let sig = signed(&auth, &kp, 1, Timestamp::MAX);
        assert_eq!(
            auth.approve_by_signature(
                owner,
                Address::ZERO,
                1,
                Timestamp::MAX,
                &sig,
                Timestamp::new(1)
            ),
            Err(PermitError::ZeroAddressTarget)
        );
    }
}

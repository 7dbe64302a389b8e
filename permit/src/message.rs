//! The structured message an owner signs.

use bido_crypto::{blake2b_256, digest_parts};
use bido_types::{Address, MessageDigest, Timestamp};
use serde::{Deserialize, Serialize};

const PERMIT_TYPE: &[u8] =
    b"Permit(address owner,address spender,uint128 value,uint64 nonce,uint64 deadline)";

/// Prefix that keeps permit digests apart from any other signed payload.
const DIGEST_PREFIX: &[u8] = b"\x19\x01";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitMessage {
    pub owner: Address,
    pub spender: Address,
    pub value: u128,
    pub nonce: u64,
    pub deadline: Timestamp,
}

impl PermitMessage {
    pub fn struct_hash(&self) -> [u8; 32] {
        let type_hash = blake2b_256(PERMIT_TYPE);
        *digest_parts(&[
            &type_hash,
            self.owner.as_bytes(),
            self.spender.as_bytes(),
            &self.value.to_be_bytes(),
            &self.nonce.to_be_bytes(),
            &self.deadline.as_secs().to_be_bytes(),
        ])
        .as_bytes()
    }

    /// The digest actually signed: prefix, domain separator, struct hash.
    pub fn digest(&self, domain_separator: &MessageDigest) -> MessageDigest {
        digest_parts(&[DIGEST_PREFIX, domain_separator.as_bytes(), &self.struct_hash()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> PermitMessage {
        PermitMessage {
            owner: Address::new([1u8; 20]),
            spender: Address::new([2u8; 20]),
            value: 1_000,
            nonce: 0,
            deadline: Timestamp::new(500),
        }
    }

    #[test]
    fn nonce_changes_digest() {
        let sep = MessageDigest::new([9u8; 32]);
        let mut next = message();
        next.nonce = 1;
        assert_ne!(message().digest(&sep), next.digest(&sep));
    }

    #[test]
    fn domain_changes_digest() {
        let a = MessageDigest::new([1u8; 32]);
        let b = MessageDigest::new([2u8; 32]);
        assert_ne!(message().digest(&a), message().digest(&b));
    }

    #[test]
    fn swapping_owner_and_spender_changes_digest() {
        let sep = MessageDigest::new([9u8; 32]);
        let mut swapped = message();
        std::mem::swap(&mut swapped.owner, &mut swapped.spender);
        assert_ne!(message().digest(&sep), swapped.digest(&sep));
    }
}

//! Domain separator binding permits to one deployment.

use bido_crypto::{blake2b_256, digest_parts};
use bido_types::{Address, MessageDigest};
use serde::{Deserialize, Serialize};

const DOMAIN_TYPE: &[u8] =
    b"BidoDomain(string name,string version,uint64 chainId,address verifyingContract)";

/// Identifies the ledger instance a permit is valid for. Two deployments
/// that differ in any field produce different separators, so a signature
/// for one cannot be replayed on the other.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl Domain {
    pub fn separator(&self) -> MessageDigest {
        let type_hash = blake2b_256(DOMAIN_TYPE);
        let name_hash = blake2b_256(self.name.as_bytes());
        let version_hash = blake2b_256(self.version.as_bytes());
        digest_parts(&[
            &type_hash,
            &name_hash,
            &version_hash,
            &self.chain_id.to_be_bytes(),
            self.verifying_contract.as_bytes(),
        ])
    }
}

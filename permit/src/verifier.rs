//! Pluggable signature verification.

use bido_crypto::{derive_address, sign_digest, verify_digest};
use bido_types::{Address, KeyPair, MessageDigest, PublicKey, Signature};
use serde::{Deserialize, Serialize};

/// Answers "which account signed this digest?".
///
/// Schemes with key recovery derive the signer from the signature alone;
/// schemes without it carry the public key in `Self::Signature`. Either way
/// the authority only compares the returned address with the claimed owner.
pub trait Verifier {
    type Signature;

    fn recover_or_validate(
        &self,
        digest: &MessageDigest,
        signature: &Self::Signature,
    ) -> Option<Address>;
}

/// Ed25519 signature plus the signer's public key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitSignature {
    pub public_key: PublicKey,
    pub signature: Signature,
}

impl PermitSignature {
    pub fn sign(digest: &MessageDigest, keypair: &KeyPair) -> Self {
        Self {
            public_key: keypair.public,
            signature: sign_digest(digest, &keypair.private),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Ed25519Verifier;

impl Verifier for Ed25519Verifier {
    type Signature = PermitSignature;

    fn recover_or_validate(
        &self,
        digest: &MessageDigest,
        signature: &PermitSignature,
    ) -> Option<Address> {
        verify_digest(digest, &signature.signature, &signature.public_key)
            .then(|| derive_address(&signature.public_key))
    }
}

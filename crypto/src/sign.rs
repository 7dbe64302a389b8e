//! Ed25519 signing and verification over message digests.

use bido_types::{MessageDigest, PrivateKey, PublicKey, Signature};
use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};

/// Sign a digest with a private key.
pub fn sign_digest(digest: &MessageDigest, private_key: &PrivateKey) -> Signature {
    let signing_key = SigningKey::from_bytes(&private_key.0);
    Signature(signing_key.sign(digest.as_bytes()).to_bytes())
}

/// Verify a signature over a digest. Malformed keys verify as `false`.
pub fn verify_digest(digest: &MessageDigest, signature: &Signature, public_key: &PublicKey) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(&public_key.0) else {
        return false;
    };
    let dalek_sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    verifying_key.verify(digest.as_bytes(), &dalek_sig).is_ok()
}

//! Address derivation from public keys.

use bido_types::{Address, PublicKey};

use crate::hash::blake2b_256;

/// Derive the account address for a public key.
///
/// Takes the trailing 20 bytes of `Blake2b-256(public_key)`.
pub fn derive_address(public_key: &PublicKey) -> Address {
    let hash = blake2b_256(public_key.as_bytes());
    let mut out = [0u8; Address::LEN];
    out.copy_from_slice(&hash[32 - Address::LEN..]);
    Address::new(out)
}

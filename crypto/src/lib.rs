//! Cryptographic primitives for the Bido staking ledger.
//!
//! - **Ed25519** for signing and verifying permit messages
//! - **Blake2b-256** for message digests and domain separators
//! - Address derivation: the last 20 bytes of `Blake2b-256(public_key)`

pub mod address;
pub mod hash;
pub mod keys;
pub mod sign;

pub use address::derive_address;
pub use hash::{blake2b_256, blake2b_256_multi, digest_parts};
pub use keys::{keypair_from_private, keypair_from_seed, public_from_private};
pub use sign::{sign_digest, verify_digest};

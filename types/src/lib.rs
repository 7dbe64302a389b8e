//! Fundamental types for the Bido staking ledger.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! account addresses, message digests, timestamps, key material and the common
//! error type.

pub mod address;
pub mod error;
pub mod hash;
pub mod keys;
pub mod time;

pub use address::Address;
pub use error::BidoError;
pub use hash::MessageDigest;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use time::Timestamp;

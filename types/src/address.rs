//! Account address type, rendered as `0x`-prefixed hex.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::BidoError;

/// A 20-byte account identifier.
///
/// Derived from an account's public key (see `bido_crypto::derive_address`),
/// or one of the reserved constants below.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; 20]);

impl Address {
    /// Number of bytes in an address.
    pub const LEN: usize = 20;

    /// The null account. Used as the mint/burn side of transfer notifications
    /// and never a valid share holder.
    pub const ZERO: Self = Self([0u8; 20]);

    /// `0x000000000000000000000000000000000000dead`, the default initial holder.
    pub const DEAD: Self = Self([
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xde, 0xad,
    ]);

    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{})", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = BidoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|_| BidoError::InvalidAddress(s.to_string()))?;
        let arr: [u8; 20] = bytes
            .try_into()
            .map_err(|_| BidoError::InvalidAddress(s.to_string()))?;
        Ok(Self(arr))
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dead_address_renders_as_expected() {
        assert_eq!(
            Address::DEAD.to_string(),
            "0x000000000000000000000000000000000000dead"
        );
    }

    #[test]
    fn parse_accepts_with_and_without_prefix() {
        let a: Address = "0x000000000000000000000000000000000000dead".parse().unwrap();
        let b: Address = "000000000000000000000000000000000000dead".parse().unwrap();
        assert_eq!(a, Address::DEAD);
        assert_eq!(b, Address::DEAD);
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert!("0xdead".parse::<Address>().is_err());
    }

    #[test]
    fn parse_rejects_non_hex() {
        assert!("0xzz0000000000000000000000000000000000dead"
            .parse::<Address>()
            .is_err());
    }

    #[test]
    fn zero_is_zero() {
        assert!(Address::ZERO.is_zero());
        assert!(!Address::DEAD.is_zero());
        assert_eq!(Address::default(), Address::ZERO);
    }
}

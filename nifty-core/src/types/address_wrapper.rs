use rand::Rng;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::types::NiftyError;

/// Account address (20 bytes), rendered as 0x-prefixed hex
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    pub const LEN: usize = 20;

    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// The null address; never a valid owner or recipient
    pub fn zero() -> Self {
        Self([0u8; 20])
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Random non-null address
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let mut bytes = [0u8; 20];
            rng.fill(&mut bytes[..]);
            let addr = Self(bytes);
            if !addr.is_zero() {
                return addr;
            }
        }
    }

    /// Build from the first 20 bytes of a longer slice, e.g. a hash
    pub fn from_slice_prefix(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::LEN {
            return None;
        }
        let mut out = [0u8; 20];
        out.copy_from_slice(&bytes[..Self::LEN]);
        Some(Self(out))
    }
}

impl FromStr for Address {
    type Err = NiftyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes = hex::decode(stripped)
            .map_err(|e| NiftyError::InvalidAddress(format!("{}: {}", s, e)))?;
        if bytes.len() != Self::LEN {
            return Err(NiftyError::InvalidAddress(format!(
                "{}: expected {} bytes, got {}",
                s,
                Self::LEN,
                bytes.len()
            )));
        }
        let mut out = [0u8; 20];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

struct AddressVisitor;

impl<'de> Visitor<'de> for AddressVisitor {
    type Value = Address;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a 0x-prefixed 20-byte hex address")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Address, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(AddressVisitor)
    }
}

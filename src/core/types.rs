//! Core data types for vcstrack

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length in bytes of a SHA-256 digest
pub const DIGEST_LEN: usize = 32;

/// 32-byte SHA-256 content digest
///
/// The text form is always 64 lowercase hex characters. That form is what
/// both persisted records use as keys and values, so `Display`, `FromStr`
/// and the serde impls all go through it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Create a Digest from a 32-byte array
    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Digest(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Parse a digest from its 64-character lowercase hex form
    ///
    /// Uppercase digits are rejected so every digest has exactly one text form.
    pub fn from_hex(hex: &str) -> Result<Self, hex::FromHexError> {
        if hex.len() != DIGEST_LEN * 2 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        if let Some((index, c)) = hex
            .char_indices()
            .find(|(_, c)| !matches!(c, '0'..='9' | 'a'..='f'))
        {
            return Err(hex::FromHexError::InvalidHexCharacter { c, index });
        }
        let mut array = [0u8; DIGEST_LEN];
        hex::decode_to_slice(hex, &mut array)?;
        Ok(Digest(array))
    }

    /// Convert to lowercase hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Abbreviated hex form for display
    pub fn short(&self) -> String {
        hex::encode(&self.0[..6])
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", &hex::encode(self.0)[..8])
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Digest(bytes)
    }
}

impl FromStr for Digest {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Digest::from_hex(s)
    }
}

// Serialize as the hex string so digests can be JSON object keys
impl Serialize for Digest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hex_string = String::deserialize(deserializer)?;
        Digest::from_hex(&hex_string).map_err(serde::de::Error::custom)
    }
}

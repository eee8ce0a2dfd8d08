//! Chain hash type for Merkle nodes and transaction identifiers.
//!
//! Provides a `Hash` type: a 32-byte array displayed as byte-reversed hex.
//! Digests are computed and combined in internal byte order, but the
//! externally consumed representation is the reversed one.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize, Serializer, Deserializer};
use crate::hash::{sha256, sha256d};
use crate::PrimitivesError;

/// Size of a Hash in bytes.
pub const HASH_SIZE: usize = 32;

/// Hex string length for a Hash (64 hex characters).
pub const HASH_STRING_SIZE: usize = HASH_SIZE * 2;

/// A 32-byte digest used for Merkle nodes and roots.
///
/// When displayed as a string, the bytes are reversed (little-endian
/// internal, big-endian display).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    /// Create a Hash from a raw 32-byte array in internal byte order.
    pub fn new(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }

    /// Create a Hash from a byte slice.
    ///
    /// # Arguments
    /// * `bytes` - A slice that must be exactly 32 bytes.
    ///
    /// # Returns
    /// `Ok(Hash)` if the slice is 32 bytes, or an error otherwise.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != HASH_SIZE {
            return Err(PrimitivesError::InvalidHash(
                format!("invalid hash length of {}, want {}", bytes.len(), HASH_SIZE)
            ));
        }
        let mut arr = [0u8; HASH_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Hash(arr))
    }

    /// Create a Hash from a byte-reversed (display order) hex string.
    ///
    /// Unlike block explorers, short strings are not zero-padded: the input
    /// must be exactly 64 hex characters.
    ///
    /// # Arguments
    /// * `hex_str` - A 64-character hex string in display order.
    ///
    /// # Returns
    /// `Ok(Hash)` on success, or an error for malformed input.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if hex_str.len() != HASH_STRING_SIZE {
            return Err(PrimitivesError::InvalidHash(
                format!("hash string length is {}, want {}", hex_str.len(), HASH_STRING_SIZE)
            ));
        }
        let decoded = hex::decode(hex_str)?;
        let mut hash = Hash::from_bytes(&decoded)?;
        hash.0.reverse();
        Ok(hash)
    }

    /// Access the internal byte array as a reference.
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    /// Return a copy of this hash with the byte order reversed.
    pub fn reversed(&self) -> Hash {
        let mut bytes = self.0;
        bytes.reverse();
        Hash(bytes)
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Display the hash as byte-reversed hex.
///
/// Internal bytes `[0x06, 0xe5, ...]` display as `"...e506"`.
impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.reversed().0))
    }
}

impl FromStr for Hash {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hash::from_hex(s)
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Hash::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Compute SHA-256 of the input and return the result as a Hash.
pub fn hash_h(data: &[u8]) -> Hash {
    Hash(sha256(data))
}

/// Compute double SHA-256 of the input and return the result as a Hash.
pub fn double_hash_h(data: &[u8]) -> Hash {
    Hash(sha256d(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Genesis block hash bytes in internal (little-endian) order.
    const MAIN_NET_GENESIS_HASH: Hash = Hash([
        0x6f, 0xe2, 0x8c, 0x0a, 0xb6, 0xf1, 0xb3, 0x72,
        0xc1, 0xa6, 0xa2, 0x46, 0xae, 0x63, 0xf7, 0x4f,
        0x93, 0x1e, 0x83, 0x65, 0xe1, 0x5a, 0x08, 0x9c,
        0x68, 0xd6, 0x19, 0x00, 0x00, 0x00, 0x00, 0x00,
    ]);

    #[test]
    fn test_hash_string() {
        let hash = Hash::new([
            0x06, 0xe5, 0x33, 0xfd, 0x1a, 0xda, 0x86, 0x39,
            0x1f, 0x3f, 0x6c, 0x34, 0x32, 0x04, 0xb0, 0xd2,
            0x78, 0xd4, 0xaa, 0xec, 0x1c, 0x0b, 0x20, 0xaa,
            0x27, 0xba, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00,
        ]);
        assert_eq!(
            hash.to_string(),
            "000000000003ba27aa200b1cecaad478d2b00432346c3f1f3986da1afd33e506"
        );
    }

    #[test]
    fn test_from_hex() {
        let result = Hash::from_hex(
            "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f"
        ).unwrap();
        assert_eq!(result, MAIN_NET_GENESIS_HASH);

        // Stripped leading zeros are rejected rather than padded.
        assert!(Hash::from_hex("19d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f").is_err());
        assert!(Hash::from_hex("").is_err());

        // Right length, invalid character.
        let bad = "g00000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f";
        assert!(matches!(Hash::from_hex(bad), Err(PrimitivesError::InvalidHex(_))));
    }

    #[test]
    fn test_from_bytes_length() {
        assert!(Hash::from_bytes(&[0u8; HASH_SIZE]).is_ok());
        assert!(Hash::from_bytes(&[0u8; HASH_SIZE + 1]).is_err());
        assert!(Hash::from_bytes(&[0u8; 1]).is_err());
    }

    #[test]
    fn test_reversed_is_involution() {
        assert_eq!(MAIN_NET_GENESIS_HASH.reversed().reversed(), MAIN_NET_GENESIS_HASH);
        assert_eq!(MAIN_NET_GENESIS_HASH.reversed().as_bytes()[0], 0x00);
    }

    #[test]
    fn test_double_hash_h_matches_sha256d() {
        assert_eq!(double_hash_h(b"hello").as_bytes(), &sha256d(b"hello"));
        assert_eq!(double_hash_h(b"hello"), Hash::new(sha256(&hash_h(b"hello").0)));
    }

    #[test]
    fn test_marshalling() {
        #[derive(Serialize, Deserialize)]
        struct TestData {
            hash: Hash,
        }

        let data = TestData {
            hash: hash_h(b"hello"),
        };
        assert_eq!(
            data.hash.to_string(),
            "24988b93623304735e42a71f5c1e161b9ee2b9c52a3be8260ea3b05fba4df22c"
        );

        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(
            json,
            r#"{"hash":"24988b93623304735e42a71f5c1e161b9ee2b9c52a3be8260ea3b05fba4df22c"}"#
        );

        let data2: TestData = serde_json::from_str(&json).unwrap();
        assert_eq!(data2.hash, data.hash);
    }
}

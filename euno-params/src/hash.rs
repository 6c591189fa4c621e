//! Fixed-size block hash type

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Size of a block hash in bytes
pub const HASH_SIZE: usize = 32;

/// Double-SHA256 block hash.
///
/// Bytes are stored in internal (little-endian) order. The hex form used in
/// parameter tables, explorers and RPC output is the reversed byte order,
/// so [`BlockHash::from_hex`] and [`fmt::Display`] both reverse.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BlockHash([u8; HASH_SIZE]);

impl BlockHash {
    /// All-zero hash
    pub const ZERO: Self = Self([0; HASH_SIZE]);

    /// Wrap bytes that are already in internal byte order
    pub const fn from_byte_array(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    /// Internal byte order
    pub const fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    /// Parse a 64-character hex string in display order
    pub fn from_hex(s: &str) -> Result<Self> {
        if s.len() != HASH_SIZE * 2 {
            return Err(Error::InvalidHash(format!(
                "expected {} hex characters, got {}",
                HASH_SIZE * 2,
                s.len()
            )));
        }

        let mut bytes = [0u8; HASH_SIZE];
        hex::decode_to_slice(s, &mut bytes).map_err(|e| Error::InvalidHash(format!("{}: {}", s, e)))?;
        bytes.reverse();

        Ok(Self(bytes))
    }

    /// Hex string in display order
    pub fn to_hex(&self) -> String {
        let mut bytes = self.0;
        bytes.reverse();
        hex::encode(bytes)
    }

    /// Check if this is the all-zero hash
    pub fn is_zero(&self) -> bool {
        self.0 == [0; HASH_SIZE]
    }
}

impl FromStr for BlockHash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for BlockHash {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

impl From<BlockHash> for String {
    fn from(hash: BlockHash) -> Self {
        hash.to_hex()
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockHash({})", self.to_hex())
    }
}

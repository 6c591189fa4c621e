//! Address prefixes and BIP32 extended key versions

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of an HD extended key version
pub const HD_KEY_VERSION_LEN: usize = 4;

/// Leading bytes used to classify base58-encoded addresses and keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddressPrefixes {
    /// Pay-to-public-key-hash prefix
    pub pubkey_hash: u8,
    /// Pay-to-script-hash prefix
    pub script_hash: u8,
    /// Cold-staking key prefix
    pub staking_key: u8,
    /// WIF private key prefix
    pub secret_key: u8,
}

/// 4-byte version prefix of a BIP32 extended key
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HdKeyVersion([u8; HD_KEY_VERSION_LEN]);

impl HdKeyVersion {
    /// Wrap version bytes
    pub const fn new(bytes: [u8; HD_KEY_VERSION_LEN]) -> Self {
        Self(bytes)
    }

    /// Validate and copy a byte slice
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let array: [u8; HD_KEY_VERSION_LEN] = bytes.try_into().map_err(|_| {
            Error::InvalidHdKeyVersion(format!(
                "expected {} bytes, got {}",
                HD_KEY_VERSION_LEN,
                bytes.len()
            ))
        })?;
        Ok(Self(array))
    }

    /// Parse an 8-character hex string
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|e| Error::InvalidHdKeyVersion(format!("{}: {}", s, e)))?;
        Self::from_slice(&bytes)
    }

    /// Version bytes
    pub const fn to_bytes(self) -> [u8; HD_KEY_VERSION_LEN] {
        self.0
    }

    /// Version bytes as a slice
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Version as a big-endian integer (the form used in node sources)
    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }
}

impl TryFrom<String> for HdKeyVersion {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

impl From<HdKeyVersion> for String {
    fn from(version: HdKeyVersion) -> Self {
        hex::encode(version.0)
    }
}

impl fmt::Display for HdKeyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for HdKeyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HdKeyVersion({})", hex::encode(self.0))
    }
}

/// Private/public extended key version pair for one network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HdKeyVersions {
    /// Extended private key version
    pub private: HdKeyVersion,
    /// Extended public key version
    pub public: HdKeyVersion,
}

impl HdKeyVersions {
    /// Create a pair from fixed-size arrays
    pub const fn new(private: [u8; HD_KEY_VERSION_LEN], public: [u8; HD_KEY_VERSION_LEN]) -> Self {
        Self {
            private: HdKeyVersion::new(private),
            public: HdKeyVersion::new(public),
        }
    }

    /// Create a pair from byte slices, rejecting anything that is not 4 bytes
    pub fn from_slices(private: &[u8], public: &[u8]) -> Result<Self> {
        Ok(Self {
            private: HdKeyVersion::from_slice(private)?,
            public: HdKeyVersion::from_slice(public)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice_length() {
        assert!(HdKeyVersion::from_slice(&[0x04, 0x35, 0x83, 0x94]).is_ok());
        assert!(matches!(
            HdKeyVersion::from_slice(&[0x04, 0x35, 0x83]),
            Err(Error::InvalidHdKeyVersion(_))
        ));
        assert!(matches!(
            HdKeyVersion::from_slice(&[0; 5]),
            Err(Error::InvalidHdKeyVersion(_))
        ));
    }

    #[test]
    fn test_hex_forms() {
        let version = HdKeyVersion::from_hex("3a805837").unwrap();
        assert_eq!(version.to_bytes(), [0x3a, 0x80, 0x58, 0x37]);
        assert_eq!(version.to_u32(), 0x3a80_5837);
        assert_eq!(version.to_string(), "3a805837");
        assert!(HdKeyVersion::from_hex("3a8058").is_err());
        assert!(HdKeyVersion::from_hex("not-hex!").is_err());
    }

    #[test]
    fn test_pair_from_slices() {
        let pair = HdKeyVersions::from_slices(&[0x04, 0x35, 0x83, 0x94], &[0x04, 0x35, 0x87, 0xcf]).unwrap();
        assert_eq!(pair.public.to_bytes(), [0x04, 0x35, 0x87, 0xcf]);
        assert!(HdKeyVersions::from_slices(&[0x04, 0x35, 0x83, 0x94], &[]).is_err());
    }

    #[test]
    fn test_serde_validates_length() {
        let pair: HdKeyVersions =
            serde_json::from_str(r#"{"private":"04358394","public":"043587cf"}"#).unwrap();
        assert_eq!(pair, HdKeyVersions::new([0x04, 0x35, 0x83, 0x94], [0x04, 0x35, 0x87, 0xcf]));

        let short = serde_json::from_str::<HdKeyVersions>(r#"{"private":"043583","public":"043587cf"}"#);
        assert!(short.is_err());
    }
}

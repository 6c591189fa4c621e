//! Euno network identifiers

use crate::params::ParameterSet;
use crate::{builtin, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Network magic number.
///
/// Prefixed to every P2P message; unique per registered network.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkMagic(pub u32);

impl NetworkMagic {
    /// Mainnet magic
    pub const MAINNET: Self = Self(0xe9fd_c490);
    /// Testnet magic
    pub const TESTNET: Self = Self(0xba65_7645);
    /// Regtest magic
    pub const REGTEST: Self = Self(0xdab5_bffa);

    /// Raw value
    pub const fn to_u32(self) -> u32 {
        self.0
    }

    /// Bytes as they appear on the wire
    pub const fn to_wire_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    /// Parse from wire bytes
    pub const fn from_wire_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_le_bytes(bytes))
    }
}

impl fmt::Display for NetworkMagic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl fmt::Debug for NetworkMagic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NetworkMagic(0x{:08x})", self.0)
    }
}

impl FromStr for NetworkMagic {
    type Err = Error;

    /// Accepts `0x`-prefixed hex or plain decimal
    fn from_str(s: &str) -> Result<Self> {
        let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => s.parse::<u32>(),
        };
        parsed
            .map(Self)
            .map_err(|e| Error::InvalidNetwork(format!("bad magic {:?}: {}", s, e)))
    }
}

/// Built-in network enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkType {
    /// Mainnet
    Mainnet,
    /// Testnet
    Testnet,
    /// Regtest (local development)
    Regtest,
}

impl NetworkType {
    /// All built-in networks, in registration order
    pub const ALL: [NetworkType; 3] = [Self::Mainnet, Self::Testnet, Self::Regtest];

    /// Parameter-set name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mainnet => "main",
            Self::Testnet => "test",
            Self::Regtest => "regtest",
        }
    }

    /// Network magic
    pub const fn magic(self) -> NetworkMagic {
        match self {
            Self::Mainnet => NetworkMagic::MAINNET,
            Self::Testnet => NetworkMagic::TESTNET,
            Self::Regtest => NetworkMagic::REGTEST,
        }
    }

    /// Look up a built-in network by magic
    pub fn from_magic(magic: NetworkMagic) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.magic() == magic)
    }

    /// Build the parameter set for this network
    pub fn parameter_set(self) -> Result<ParameterSet> {
        match self {
            Self::Mainnet => builtin::mainnet(),
            Self::Testnet => builtin::testnet(),
            Self::Regtest => builtin::regtest(),
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NetworkType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "main" | "mainnet" => Ok(Self::Mainnet),
            "test" | "testnet" => Ok(Self::Testnet),
            "regtest" => Ok(Self::Regtest),
            other => Err(Error::InvalidNetwork(other.to_string())),
        }
    }
}

/// DNS seed used for initial peer discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsSeed {
    /// Seed hostname
    pub host: String,
    /// Whether the seed supports service-bit filtering
    #[serde(default)]
    pub has_filtering: bool,
}

impl DnsSeed {
    /// Create a seed entry
    pub fn new(host: impl Into<String>, has_filtering: bool) -> Self {
        Self {
            host: host.into(),
            has_filtering,
        }
    }
}

impl fmt::Display for DnsSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.host)
    }
}

//! Consensus parameters for Euno

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Proof-of-work limit of the form `2^bit_length - 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u16", into = "u16")]
pub struct PowLimit {
    bit_length: u16,
}

impl PowLimit {
    /// Create a limit with the low `bit_length` bits set (capped at 256)
    pub const fn from_bit_length(bit_length: u16) -> Self {
        Self {
            bit_length: if bit_length > 256 { 256 } else { bit_length },
        }
    }

    /// Number of set bits
    pub const fn bit_length(&self) -> u16 {
        self.bit_length
    }

    /// 256-bit big-endian value
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        let full = usize::from(self.bit_length / 8);
        let partial = self.bit_length % 8;

        for byte in bytes.iter_mut().rev().take(full) {
            *byte = 0xff;
        }
        if partial > 0 {
            bytes[31 - full] = (1u8 << partial) - 1;
        }
        bytes
    }
}

impl From<u16> for PowLimit {
    fn from(bit_length: u16) -> Self {
        Self::from_bit_length(bit_length)
    }
}

impl From<PowLimit> for u16 {
    fn from(limit: PowLimit) -> Self {
        limit.bit_length
    }
}

/// Chain-wide timing and economic rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsensusParams {
    /// Allow minimum-difficulty blocks when the chain stalls
    pub pow_allow_min_difficulty_blocks: bool,
    /// Proof-of-work limit
    pub pow_limit: PowLimit,
    /// Proof-of-work limit before the v2 retarget
    pub pow_limit_v1: PowLimit,
    /// Proof-of-work limit after the v2 retarget
    pub pow_limit_v2: PowLimit,
    /// Blocks per budget cycle
    pub budget_cycle_blocks: u32,
    /// Confirmations required for a budget fee transaction
    pub budget_fee_confirmations: u32,
    /// Coinbase maturity (blocks)
    pub coinbase_maturity: u16,
    /// Allowed future drift for PoW blocks
    #[serde(with = "secs")]
    pub future_time_drift_pow: Duration,
    /// Allowed future drift for PoS blocks
    #[serde(with = "secs")]
    pub future_time_drift_pos: Duration,
    /// Max transactions in a mixing pool
    pub pool_max_transactions: u32,
    /// Minimum age of a proposal before it can be voted on
    #[serde(with = "secs")]
    pub proposal_establishment_time: Duration,
    /// Minimum coin age for staking
    #[serde(with = "secs")]
    pub stake_min_age: Duration,
    /// Minimum confirmations for staking
    pub stake_min_depth: u32,
    /// Difficulty retarget timespan
    #[serde(with = "secs")]
    pub target_timespan: Duration,
    /// Difficulty retarget timespan after PoS v2
    #[serde(with = "secs")]
    pub target_timespan_v2: Duration,
    /// Target block spacing
    #[serde(with = "secs")]
    pub target_spacing: Duration,
    /// PoS block timestamps must fall on slot boundaries
    #[serde(with = "secs")]
    pub time_slot_length: Duration,
}

impl Default for ConsensusParams {
    /// Rules shared by the test networks
    fn default() -> Self {
        Self {
            pow_allow_min_difficulty_blocks: true,
            pow_limit: PowLimit::from_bit_length(20),
            pow_limit_v1: PowLimit::from_bit_length(24),
            pow_limit_v2: PowLimit::from_bit_length(20),
            budget_cycle_blocks: 144,
            budget_fee_confirmations: 3,
            coinbase_maturity: 15,
            future_time_drift_pow: Duration::from_secs(7200),
            future_time_drift_pos: Duration::from_secs(180),
            pool_max_transactions: 2,
            proposal_establishment_time: Duration::from_secs(60 * 5),
            stake_min_age: Duration::from_secs(60 * 60),
            stake_min_depth: 100,
            target_timespan: Duration::from_secs(40 * 60),
            target_timespan_v2: Duration::from_secs(30 * 60),
            target_spacing: Duration::from_secs(60),
            time_slot_length: Duration::from_secs(15),
        }
    }
}

impl ConsensusParams {
    /// Allowed future drift for a block
    pub fn future_time_drift(&self, proof_of_stake: bool) -> Duration {
        if proof_of_stake {
            self.future_time_drift_pos
        } else {
            self.future_time_drift_pow
        }
    }

    /// Blocks between difficulty retargets
    pub fn retarget_interval(&self) -> u64 {
        let spacing = self.target_spacing.as_secs().max(1);
        self.target_timespan.as_secs() / spacing
    }

    /// Check rules that would make the chain unusable
    pub fn validate(&self) -> Result<()> {
        if self.target_spacing.is_zero() {
            return Err(Error::InvalidNetwork("target spacing must be non-zero".to_string()));
        }
        if self.budget_cycle_blocks == 0 {
            return Err(Error::InvalidNetwork("budget cycle must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// Spork signing keys and the key-rotation schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SporkKeys {
    /// Current spork public key
    #[serde(with = "hex_bytes")]
    pub public_key: Vec<u8>,
    /// Previous spork public key
    #[serde(with = "hex_bytes")]
    pub old_public_key: Vec<u8>,
    /// Messages must be signed by the new key from this time
    pub enforce_new_key_time: DateTime<Utc>,
    /// Messages signed by the old key are rejected from this time
    pub reject_old_key_time: DateTime<Utc>,
}

impl SporkKeys {
    /// Build from hex keys and Unix timestamps
    pub fn from_hex(public_key: &str, old_public_key: &str, enforce_new_key: i64, reject_old_key: i64) -> Result<Self> {
        let decode = |key: &str| {
            hex::decode(key).map_err(|e| Error::InvalidNetwork(format!("bad spork key: {}", e)))
        };
        Ok(Self {
            public_key: decode(public_key)?,
            old_public_key: decode(old_public_key)?,
            enforce_new_key_time: timestamp(enforce_new_key)?,
            reject_old_key_time: timestamp(reject_old_key)?,
        })
    }

    /// Check if the new key is mandatory at `at`
    pub fn requires_new_key(&self, at: DateTime<Utc>) -> bool {
        at >= self.enforce_new_key_time
    }

    /// Check if the old key is still accepted at `at`
    pub fn accepts_old_key(&self, at: DateTime<Utc>) -> bool {
        at < self.reject_old_key_time
    }
}

/// Zerocoin heights that switch validation behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ZerocoinHeights {
    /// Last block with an accumulator checkpoint
    pub last_accumulator_checkpoint: u32,
    /// Last block with wrapped serials
    pub last_wrapped_serials: u32,
    /// First block checked against the invalid-UTXO list
    pub start_invalid_utxos_check: u32,
    /// First block checked for invalid serials
    pub start_invalid_serials: u32,
    /// First block with serial range checks
    pub start_serial_range_check: u32,
    /// Block at which accumulators were recalculated
    pub recalc_accumulators: u32,
}

/// Known-bad block whose difficulty check is bypassed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadBlockBypass {
    /// Block timestamp
    pub time: u32,
    /// Block difficulty bits
    pub bits: u32,
}

/// Unix timestamp to UTC time
pub(crate) fn timestamp(secs: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| Error::InvalidNetwork(format!("timestamp {} out of range", secs)))
}

mod secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(d)?;
        hex::decode(&s).map_err(serde::de::Error::custom)
    }
}

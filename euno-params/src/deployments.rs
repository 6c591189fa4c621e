//! Network upgrades and their activation rules

use crate::hash::BlockHash;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

/// Highest version bit usable for signalling
pub const MAX_VOTE_BIT: u8 = 28;

/// Named network upgrade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Upgrade {
    /// Version-bits test deployment
    TestDummyDeployment,
    /// Genesis rules
    BaseNetwork,
    /// Height-activated test upgrade
    TestDummy,
    /// Proof of stake
    Pos,
    /// Proof of stake v2 (modifier v2)
    PosV2,
    /// Zerocoin
    Zc,
    /// Zerocoin v2
    ZcV2,
    /// CHECKLOCKTIMEVERIFY
    Bip65,
    /// Public zerocoin spends
    ZcPublic,
    /// v3.4 rules
    V3_4,
    /// v4.0 rules
    V4_0,
    /// Placeholder for the next upgrade
    V5_0Dummy,
}

impl Upgrade {
    /// Number of upgrades
    pub const COUNT: usize = 12;

    /// All upgrades in activation order
    pub const ALL: [Upgrade; Self::COUNT] = [
        Self::TestDummyDeployment,
        Self::BaseNetwork,
        Self::TestDummy,
        Self::Pos,
        Self::PosV2,
        Self::Zc,
        Self::ZcV2,
        Self::Bip65,
        Self::ZcPublic,
        Self::V3_4,
        Self::V4_0,
        Self::V5_0Dummy,
    ];

    /// Position in [`Upgrade::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display name
    pub const fn name(self) -> &'static str {
        match self {
            Self::TestDummyDeployment => "test_dummy_deployment",
            Self::BaseNetwork => "base_network",
            Self::TestDummy => "test_dummy",
            Self::Pos => "pos",
            Self::PosV2 => "pos_v2",
            Self::Zc => "zc",
            Self::ZcV2 => "zc_v2",
            Self::Bip65 => "bip65",
            Self::ZcPublic => "zc_public",
            Self::V3_4 => "v3_4",
            Self::V4_0 => "v4_0",
            Self::V5_0Dummy => "v5_0_dummy",
        }
    }
}

impl fmt::Display for Upgrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Miner signalling window for a version-bits deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteWindow {
    /// Version bit miners set to signal readiness
    pub bit: u8,
    /// Signalling starts at this median time
    pub start_time: DateTime<Utc>,
    /// Signalling ends at this median time
    pub timeout: DateTime<Utc>,
}

impl VoteWindow {
    /// Create a window, checking the bit and time range
    pub fn new(bit: u8, start_time: DateTime<Utc>, timeout: DateTime<Utc>) -> Result<Self> {
        let window = Self {
            bit,
            start_time,
            timeout,
        };
        window.validate()?;
        Ok(window)
    }

    fn validate(&self) -> Result<()> {
        if self.bit > MAX_VOTE_BIT {
            return Err(Error::InvalidNetwork(format!(
                "vote bit {} exceeds {}",
                self.bit, MAX_VOTE_BIT
            )));
        }
        if self.timeout <= self.start_time {
            return Err(Error::InvalidNetwork(format!(
                "vote window ends ({}) before it starts ({})",
                self.timeout, self.start_time
            )));
        }
        Ok(())
    }

    /// Check if miners may signal at the given median time
    pub fn is_open(&self, at: DateTime<Utc>) -> bool {
        at >= self.start_time && at < self.timeout
    }

    /// Version field mask for this bit
    pub fn mask(&self) -> u32 {
        1u32.checked_shl(u32::from(self.bit)).unwrap_or(0)
    }
}

/// Activation rule for one upgrade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConsensusDeployment {
    /// Height the upgrade enforces from (None = never activates)
    pub activation_height: Option<u32>,
    /// Hash of the block at the activation height, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation_block: Option<BlockHash>,
    /// Signalling window, for vote-activated upgrades
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote: Option<VoteWindow>,
}

impl ConsensusDeployment {
    /// Upgrade that never activates
    pub const NEVER: Self = Self {
        activation_height: None,
        activation_block: None,
        vote: None,
    };

    /// Upgrade that activates at a fixed height
    pub const fn at_height(height: u32) -> Self {
        Self {
            activation_height: Some(height),
            activation_block: None,
            vote: None,
        }
    }

    /// Attach the activation block hash (display-order hex)
    pub fn with_activation_block(mut self, hash: &str) -> Result<Self> {
        self.activation_block = Some(BlockHash::from_hex(hash)?);
        Ok(self)
    }

    /// Attach a signalling window
    pub fn with_vote(mut self, vote: VoteWindow) -> Self {
        self.vote = Some(vote);
        self
    }

    /// Check if the upgrade is enforced at the given height
    pub const fn is_active_at(&self, height: u32) -> bool {
        match self.activation_height {
            Some(activation) => height >= activation,
            None => false,
        }
    }

    /// Check if `height` is exactly the activation height
    pub fn is_activation_height(&self, height: u32) -> bool {
        self.activation_height == Some(height)
    }
}

/// Activation rule for every [`Upgrade`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Upgrade, ConsensusDeployment>", into = "BTreeMap<Upgrade, ConsensusDeployment>")]
pub struct Deployments([ConsensusDeployment; Upgrade::COUNT]);

impl Deployments {
    /// Every upgrade set to never activate
    pub const fn new() -> Self {
        Self([ConsensusDeployment::NEVER; Upgrade::COUNT])
    }

    /// Replace the rule for one upgrade
    pub fn with(mut self, upgrade: Upgrade, deployment: ConsensusDeployment) -> Self {
        self.0[upgrade.index()] = deployment;
        self
    }

    /// Rule for an upgrade
    pub fn get(&self, upgrade: Upgrade) -> &ConsensusDeployment {
        &self.0[upgrade.index()]
    }

    /// Check if an upgrade is enforced at the given height
    pub fn is_active(&self, upgrade: Upgrade, height: u32) -> bool {
        self.get(upgrade).is_active_at(height)
    }

    /// Iterate `(upgrade, rule)` pairs in activation order
    pub fn iter(&self) -> impl Iterator<Item = (Upgrade, &ConsensusDeployment)> {
        Upgrade::ALL.into_iter().zip(self.0.iter())
    }

    /// Check every signalling window
    pub fn validate(&self) -> Result<()> {
        for (upgrade, deployment) in self.iter() {
            if let Some(vote) = &deployment.vote {
                vote.validate()
                    .map_err(|e| Error::InvalidNetwork(format!("{}: {}", upgrade, e)))?;
            }
        }
        Ok(())
    }
}

impl Default for Deployments {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Upgrade> for Deployments {
    type Output = ConsensusDeployment;

    fn index(&self, upgrade: Upgrade) -> &ConsensusDeployment {
        self.get(upgrade)
    }
}

impl From<BTreeMap<Upgrade, ConsensusDeployment>> for Deployments {
    fn from(map: BTreeMap<Upgrade, ConsensusDeployment>) -> Self {
        map.into_iter()
            .fold(Self::new(), |deployments, (upgrade, deployment)| deployments.with(upgrade, deployment))
    }
}

impl From<Deployments> for BTreeMap<Upgrade, ConsensusDeployment> {
    fn from(deployments: Deployments) -> Self {
        deployments.iter().map(|(upgrade, d)| (upgrade, *d)).collect()
    }
}

//! Complete parameter set for one network

use crate::checkpoints::CheckpointList;
use crate::consensus::{BadBlockBypass, ConsensusParams, SporkKeys, ZerocoinHeights};
use crate::deployments::{Deployments, Upgrade};
use crate::genesis::GenesisHeader;
use crate::hash::BlockHash;
use crate::keys::{AddressPrefixes, HdKeyVersions};
use crate::network::{DnsSeed, NetworkMagic};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Parameters identifying and configuring one Euno network.
///
/// Built once and never modified after registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Network name ("main", "test", "regtest")
    pub name: String,
    /// Network magic
    pub net: NetworkMagic,
    /// Default P2P port
    pub default_port: String,
    /// Seeds for peer discovery
    #[serde(default)]
    pub dns_seeds: Vec<DnsSeed>,
    /// Genesis block hash
    pub genesis_hash: BlockHash,
    /// Genesis block header, when the chain module supplies it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genesis_block: Option<GenesisHeader>,
    /// Timing and economic rules
    #[serde(default)]
    pub consensus: ConsensusParams,
    /// Spork signing keys
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spork_keys: Option<SporkKeys>,
    /// Zerocoin validation heights
    #[serde(default)]
    pub zerocoin: ZerocoinHeights,
    /// Known-bad block bypass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bad_block: Option<BadBlockBypass>,
    /// Checkpoints, oldest to newest
    #[serde(default)]
    pub checkpoints: CheckpointList,
    /// Upgrade activation rules
    #[serde(default)]
    pub deployments: Deployments,
    /// Address encoding prefixes
    pub address_prefixes: AddressPrefixes,
    /// BIP32 extended key versions
    pub hd_key_versions: HdKeyVersions,
    /// BIP44 coin type
    pub hd_coin_type: u32,
}

impl ParameterSet {
    /// Check the set is internally consistent.
    ///
    /// Checkpoint ordering is enforced when the list is built; this checks
    /// the remaining cross-field rules.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::InvalidNetwork(format!("network {} has no name", self.net)));
        }

        self.port()?;

        if let Some(hash) = self.checkpoints.get(0) {
            if hash != &self.genesis_hash {
                return Err(Error::InvalidCheckpoints(format!(
                    "{}: checkpoint at height 0 ({}) is not the genesis hash ({})",
                    self.name, hash, self.genesis_hash
                )));
            }
        }

        self.consensus
            .validate()
            .and_then(|()| self.deployments.validate())
            .map_err(|e| Error::InvalidNetwork(format!("{}: {}", self.name, e)))
    }

    /// Default port as a number
    pub fn port(&self) -> Result<u16> {
        self.default_port
            .parse()
            .map_err(|_| Error::InvalidNetwork(format!("{}: bad port {:?}", self.name, self.default_port)))
    }

    /// Check if an upgrade is enforced at the given height
    pub fn is_upgrade_active(&self, upgrade: Upgrade, height: u32) -> bool {
        self.deployments.is_active(upgrade, height)
    }

    /// Hash checkpointed at exactly this height
    pub fn checkpoint(&self, height: u32) -> Option<&BlockHash> {
        self.checkpoints.get(height)
    }
}

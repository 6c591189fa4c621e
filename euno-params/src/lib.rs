//! Euno network parameters and registry
//!
//! This crate provides the network-specific constants for the Euno chain
//! (magic bytes, genesis hash, address prefixes, HD key versions,
//! checkpoints and upgrade activation heights) together with a registry
//! that maps network magic numbers to parameter sets and answers address
//! prefix and HD key version lookups.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod builtin;
pub mod checkpoints;
pub mod consensus;
pub mod custom;
pub mod deployments;
pub mod genesis;
pub mod hash;
pub mod keys;
pub mod network;
pub mod params;
pub mod registry;

pub use checkpoints::{Checkpoint, CheckpointList};
pub use consensus::{BadBlockBypass, ConsensusParams, PowLimit, SporkKeys, ZerocoinHeights};
pub use deployments::{ConsensusDeployment, Deployments, Upgrade, VoteWindow};
pub use genesis::GenesisHeader;
pub use hash::BlockHash;
pub use keys::{AddressPrefixes, HdKeyVersion, HdKeyVersions};
pub use network::{DnsSeed, NetworkMagic, NetworkType};
pub use params::ParameterSet;
pub use registry::Registry;

/// Error types for parameter operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A network with the same magic is already registered
    #[error("Duplicate network: magic {0} is already registered")]
    DuplicateNetwork(NetworkMagic),

    /// HD extended key version bytes are malformed
    #[error("Invalid HD key version: {0}")]
    InvalidHdKeyVersion(String),

    /// HD private key version is not registered (or is not 4 bytes)
    #[error("Unknown HD private key version: {0}")]
    UnknownKeyVersion(String),

    /// Hash string could not be decoded
    #[error("Invalid block hash: {0}")]
    InvalidHash(String),

    /// Checkpoint list is out of order or inconsistent with genesis
    #[error("Invalid checkpoints: {0}")]
    InvalidCheckpoints(String),

    /// Checkpoint not found
    #[error("No checkpoint found for height {0}")]
    CheckpointNotFound(u32),

    /// Network not found in the registry
    #[error("Network not found: {0}")]
    NetworkNotFound(String),

    /// Invalid network specified
    #[error("Invalid network: {0}")]
    InvalidNetwork(String),

    /// I/O error while reading a network definition file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network definition could not be parsed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for parameter operations
pub type Result<T> = std::result::Result<T, Error>;

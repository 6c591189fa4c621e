//! Genesis block header

use crate::hash::BlockHash;
use serde::{Deserialize, Serialize};

/// Header fields of a genesis block.
///
/// Carried as reference data only; the hash stored next to it in a
/// [`ParameterSet`](crate::ParameterSet) is not recomputed from these fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisHeader {
    /// Block version
    pub version: i32,
    /// Previous block hash (zero for genesis)
    #[serde(default)]
    pub prev_blockhash: BlockHash,
    /// Merkle root of the coinbase transaction
    pub merkle_root: BlockHash,
    /// Block timestamp
    pub time: u32,
    /// Compact difficulty target
    pub bits: u32,
    /// Nonce
    pub nonce: u32,
}

impl GenesisHeader {
    /// Check the header links to nothing
    pub fn is_genesis(&self) -> bool {
        self.prev_blockhash.is_zero()
    }
}

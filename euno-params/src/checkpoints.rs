//! Blockchain checkpoints for faster sync

use crate::hash::BlockHash;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A blockchain checkpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Block height
    pub height: u32,
    /// Block hash
    pub hash: BlockHash,
}

impl Checkpoint {
    /// Create a checkpoint from a display-order hex hash
    pub fn from_hex(height: u32, hash: &str) -> Result<Self> {
        Ok(Self {
            height,
            hash: BlockHash::from_hex(hash)?,
        })
    }
}

/// List of checkpoints, ordered oldest to newest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Checkpoint>", into = "Vec<Checkpoint>")]
pub struct CheckpointList {
    checkpoints: Vec<Checkpoint>,
}

impl CheckpointList {
    /// Create a new checkpoint list.
    ///
    /// Heights must be strictly increasing.
    pub fn new(checkpoints: Vec<Checkpoint>) -> Result<Self> {
        for pair in checkpoints.windows(2) {
            if pair[1].height <= pair[0].height {
                return Err(Error::InvalidCheckpoints(format!(
                    "height {} follows height {}",
                    pair[1].height, pair[0].height
                )));
            }
        }
        Ok(Self { checkpoints })
    }

    /// Build a list from `(height, hex hash)` pairs
    pub fn from_hex(entries: &[(u32, &str)]) -> Result<Self> {
        let checkpoints = entries
            .iter()
            .map(|&(height, hash)| Checkpoint::from_hex(height, hash))
            .collect::<Result<Vec<_>>>()?;
        Self::new(checkpoints)
    }

    /// Get checkpoint at or before given height
    pub fn checkpoint_at_height(&self, height: u32) -> Result<&Checkpoint> {
        self.checkpoints
            .iter()
            .rev()
            .find(|cp| cp.height <= height)
            .ok_or(Error::CheckpointNotFound(height))
    }

    /// Get the hash checkpointed at exactly this height
    pub fn get(&self, height: u32) -> Option<&BlockHash> {
        self.checkpoints
            .binary_search_by_key(&height, |cp| cp.height)
            .ok()
            .map(|idx| &self.checkpoints[idx].hash)
    }

    /// Get all checkpoints
    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    /// Iterate oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Checkpoint> {
        self.checkpoints.iter()
    }

    /// Get latest checkpoint
    pub fn latest(&self) -> Option<&Checkpoint> {
        self.checkpoints.last()
    }

    /// Get checkpoint count
    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }
}

impl TryFrom<Vec<Checkpoint>> for CheckpointList {
    type Error = Error;

    fn try_from(checkpoints: Vec<Checkpoint>) -> Result<Self> {
        Self::new(checkpoints)
    }
}

impl From<CheckpointList> for Vec<Checkpoint> {
    fn from(list: CheckpointList) -> Self {
        list.checkpoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const H0: &str = "0000000069e244f73d78e8fd29ba2fd2ed618bd6fa2ee92559f542fdb26e7c1d";
    const H1: &str = "00000055bbced95bf1fe0b4eccaee23ece9d82ceae67e3a4ec4e757619159a9f";
    const H2: &str = "258c489f42f03cb97db2255e47938da4083eee4e242853c2d48bae2b1d0110a6";

    fn sample() -> CheckpointList {
        CheckpointList::from_hex(&[(0, H0), (1441, H1), (5000, H2)]).unwrap()
    }

    #[test]
    fn test_checkpoint_at_height() {
        let checkpoints = sample();

        let cp = checkpoints.checkpoint_at_height(2000).unwrap();
        assert_eq!(cp.height, 1441);

        let cp = checkpoints.checkpoint_at_height(5000).unwrap();
        assert_eq!(cp.hash.to_hex(), H2);

        assert_eq!(checkpoints.latest().unwrap().height, 5000);
    }

    #[test]
    fn test_checkpoint_not_found() {
        let checkpoints = CheckpointList::from_hex(&[(1441, H1)]).unwrap();
        let result = checkpoints.checkpoint_at_height(100);
        assert!(matches!(result, Err(Error::CheckpointNotFound(100))));
    }

    #[test]
    fn test_out_of_order_rejected() {
        let result = CheckpointList::from_hex(&[(1441, H1), (0, H0)]);
        assert!(matches!(result, Err(Error::InvalidCheckpoints(_))));

        let result = CheckpointList::from_hex(&[(10, H1), (10, H0)]);
        assert!(matches!(result, Err(Error::InvalidCheckpoints(_))));
    }

    #[test]
    fn test_get_exact_height() {
        let checkpoints = sample();
        let h1 = BlockHash::from_hex(H1).unwrap();
        let h2 = BlockHash::from_hex(H2).unwrap();

        assert_eq!(checkpoints.get(1441), Some(&h1));
        assert_eq!(checkpoints.get(1442), None);
        assert_eq!(checkpoints.get(5000), Some(&h2));
        assert_eq!(checkpoints.get(4999), None);
    }

    #[test]
    fn test_serde_rejects_unordered() {
        let json = format!(r#"[{{"height":5,"hash":"{}"}},{{"height":1,"hash":"{}"}}]"#, H0, H1);
        assert!(serde_json::from_str::<CheckpointList>(&json).is_err());

        let json = serde_json::to_string(&sample()).unwrap();
        let back: CheckpointList = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 3);
    }
}

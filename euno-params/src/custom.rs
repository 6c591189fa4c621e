//! Custom network definitions loaded from JSON
//!
//! A definition file holds either one parameter-set object or an array of
//! them, in the same shape [`ParameterSet`] serializes to. Omitted consensus
//! fields fall back to the test-network defaults.

use crate::keys::HdKeyVersion;
use crate::params::ParameterSet;
use crate::registry::Registry;
use crate::Result;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

/// Parse network definitions from a JSON string
pub fn parse_networks(json: &str) -> Result<Vec<ParameterSet>> {
    let value: Value = serde_json::from_str(json)?;
    let networks = match value {
        Value::Array(items) => items.into_iter().map(parse_network).collect::<Result<Vec<_>>>()?,
        other => vec![parse_network(other)?],
    };

    for params in &networks {
        params.validate()?;
    }
    Ok(networks)
}

/// Deserialize one definition.
///
/// HD key versions are checked first so a wrong length surfaces as
/// `InvalidHdKeyVersion` rather than a serde error.
fn parse_network(value: Value) -> Result<ParameterSet> {
    if let Some(versions) = value.get("hd_key_versions") {
        for field in ["private", "public"] {
            if let Some(hex) = versions.get(field).and_then(Value::as_str) {
                HdKeyVersion::from_hex(hex)?;
            }
        }
    }
    Ok(serde_json::from_value(value)?)
}

/// Read network definitions from a JSON file
pub fn load_networks(path: impl AsRef<Path>) -> Result<Vec<ParameterSet>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let networks = parse_networks(&json)?;
    tracing::debug!("Loaded {} network definition(s) from {}", networks.len(), path.display());
    Ok(networks)
}

impl Registry {
    /// Load definitions from a JSON file and register them
    pub fn register_from_file(&self, path: impl AsRef<Path>) -> Result<Vec<Arc<ParameterSet>>> {
        let networks = load_networks(path)?;
        self.register_all(networks)
    }
}

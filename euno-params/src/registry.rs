//! Registry of known networks
//!
//! A [`Registry`] maps network magic numbers to parameter sets and keeps the
//! lookup tables that address and extended-key decoders need: which prefix
//! bytes belong to some registered network, and which public HD version
//! pairs with a given private one. Registration is insert-only; nothing is
//! ever removed.

use crate::keys::{HdKeyVersion, HdKeyVersions};
use crate::network::NetworkMagic;
use crate::params::ParameterSet;
use crate::{builtin, Error, Result};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

#[derive(Debug, Default)]
struct RegistryInner {
    networks: HashMap<NetworkMagic, Arc<ParameterSet>>,
    // Registration order, for listing
    order: Vec<NetworkMagic>,
    pubkey_hash_prefixes: HashSet<u8>,
    script_hash_prefixes: HashSet<u8>,
    staking_key_prefixes: HashSet<u8>,
    hd_private_to_public: HashMap<HdKeyVersion, HdKeyVersion>,
}

/// Network parameter registry
#[derive(Debug, Default)]
pub struct Registry {
    inner: RwLock<RegistryInner>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding main, test and regtest
    pub fn with_builtin_networks() -> Result<Self> {
        let registry = Self::new();
        for params in builtin::all()? {
            registry.register(params)?;
        }
        Ok(registry)
    }

    /// Register a network.
    ///
    /// Fails with [`Error::DuplicateNetwork`] if the magic is taken. A
    /// failed registration leaves the registry untouched.
    pub fn register(&self, params: ParameterSet) -> Result<Arc<ParameterSet>> {
        params.validate()?;

        let mut inner = self.inner.write();
        if inner.networks.contains_key(&params.net) {
            tracing::warn!("Rejected network {:?}: magic {} already registered", params.name, params.net);
            return Err(Error::DuplicateNetwork(params.net));
        }

        let prefixes = params.address_prefixes;
        inner.pubkey_hash_prefixes.insert(prefixes.pubkey_hash);
        inner.script_hash_prefixes.insert(prefixes.script_hash);
        inner.staking_key_prefixes.insert(prefixes.staking_key);
        insert_hd_key_versions(&mut inner, params.hd_key_versions);

        let magic = params.net;
        let params = Arc::new(params);
        inner.networks.insert(magic, Arc::clone(&params));
        inner.order.push(magic);

        tracing::debug!("Registered network {:?} (magic {}, port {})", params.name, magic, params.default_port);
        Ok(params)
    }

    /// Register each network in turn, stopping at the first failure
    pub fn register_all(&self, networks: impl IntoIterator<Item = ParameterSet>) -> Result<Vec<Arc<ParameterSet>>> {
        networks.into_iter().map(|params| self.register(params)).collect()
    }

    /// Register an HD private/public version pair without a full network
    pub fn register_hd_key_versions(&self, public: &[u8], private: &[u8]) -> Result<()> {
        let versions = HdKeyVersions::from_slices(private, public)?;
        insert_hd_key_versions(&mut self.inner.write(), versions);
        Ok(())
    }

    /// Check if some registered network uses this pay-to-pubkey-hash prefix
    pub fn is_pubkey_hash_prefix(&self, id: u8) -> bool {
        self.inner.read().pubkey_hash_prefixes.contains(&id)
    }

    /// Check if some registered network uses this pay-to-script-hash prefix
    pub fn is_script_hash_prefix(&self, id: u8) -> bool {
        self.inner.read().script_hash_prefixes.contains(&id)
    }

    /// Check if some registered network uses this staking-key prefix
    pub fn is_staking_key_prefix(&self, id: u8) -> bool {
        self.inner.read().staking_key_prefixes.contains(&id)
    }

    /// Public HD version registered alongside a private one
    pub fn resolve_public_key_version(&self, private: &[u8]) -> Result<HdKeyVersion> {
        let unknown = || Error::UnknownKeyVersion(hex::encode(private));
        let private = HdKeyVersion::from_slice(private).map_err(|_| unknown())?;

        self.inner
            .read()
            .hd_private_to_public
            .get(&private)
            .copied()
            .ok_or_else(unknown)
    }

    /// Look up a network by magic
    pub fn get(&self, magic: NetworkMagic) -> Option<Arc<ParameterSet>> {
        self.inner.read().networks.get(&magic).cloned()
    }

    /// Look up a network by magic, failing if absent
    pub fn require(&self, magic: NetworkMagic) -> Result<Arc<ParameterSet>> {
        self.get(magic).ok_or_else(|| Error::NetworkNotFound(magic.to_string()))
    }

    /// Look up the first registered network with this name
    pub fn by_name(&self, name: &str) -> Option<Arc<ParameterSet>> {
        let inner = self.inner.read();
        inner
            .order
            .iter()
            .filter_map(|magic| inner.networks.get(magic))
            .find(|params| params.name == name)
            .cloned()
    }

    /// Check if a magic is registered
    pub fn contains(&self, magic: NetworkMagic) -> bool {
        self.inner.read().networks.contains_key(&magic)
    }

    /// All networks in registration order
    pub fn networks(&self) -> Vec<Arc<ParameterSet>> {
        let inner = self.inner.read();
        inner
            .order
            .iter()
            .filter_map(|magic| inner.networks.get(magic).cloned())
            .collect()
    }

    /// Number of registered networks
    pub fn len(&self) -> usize {
        self.inner.read().networks.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.inner.read().networks.is_empty()
    }
}

fn insert_hd_key_versions(inner: &mut RegistryInner, versions: HdKeyVersions) {
    if let Some(previous) = inner.hd_private_to_public.insert(versions.private, versions.public) {
        if previous != versions.public {
            tracing::warn!(
                "HD private version {} remapped from {} to {}",
                versions.private,
                previous,
                versions.public
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::AddressPrefixes;
    use crate::network::NetworkType;

    fn custom(magic: u32, pubkey_hash: u8) -> ParameterSet {
        let mut params = builtin::regtest().unwrap();
        params.name = format!("custom-{:08x}", magic);
        params.net = NetworkMagic(magic);
        params.address_prefixes = AddressPrefixes {
            pubkey_hash,
            script_hash: 0xc4,
            staking_key: 0x3f,
            secret_key: 0xef,
        };
        params.hd_key_versions = HdKeyVersions::new([0x04, 0x35, 0x83, 0x94], [0x04, 0x35, 0x87, 0xcf]);
        params
    }

    #[test]
    fn test_duplicate_network_rejected() {
        let registry = Registry::new();
        registry.register(custom(0x0b11_0907, 0x6f)).unwrap();

        let mut dup = custom(0x0b11_0907, 0x55);
        dup.name = "other".to_string();
        let result = registry.register(dup);
        assert!(matches!(result, Err(Error::DuplicateNetwork(NetworkMagic(0x0b11_0907)))));

        // First registration is intact; the rejected one left no prefixes behind
        assert_eq!(registry.len(), 1);
        assert!(registry.is_pubkey_hash_prefix(0x6f));
        assert!(!registry.is_pubkey_hash_prefix(0x55));
        assert!(registry.by_name("other").is_none());
    }

    #[test]
    fn test_prefix_queries() {
        let registry = Registry::new();
        registry.register(custom(1, 0x6f)).unwrap();

        assert!(registry.is_pubkey_hash_prefix(0x6f));
        assert!(!registry.is_pubkey_hash_prefix(0x00));
        assert!(registry.is_script_hash_prefix(0xc4));
        assert!(!registry.is_script_hash_prefix(0x6f));
        assert!(registry.is_staking_key_prefix(0x3f));
        assert!(!registry.is_staking_key_prefix(0xc4));
    }

    #[test]
    fn test_resolve_public_key_version() {
        let registry = Registry::new();
        registry.register(custom(1, 0x6f)).unwrap();

        let public = registry.resolve_public_key_version(&[0x04, 0x35, 0x83, 0x94]).unwrap();
        assert_eq!(public.to_bytes(), [0x04, 0x35, 0x87, 0xcf]);

        let result = registry.resolve_public_key_version(&[0x04, 0x35, 0x83]);
        assert!(matches!(result, Err(Error::UnknownKeyVersion(_))));

        let result = registry.resolve_public_key_version(&[0xde, 0xad, 0xbe, 0xef]);
        assert!(matches!(result, Err(Error::UnknownKeyVersion(_))));
    }

    #[test]
    fn test_register_hd_key_versions_directly() {
        let registry = Registry::new();
        registry
            .register_hd_key_versions(&[0x04, 0x88, 0xb2, 0x1e], &[0x04, 0x88, 0xad, 0xe4])
            .unwrap();
        assert_eq!(
            registry.resolve_public_key_version(&[0x04, 0x88, 0xad, 0xe4]).unwrap().to_bytes(),
            [0x04, 0x88, 0xb2, 0x1e]
        );

        let result = registry.register_hd_key_versions(&[0x04, 0x88, 0xb2], &[0x04, 0x88, 0xad, 0xe4]);
        assert!(matches!(result, Err(Error::InvalidHdKeyVersion(_))));
        // No network was registered
        assert!(registry.is_empty());
    }

    #[test]
    fn test_builtin_registry() {
        let registry = Registry::with_builtin_networks().unwrap();
        assert_eq!(registry.len(), 3);

        let names: Vec<String> = registry.networks().iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, ["main", "test", "regtest"]);

        for network in NetworkType::ALL {
            let params = registry.require(network.magic()).unwrap();
            assert_eq!(params.name, network.name());
            assert!(registry.is_pubkey_hash_prefix(params.address_prefixes.pubkey_hash));
        }

        // Built-ins cannot be registered twice
        let result = registry.register(builtin::mainnet().unwrap());
        assert!(matches!(result, Err(Error::DuplicateNetwork(_))));
    }

    #[test]
    fn test_require_missing() {
        let registry = Registry::new();
        assert!(matches!(
            registry.require(NetworkMagic::MAINNET),
            Err(Error::NetworkNotFound(_))
        ));
        assert!(!registry.contains(NetworkMagic::MAINNET));
    }

    #[test]
    fn test_concurrent_registration() {
        let registry = Arc::new(Registry::with_builtin_networks().unwrap());

        let handles: Vec<_> = (0..8u32)
            .map(|i| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    registry.register(custom(0x1000 + i, 0x40 + i as u8)).unwrap();
                    assert!(registry.is_pubkey_hash_prefix(0x40 + i as u8));
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(registry.len(), 11);
    }
}

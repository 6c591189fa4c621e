//! Property-based tests for euno-params
//!
//! Uses proptest to verify registry invariants across randomized inputs

use euno_params::{
    AddressPrefixes, Checkpoint, CheckpointList, Error, HdKeyVersions, NetworkMagic, NetworkType,
    ParameterSet, Registry,
};
use proptest::prelude::*;

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Magic numbers that do not collide with the built-ins
fn custom_magic_strategy() -> impl Strategy<Value = u32> {
    any::<u32>().prop_filter("built-in magic", |m| {
        NetworkType::ALL.iter().all(|n| n.magic().to_u32() != *m)
    })
}

fn prefixes_strategy() -> impl Strategy<Value = AddressPrefixes> {
    (any::<u8>(), any::<u8>(), any::<u8>(), any::<u8>()).prop_map(
        |(pubkey_hash, script_hash, staking_key, secret_key)| AddressPrefixes {
            pubkey_hash,
            script_hash,
            staking_key,
            secret_key,
        },
    )
}

fn network(magic: u32, prefixes: AddressPrefixes, private: [u8; 4], public: [u8; 4]) -> ParameterSet {
    let mut params = NetworkType::Regtest.parameter_set().expect("regtest table");
    params.name = format!("net-{:08x}", magic);
    params.net = NetworkMagic(magic);
    params.address_prefixes = prefixes;
    params.hd_key_versions = HdKeyVersions::new(private, public);
    params
}

// ============================================================================
// Registry Properties
// ============================================================================

proptest! {
    /// Property: a registered network's prefixes and HD versions are queryable
    #[test]
    fn prop_registered_network_is_queryable(
        magic in custom_magic_strategy(),
        prefixes in prefixes_strategy(),
        private in any::<[u8; 4]>(),
        public in any::<[u8; 4]>(),
    ) {
        let registry = Registry::with_builtin_networks().unwrap();
        registry.register(network(magic, prefixes, private, public)).unwrap();

        prop_assert!(registry.contains(NetworkMagic(magic)));
        prop_assert!(registry.is_pubkey_hash_prefix(prefixes.pubkey_hash));
        prop_assert!(registry.is_script_hash_prefix(prefixes.script_hash));
        prop_assert!(registry.is_staking_key_prefix(prefixes.staking_key));
        prop_assert_eq!(
            registry.resolve_public_key_version(&private).unwrap().to_bytes(),
            public
        );
    }

    /// Property: a rejected duplicate never changes query results
    #[test]
    fn prop_duplicate_leaves_registry_unchanged(
        magic in custom_magic_strategy(),
        first in prefixes_strategy(),
        second in prefixes_strategy(),
    ) {
        let registry = Registry::new();
        registry.register(network(magic, first, [1, 2, 3, 4], [5, 6, 7, 8])).unwrap();

        let before: Vec<bool> = (0..=u8::MAX).map(|b| registry.is_pubkey_hash_prefix(b)).collect();
        let result = registry.register(network(magic, second, [9, 9, 9, 9], [0, 0, 0, 0]));
        prop_assert!(matches!(result, Err(Error::DuplicateNetwork(_))));

        let after: Vec<bool> = (0..=u8::MAX).map(|b| registry.is_pubkey_hash_prefix(b)).collect();
        prop_assert_eq!(before, after);
        prop_assert!(registry.resolve_public_key_version(&[9, 9, 9, 9]).is_err());
    }

    /// Property: lookups with anything but 4 bytes fail
    #[test]
    fn prop_wrong_length_key_version_unknown(bytes in prop::collection::vec(any::<u8>(), 0..12)) {
        prop_assume!(bytes.len() != 4);
        let registry = Registry::with_builtin_networks().unwrap();
        let result = registry.resolve_public_key_version(&bytes);
        prop_assert!(matches!(result, Err(Error::UnknownKeyVersion(_))));
    }

    /// Property: checkpoint lists accept exactly the strictly increasing heights
    #[test]
    fn prop_checkpoint_ordering(heights in prop::collection::vec(0u32..10_000, 0..8)) {
        let hash = NetworkType::Testnet.parameter_set().unwrap().genesis_hash;
        let checkpoints: Vec<Checkpoint> = heights.iter().map(|&height| Checkpoint { height, hash }).collect();

        let increasing = heights.windows(2).all(|w| w[0] < w[1]);
        prop_assert_eq!(CheckpointList::new(checkpoints).is_ok(), increasing);
    }
}

//! Built-in Euno networks
//!
//! Each constructor decodes its hard-coded hashes and validates the result,
//! so a typo in a table surfaces as an [`Error`](crate::Error) instead of a
//! panic. Callers that treat a bad built-in table as fatal abort on the error.

use crate::checkpoints::CheckpointList;
use crate::consensus::{BadBlockBypass, ConsensusParams, SporkKeys, ZerocoinHeights};
use crate::deployments::{ConsensusDeployment, Deployments, Upgrade};
use crate::hash::BlockHash;
use crate::keys::{AddressPrefixes, HdKeyVersions};
use crate::network::{DnsSeed, NetworkMagic, NetworkType};
use crate::params::ParameterSet;
use crate::Result;
use std::time::Duration;

const DNS_SEED: &str = "seed.euno.network";

const MAINNET_GENESIS: &str = "0000000069e244f73d78e8fd29ba2fd2ed618bd6fa2ee92559f542fdb26e7c1d";
const MAINNET_ACTIVATION_BLOCK: &str = "00000055bbced95bf1fe0b4eccaee23ece9d82ceae67e3a4ec4e757619159a9f";
const MAINNET_UPGRADE_HEIGHT: u32 = 1441;

const TESTNET_GENESIS: &str = "00000055bbced95bf1fe0b4eccaee23ece9d82ceae67e3a4ec4e757619159a9f";
const TESTNET_ACTIVATION_BLOCK: &str = "258c489f42f03cb97db2255e47938da4083eee4e242853c2d48bae2b1d0110a6";
const TESTNET_UPGRADE_HEIGHT: u32 = 251;

const SPORK_KEY: &str = "04653C23ED96425AE787AE88884CC53F30921D12B6BAA827B737CE845782C7A0FD1F226575EB99520F2ED03E55DC51FC817B640C1A822874B0CBF25924DE87C947";
const SPORK_ENFORCE_NEW_KEY: i64 = 1566860400;
const SPORK_REJECT_OLD_KEY: i64 = 1569538800;

const HD_COIN_TYPE: u32 = 303;

const MAINNET_PREFIXES: AddressPrefixes = AddressPrefixes {
    pubkey_hash: 33, // starts with E
    script_hash: 13, // starts with 6
    staking_key: 63, // starts with S
    secret_key: 212,
};

const TESTNET_PREFIXES: AddressPrefixes = AddressPrefixes {
    pubkey_hash: 139, // starts with x or y
    script_hash: 19,  // starts with 8 or 9
    staking_key: 73,  // starts with W
    secret_key: 239,
};

// xprv / xpub
const MAINNET_HD_KEY_VERSIONS: HdKeyVersions = HdKeyVersions::new([0x02, 0x21, 0x31, 0x2b], [0x02, 0x2d, 0x25, 0x33]);
const TESTNET_HD_KEY_VERSIONS: HdKeyVersions = HdKeyVersions::new([0x3a, 0x80, 0x58, 0x37], [0x3a, 0x80, 0x61, 0xa0]);

/// Get mainnet parameters
pub fn mainnet() -> Result<ParameterSet> {
    let params = ParameterSet {
        name: NetworkType::Mainnet.name().to_string(),
        net: NetworkMagic::MAINNET,
        default_port: "46462".to_string(),
        dns_seeds: vec![DnsSeed::new(DNS_SEED, true)],
        genesis_hash: BlockHash::from_hex(MAINNET_GENESIS)?,
        genesis_block: None,
        consensus: ConsensusParams {
            pow_allow_min_difficulty_blocks: false,
            budget_cycle_blocks: 43200,
            budget_fee_confirmations: 6,
            coinbase_maturity: 100,
            pool_max_transactions: 3,
            proposal_establishment_time: Duration::from_secs(60 * 60 * 24),
            stake_min_depth: 600,
            ..ConsensusParams::default()
        },
        spork_keys: Some(SporkKeys::from_hex(
            SPORK_KEY,
            SPORK_KEY,
            SPORK_ENFORCE_NEW_KEY,
            SPORK_REJECT_OLD_KEY,
        )?),
        zerocoin: ZerocoinHeights {
            last_accumulator_checkpoint: MAINNET_UPGRADE_HEIGHT,
            last_wrapped_serials: MAINNET_UPGRADE_HEIGHT,
            start_invalid_utxos_check: MAINNET_UPGRADE_HEIGHT,
            start_invalid_serials: MAINNET_UPGRADE_HEIGHT,
            start_serial_range_check: MAINNET_UPGRADE_HEIGHT,
            recalc_accumulators: MAINNET_UPGRADE_HEIGHT,
        },
        bad_block: Some(BadBlockBypass {
            time: 1471401614,
            bits: 0x1c05_6dac,
        }),
        checkpoints: CheckpointList::from_hex(&[(0, MAINNET_GENESIS)])?,
        deployments: upgrade_schedule(MAINNET_UPGRADE_HEIGHT, MAINNET_ACTIVATION_BLOCK)?,
        address_prefixes: MAINNET_PREFIXES,
        hd_key_versions: MAINNET_HD_KEY_VERSIONS,
        hd_coin_type: HD_COIN_TYPE,
    };
    params.validate()?;
    Ok(params)
}

/// Get testnet parameters
pub fn testnet() -> Result<ParameterSet> {
    let params = ParameterSet {
        name: NetworkType::Testnet.name().to_string(),
        net: NetworkMagic::TESTNET,
        default_port: "46464".to_string(),
        dns_seeds: vec![DnsSeed::new(DNS_SEED, true)],
        genesis_hash: BlockHash::from_hex(TESTNET_GENESIS)?,
        genesis_block: None,
        consensus: ConsensusParams::default(),
        spork_keys: Some(SporkKeys::from_hex(
            SPORK_KEY,
            SPORK_KEY,
            SPORK_ENFORCE_NEW_KEY,
            SPORK_REJECT_OLD_KEY,
        )?),
        zerocoin: ZerocoinHeights {
            last_accumulator_checkpoint: TESTNET_UPGRADE_HEIGHT,
            last_wrapped_serials: 0,
            start_invalid_utxos_check: TESTNET_UPGRADE_HEIGHT,
            start_invalid_serials: TESTNET_UPGRADE_HEIGHT,
            start_serial_range_check: 0,
            recalc_accumulators: TESTNET_UPGRADE_HEIGHT,
        },
        bad_block: Some(BadBlockBypass {
            time: 1489001494,
            bits: 0x1e0a_20bd,
        }),
        checkpoints: CheckpointList::from_hex(&[(0, TESTNET_GENESIS)])?,
        deployments: upgrade_schedule(TESTNET_UPGRADE_HEIGHT, TESTNET_ACTIVATION_BLOCK)?,
        address_prefixes: TESTNET_PREFIXES,
        hd_key_versions: TESTNET_HD_KEY_VERSIONS,
        hd_coin_type: HD_COIN_TYPE,
    };
    params.validate()?;
    Ok(params)
}

/// Get regtest parameters
///
/// Shares genesis, prefixes and key versions with testnet; every upgrade is
/// active from the first block and there are no checkpoints.
pub fn regtest() -> Result<ParameterSet> {
    let params = ParameterSet {
        name: NetworkType::Regtest.name().to_string(),
        net: NetworkMagic::REGTEST,
        default_port: "46466".to_string(),
        dns_seeds: Vec::new(),
        genesis_hash: BlockHash::from_hex(TESTNET_GENESIS)?,
        genesis_block: None,
        consensus: ConsensusParams::default(),
        spork_keys: None,
        zerocoin: ZerocoinHeights::default(),
        bad_block: None,
        checkpoints: CheckpointList::default(),
        deployments: upgrade_schedule_from_genesis(),
        address_prefixes: TESTNET_PREFIXES,
        hd_key_versions: TESTNET_HD_KEY_VERSIONS,
        hd_coin_type: HD_COIN_TYPE,
    };
    params.validate()?;
    Ok(params)
}

/// All built-in networks, in registration order
pub fn all() -> Result<Vec<ParameterSet>> {
    NetworkType::ALL.into_iter().map(NetworkType::parameter_set).collect()
}

/// Upgrades used by main and test: base rules from genesis, everything else
/// at a single height, v5.0 unscheduled.
fn upgrade_schedule(height: u32, activation_block: &str) -> Result<Deployments> {
    let at = ConsensusDeployment::at_height(height);
    let with_block = at.with_activation_block(activation_block)?;

    Ok(Deployments::new()
        .with(Upgrade::BaseNetwork, ConsensusDeployment::at_height(0))
        .with(Upgrade::TestDummy, ConsensusDeployment::at_height(0))
        .with(Upgrade::Pos, at)
        .with(Upgrade::PosV2, at)
        .with(Upgrade::Zc, with_block)
        .with(Upgrade::ZcV2, with_block)
        .with(Upgrade::Bip65, with_block)
        .with(Upgrade::ZcPublic, at)
        .with(Upgrade::V3_4, with_block)
        .with(Upgrade::V4_0, with_block))
}

fn upgrade_schedule_from_genesis() -> Deployments {
    Upgrade::ALL
        .into_iter()
        .filter(|u| !matches!(u, Upgrade::TestDummyDeployment | Upgrade::V5_0Dummy))
        .fold(Deployments::new(), |deployments, upgrade| {
            deployments.with(upgrade, ConsensusDeployment::at_height(0))
        })
}

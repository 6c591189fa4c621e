//! CLI for inspecting Euno network parameters
//!
//! Builds a registry with the built-in networks (aborting if a built-in
//! table is broken), optionally registers extra networks from a JSON file,
//! then answers one query.

use anyhow::Context;
use clap::{Parser, Subcommand};
use euno_params::{NetworkMagic, ParameterSet, Registry};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "params-inspect")]
#[command(about = "Euno network parameter inspector", long_about = None)]
struct Cli {
    /// JSON file with additional network definitions
    #[arg(short, long, global = true)]
    networks: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered networks
    List,

    /// Print one network's parameters as JSON
    Show {
        /// Network name or magic (e.g. "main" or "0xe9fdc490")
        network: String,
    },

    /// Classify an address prefix byte
    Prefix {
        /// Prefix byte, decimal or 0x-prefixed hex
        byte: String,
    },

    /// Resolve an HD private key version to its public version
    ResolveHd {
        /// 4-byte private version as hex (e.g. 3a805837)
        version: String,
    },

    /// Print a network's checkpoints
    Checkpoints {
        /// Network name or magic
        network: String,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let registry = Registry::with_builtin_networks().context("built-in network tables are inconsistent")?;
    if let Some(path) = &cli.networks {
        let added = registry
            .register_from_file(path)
            .with_context(|| format!("failed to register networks from {}", path.display()))?;
        info!("Registered {} custom network(s) from {}", added.len(), path.display());
    }
    debug!("{} networks registered", registry.len());

    match cli.command {
        Commands::List => list(&registry),
        Commands::Show { network } => {
            let params = find(&registry, &network)?;
            println!("{}", serde_json::to_string_pretty(params.as_ref())?);
        }
        Commands::Prefix { byte } => prefix(&registry, &byte)?,
        Commands::ResolveHd { version } => {
            let bytes = hex::decode(&version).with_context(|| format!("invalid hex {:?}", version))?;
            let public = registry.resolve_public_key_version(&bytes)?;
            println!("{}", public);
        }
        Commands::Checkpoints { network } => {
            let params = find(&registry, &network)?;
            for checkpoint in params.checkpoints.iter() {
                println!("{:>10}  {}", checkpoint.height, checkpoint.hash);
            }
        }
    }

    Ok(())
}

fn list(registry: &Registry) {
    for params in registry.networks() {
        println!(
            "{:<10} {}  port {:<6} pkh {:>3}  sh {:>3}  stake {:>3}",
            params.name,
            params.net,
            params.default_port,
            params.address_prefixes.pubkey_hash,
            params.address_prefixes.script_hash,
            params.address_prefixes.staking_key,
        );
    }
}

fn find(registry: &Registry, network: &str) -> anyhow::Result<Arc<ParameterSet>> {
    if let Some(params) = registry.by_name(network) {
        return Ok(params);
    }
    let magic: NetworkMagic = network.parse()?;
    Ok(registry.require(magic)?)
}

fn prefix(registry: &Registry, byte: &str) -> anyhow::Result<()> {
    let id = match byte.strip_prefix("0x") {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => byte.parse(),
    }
    .with_context(|| format!("invalid prefix byte {:?}", byte))?;

    let kinds: Vec<&str> = [
        ("pubkey-hash", registry.is_pubkey_hash_prefix(id)),
        ("script-hash", registry.is_script_hash_prefix(id)),
        ("staking-key", registry.is_staking_key_prefix(id)),
    ]
    .into_iter()
    .filter_map(|(kind, hit)| hit.then_some(kind))
    .collect();

    if kinds.is_empty() {
        println!("{}: not a registered prefix", id);
    } else {
        println!("{}: {}", id, kinds.join(", "));
    }
    Ok(())
}

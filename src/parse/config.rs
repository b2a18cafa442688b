use anyhow::{anyhow, Result as AnyResult};
use clap::Parser;
use std::{path::PathBuf, time::Duration};

use super::keypair::parse_keypair;
use crate::constants::*;
use solana_sdk::signer::keypair::Keypair;

#[derive(Debug, Parser)]
#[command(name = "metaboss-migrate")]
#[command(about = "Move the update authority of a cached NFT collection to its symbol's new authority")]
pub struct MigrateOpts {
    /// RPC endpoint, also used for the indexed token account lookups
    #[arg(long, env = "BACKEND_RPC")]
    pub rpc_url: String,

    /// Operator secret key, JSON byte array or base58
    #[arg(long, env = "DEV_KEYPAIR", hide_env_values = true)]
    pub keypair: String,

    /// Mint list checkpoint, written on the first run
    #[arg(long, default_value = DEFAULT_CACHE_FILE)]
    pub cache_file: PathBuf,

    /// Maximum number of items resolved at once
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Pause after every this many batches
    #[arg(long, default_value_t = DEFAULT_THROTTLE_EVERY)]
    pub throttle_every: usize,

    /// Length of the pause in milliseconds
    #[arg(long, default_value_t = DEFAULT_THROTTLE_PAUSE_MS)]
    pub throttle_pause_ms: u64,
}

impl MigrateOpts {
    pub fn operator(&self) -> AnyResult<Keypair> {
        parse_keypair(&self.keypair).map_err(|e| anyhow!("Invalid DEV_KEYPAIR: {}", e))
    }

    pub fn throttle(&self) -> Throttle {
        Throttle {
            every: self.throttle_every,
            pause: Duration::from_millis(self.throttle_pause_ms),
        }
    }
}

/// Crude submission rate limit: sleep `pause` on every `every`-th batch index.
#[derive(Clone, Copy, Debug)]
pub struct Throttle {
    pub every: usize,
    pub pause: Duration,
}

impl Default for Throttle {
    fn default() -> Self {
        Throttle {
            every: DEFAULT_THROTTLE_EVERY,
            pause: Duration::from_millis(DEFAULT_THROTTLE_PAUSE_MS),
        }
    }
}

impl Throttle {
    pub fn none() -> Self {
        Throttle {
            every: 0,
            pause: Duration::ZERO,
        }
    }

    pub fn applies_to(&self, batch_index: usize) -> bool {
        self.every > 0 && batch_index % self.every == 0
    }
}

use anyhow::Result as AnyResult;
use clap::Parser;
use log::{error, info};
use solana_sdk::{pubkey::Pubkey, signer::Signer};
use std::{process::ExitCode, str::FromStr, sync::Arc};

use metaboss_migrate::{
    client::RpcChainClient,
    commands::{migrate_update_authority, MigrateArgs},
    constants::RULE_SET,
    parse::config::MigrateOpts,
};

/// Exit status when some items were skipped or some batches failed.
const PARTIAL_FAILURE: u8 = 3;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("metaboss_migrate=info")),
        )
        .init();

    let opts = MigrateOpts::parse();

    match run(opts).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(PARTIAL_FAILURE),
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(opts: MigrateOpts) -> AnyResult<bool> {
    let keypair = Arc::new(opts.operator()?);
    info!("starting as {}", keypair.pubkey());

    let args = MigrateArgs {
        client: Arc::new(RpcChainClient::new(opts.rpc_url.clone())),
        keypair,
        cache_file: opts.cache_file.clone(),
        concurrency: opts.concurrency,
        throttle: opts.throttle(),
        rule_set: Pubkey::from_str(RULE_SET)?,
    };

    let report = migrate_update_authority(args).await?;
    info!("{}", serde_json::to_string(&report)?);

    Ok(report.is_clean())
}

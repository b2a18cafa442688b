use futures::future::join_all;
use std::path::PathBuf;
use tokio::sync::{mpsc, Semaphore};

use super::broadcast::broadcast;
use super::common::*;
use super::holder::find_holder;
use super::source::load_items;
use super::update::{set_update_authority, SetUpdateAuthorityArgs};
use crate::errors::MigrateError;
use crate::parse::{config::Throttle, parse_update_authority};

pub struct MigrateArgs<C: ?Sized> {
    pub client: Arc<C>,
    pub keypair: Arc<Keypair>,
    pub cache_file: PathBuf,
    pub concurrency: usize,
    pub throttle: Throttle,
    pub rule_set: Pubkey,
}

/// Checks the item's symbol and current authority, finds its holder and builds its
/// update instructions.
pub async fn resolve_item<C>(
    client: &C,
    item: &Item,
    operator: &Pubkey,
    rule_set: Pubkey,
) -> Result<InstructionSet, MigrateError>
where
    C: ChainClient + ?Sized,
{
    let new_authority = match parse_update_authority(&item.symbol) {
        Some(Ok(authority)) => authority,
        Some(Err(e)) => return Err(MigrateError::BuildFailed(item.mint.to_string(), e.to_string())),
        None => {
            return Err(MigrateError::UnknownSymbol(
                item.mint.to_string(),
                item.symbol.clone(),
            ))
        }
    };

    // Already migrated, or never ours to move.
    if item.update_authority != *operator {
        return Err(MigrateError::NotUpdateAuthority(
            item.mint.to_string(),
            item.update_authority.to_string(),
        ));
    }

    let holder = find_holder(client, &item.mint).await?;

    set_update_authority(&SetUpdateAuthorityArgs {
        item,
        authority: *operator,
        payer: *operator,
        new_authority,
        rule_set,
        holder,
    })
}

/// Resolves every item with at most `concurrency` lookups in flight. Instruction sets
/// come back in completion order; skipped items are logged and returned separately.
pub async fn resolve_all<C>(
    client: Arc<C>,
    items: Vec<Item>,
    operator: Pubkey,
    rule_set: Pubkey,
    concurrency: usize,
) -> (Vec<InstructionSet>, Vec<MigrateError>)
where
    C: ChainClient + ?Sized + 'static,
{
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut resolve_tasks = Vec::new();

    for item in items {
        let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
            break;
        };
        let client = client.clone();
        let tx = tx.clone();

        resolve_tasks.push(tokio::spawn(async move {
            let _permit = permit;

            let result = resolve_item(client.as_ref(), &item, &operator, rule_set).await;
            // The receiver is held until every task has finished.
            let _ = tx.send(result);
        }));
    }
    drop(tx);

    let mut instruction_sets = Vec::new();
    let mut skipped = Vec::new();
    while let Some(result) = rx.recv().await {
        match result {
            Ok(set) => instruction_sets.push(set),
            Err(e) => {
                warn!("Skipping {}: {}", e.mint(), e);
                skipped.push(e);
            }
        }
    }

    for task in join_all(resolve_tasks).await {
        if let Err(e) = task {
            error!("Resolution task failed: {}", e);
        }
    }

    (instruction_sets, skipped)
}

pub async fn migrate_update_authority<C>(args: MigrateArgs<C>) -> AnyResult<MigrationReport>
where
    C: ChainClient + ?Sized + 'static,
{
    let operator = args.keypair.pubkey();
    let items = load_items(args.client.as_ref(), &args.cache_file, &operator).await?;

    let mut report = MigrationReport {
        items: items.len(),
        ..Default::default()
    };
    if items.is_empty() {
        warn!("No items to migrate");
        return Ok(report);
    }

    let (instruction_sets, _skipped) = resolve_all(
        args.client.clone(),
        items,
        operator,
        args.rule_set,
        args.concurrency,
    )
    .await;
    report.resolved = instruction_sets.len();
    report.skipped = report.items - report.resolved;
    info!(
        "Resolved {} of {} items, {} skipped",
        report.resolved, report.items, report.skipped
    );

    let summary = broadcast(args.client, &args.keypair, &instruction_sets, args.throttle).await;
    report.batches = summary.batches;
    report.submitted = summary.submitted;
    report.failed = summary.failed;

    Ok(report)
}

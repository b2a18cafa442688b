use futures::future::join_all;
use solana_sdk::hash::Hash;
use tokio::{task::JoinHandle, time::sleep};

use super::common::*;
use crate::errors::BroadcastError;
use crate::parse::config::Throttle;

/// One transaction carrying up to two instruction sets.
#[derive(Debug)]
pub struct TransactionBatch {
    pub index: usize,
    pub mints: Vec<Pubkey>,
    pub transaction: Transaction,
}

impl TransactionBatch {
    pub fn build(index: usize, sets: &[InstructionSet], payer: &Pubkey) -> Self {
        let instructions: Vec<Instruction> = sets
            .iter()
            .flat_map(|set| set.instructions.iter().cloned())
            .collect();

        TransactionBatch {
            index,
            mints: sets.iter().map(|set| set.mint).collect(),
            transaction: Transaction::new_with_payer(&instructions, Some(payer)),
        }
    }

    pub fn sign(&mut self, keypair: &Keypair, recent_blockhash: Hash) -> Result<(), BroadcastError> {
        self.transaction
            .try_sign(&[keypair], recent_blockhash)
            .map_err(|e| BroadcastError::SignFailed(self.index, e.to_string()))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BroadcastSummary {
    pub batches: usize,
    pub submitted: usize,
    pub failed: usize,
}

/// Groups instruction sets into transaction-sized batches, keeping their order.
pub fn pack_batches(sets: &[InstructionSet]) -> Vec<&[InstructionSet]> {
    sets.chunks(INSTRUCTION_SETS_PER_TRANSACTION).collect()
}

async fn prepare_batch<C>(
    client: &C,
    keypair: &Keypair,
    index: usize,
    sets: &[InstructionSet],
) -> Result<TransactionBatch, BroadcastError>
where
    C: ChainClient + ?Sized,
{
    let mut batch = TransactionBatch::build(index, sets, &keypair.pubkey());
    let recent_blockhash = client
        .latest_blockhash()
        .await
        .map_err(|e| BroadcastError::BlockhashFailed(index, e.to_string()))?;
    batch.sign(keypair, recent_blockhash)?;
    Ok(batch)
}

/// Signs and submits every batch in order without waiting for confirmation.
///
/// Each submission runs as its own task; their results are collected and logged once
/// the last batch has gone out. Failed batches are not retried.
pub async fn broadcast<C>(
    client: Arc<C>,
    keypair: &Keypair,
    sets: &[InstructionSet],
    throttle: Throttle,
) -> BroadcastSummary
where
    C: ChainClient + ?Sized + 'static,
{
    let batches = pack_batches(sets);
    let mut summary = BroadcastSummary {
        batches: batches.len(),
        ..Default::default()
    };
    let mut send_tasks: Vec<JoinHandle<Result<Signature, BroadcastError>>> = Vec::new();

    for (index, batch_sets) in batches.into_iter().enumerate() {
        match prepare_batch(client.as_ref(), keypair, index, batch_sets).await {
            Ok(batch) => {
                let client = client.clone();
                send_tasks.push(tokio::spawn(async move {
                    client
                        .send_transaction(&batch.transaction)
                        .await
                        .map_err(|e| BroadcastError::SubmitFailed(batch.index, e.to_string()))
                }));
            }
            Err(e) => {
                error!("{}", e);
                summary.failed += 1;
            }
        }

        if throttle.applies_to(index) {
            info!("sent {} transactions", index);
            sleep(throttle.pause).await;
        }
    }

    for result in join_all(send_tasks).await {
        match result {
            Ok(Ok(sig)) => {
                debug!("Submitted {}", sig);
                summary.submitted += 1;
            }
            Ok(Err(e)) => {
                error!("{}", e);
                summary.failed += 1;
            }
            Err(e) => {
                error!("Submission task failed: {}", e);
                summary.failed += 1;
            }
        }
    }

    info!(
        "Submitted {} of {} transactions, {} failed",
        summary.submitted, summary.batches, summary.failed
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set() -> InstructionSet {
        let mint = Pubkey::new_unique();
        InstructionSet {
            mint,
            instructions: vec![Instruction::new_with_bytes(
                TOKEN_METADATA_PROGRAM_ID,
                &[1],
                vec![AccountMeta::new(mint, false)],
            )],
        }
    }

    #[test]
    fn packs_two_sets_per_batch_in_order() {
        let sets: Vec<InstructionSet> = (0..5).map(|_| set()).collect();
        let batches = pack_batches(&sets);

        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].len(), 2);
        assert_eq!(batches[2].len(), 1);

        let flattened: Vec<Pubkey> = batches.iter().flat_map(|b| b.iter().map(|s| s.mint)).collect();
        let original: Vec<Pubkey> = sets.iter().map(|s| s.mint).collect();
        assert_eq!(flattened, original);
    }

    #[test]
    fn no_sets_no_batches() {
        assert!(pack_batches(&[]).is_empty());
    }

    #[test]
    fn batch_is_paid_and_signed_by_operator() {
        let keypair = Keypair::new();
        let sets = vec![set(), set()];

        let mut batch = TransactionBatch::build(0, &sets, &keypair.pubkey());
        assert_eq!(batch.mints, vec![sets[0].mint, sets[1].mint]);
        assert_eq!(batch.transaction.message.instructions.len(), 2);
        assert_eq!(batch.transaction.message.account_keys[0], keypair.pubkey());
        assert!(!batch.transaction.is_signed());

        batch.sign(&keypair, Hash::new_unique()).unwrap();
        assert!(batch.transaction.is_signed());
    }
}

#![allow(dead_code)]

use anyhow::{anyhow, Result as AnyResult};
use async_trait::async_trait;
use metaboss_migrate::{
    client::ChainClient,
    data::{GpaAccount, GpaResult, IndexedLookup, Item},
    derive::{derive_edition_pda, derive_metadata_pda},
};
use mpl_token_metadata::state::TokenStandard;
use serde_json::json;
use solana_sdk::{
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    signer::{
        keypair::{keypair_from_seed, Keypair},
        Signer,
    },
    transaction::Transaction,
};
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

/// The operator every test item is currently under.
pub fn operator() -> Keypair {
    keypair_from_seed(&[7u8; 32]).unwrap()
}

pub fn item(symbol: &str, token_standard: TokenStandard) -> Item {
    let mint = Pubkey::new_unique();
    Item {
        mint,
        metadata: derive_metadata_pda(&mint),
        edition: derive_edition_pda(&mint),
        symbol: symbol.to_string(),
        token_standard: Some(token_standard),
        update_authority: operator().pubkey(),
    }
}

/// How the mock answers the indexed token account query for a mint.
#[derive(Clone, Debug)]
pub enum Indexed {
    NoResult,
    Fails,
    Balances(Vec<(Pubkey, f64)>),
}

#[derive(Default)]
pub struct MockChain {
    pub items: Vec<Item>,
    pub indexed: HashMap<Pubkey, Indexed>,
    pub node: HashMap<Pubkey, Vec<Pubkey>>,
    pub fail_sends: bool,

    pub authority_queries: AtomicUsize,
    pub mint_queries: Mutex<Vec<Vec<Pubkey>>>,
    pub node_queries: AtomicUsize,
    pub sent: Mutex<Vec<Transaction>>,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl MockChain {
    pub fn new(items: Vec<Item>) -> Self {
        MockChain {
            items,
            ..Default::default()
        }
    }

    /// Gives every item a holder that the indexed endpoint reports with a balance of one.
    pub fn with_indexed_holders(mut self) -> Self {
        for item in &self.items {
            let holder = Pubkey::new_unique();
            self.indexed.insert(
                item.mint,
                Indexed::Balances(vec![(Pubkey::new_unique(), 0.0), (holder, 1.0)]),
            );
        }
        self
    }

    pub fn holder_of(&self, mint: &Pubkey) -> Option<Pubkey> {
        match self.indexed.get(mint) {
            Some(Indexed::Balances(balances)) => balances
                .iter()
                .find(|(_, amount)| *amount == 1.0)
                .map(|(pubkey, _)| *pubkey),
            _ => self.node.get(mint).and_then(|accounts| accounts.first().copied()),
        }
    }

    pub fn sent(&self) -> Vec<Transaction> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainClient for MockChain {
    async fn items_by_update_authority(&self, _update_authority: &Pubkey) -> AnyResult<Vec<Item>> {
        self.authority_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.items.clone())
    }

    async fn items_by_mints(&self, mints: &[Pubkey]) -> AnyResult<Vec<Item>> {
        self.mint_queries.lock().unwrap().push(mints.to_vec());
        Ok(mints
            .iter()
            .filter_map(|mint| self.items.iter().find(|item| item.mint == *mint).cloned())
            .collect())
    }

    async fn indexed_token_accounts(&self, mint: &Pubkey) -> AnyResult<IndexedLookup> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.indexed.get(mint).cloned().unwrap_or(Indexed::NoResult) {
            Indexed::NoResult => Ok(IndexedLookup::NoResult),
            Indexed::Fails => Err(anyhow!("connection refused")),
            Indexed::Balances(balances) => Ok(IndexedLookup::Accounts(
                balances
                    .into_iter()
                    .map(|(pubkey, amount)| GpaResult {
                        pubkey: pubkey.to_string(),
                        account: GpaAccount {
                            data: json!({
                                "parsed": { "info": { "tokenAmount": { "uiAmount": amount } } }
                            }),
                        },
                    })
                    .collect(),
            )),
        }
    }

    async fn node_token_accounts(&self, mint: &Pubkey) -> AnyResult<Vec<Pubkey>> {
        self.node_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.node.get(mint).cloned().unwrap_or_default())
    }

    async fn latest_blockhash(&self) -> AnyResult<Hash> {
        Ok(Hash::new_unique())
    }

    async fn send_transaction(&self, transaction: &Transaction) -> AnyResult<Signature> {
        if self.fail_sends {
            return Err(anyhow!("blockhash not found"));
        }
        self.sent.lock().unwrap().push(transaction.clone());
        Ok(transaction.signatures[0])
    }
}

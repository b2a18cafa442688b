use anyhow::{anyhow, Result as AnyResult};
use async_trait::async_trait;
use log::error;
use mpl_token_metadata::state::{Metadata, TokenMetadataAccount};
use serde_json::json;
use solana_account_decoder::{UiAccountEncoding, UiDataSliceConfig};
use solana_client::{
    nonblocking::rpc_client::RpcClient,
    rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig},
    rpc_filter::{Memcmp, MemcmpEncodedBytes, RpcFilterType},
};
use solana_sdk::{
    account::Account, commitment_config::CommitmentConfig, hash::Hash, pubkey::Pubkey,
    signature::Signature, transaction::Transaction,
};

use crate::constants::*;
use crate::data::{GpaResult, IndexedLookup, Item, RpcResponse};
use crate::derive::derive_metadata_pda;

/// Everything the migration needs from the chain.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Items whose metadata names `update_authority` as its update authority.
    async fn items_by_update_authority(&self, update_authority: &Pubkey) -> AnyResult<Vec<Item>>;

    /// Items for exactly the given mints. Mints without decodable metadata are dropped.
    async fn items_by_mints(&self, mints: &[Pubkey]) -> AnyResult<Vec<Item>>;

    /// Token accounts for `mint` from the indexed `getProgramAccounts` endpoint, parsed.
    async fn indexed_token_accounts(&self, mint: &Pubkey) -> AnyResult<IndexedLookup>;

    /// Token account addresses for `mint` straight from the node.
    async fn node_token_accounts(&self, mint: &Pubkey) -> AnyResult<Vec<Pubkey>>;

    async fn latest_blockhash(&self) -> AnyResult<Hash>;

    async fn send_transaction(&self, transaction: &Transaction) -> AnyResult<Signature>;
}

pub struct RpcChainClient {
    client: RpcClient,
    http: reqwest::Client,
    rpc_url: String,
}

impl RpcChainClient {
    pub fn new(rpc_url: String) -> Self {
        let client = RpcClient::new_with_commitment(rpc_url.clone(), CommitmentConfig::processed());
        RpcChainClient {
            client,
            http: reqwest::Client::new(),
            rpc_url,
        }
    }
}

fn token_account_filters(mint: &Pubkey) -> Vec<RpcFilterType> {
    #[allow(deprecated)]
    let mint_filter = RpcFilterType::Memcmp(Memcmp {
        offset: TOKEN_ACCOUNT_MINT_OFFSET,
        bytes: MemcmpEncodedBytes::Base58(mint.to_string()),
        encoding: None,
    });
    vec![RpcFilterType::DataSize(TOKEN_ACCOUNT_SIZE), mint_filter]
}

fn decode_items(accounts: Vec<(Pubkey, Account)>) -> Vec<Item> {
    let mut items = Vec::new();

    for (pubkey, account) in accounts {
        let metadata = match Metadata::safe_deserialize(&account.data) {
            Ok(metadata) => metadata,
            Err(_) => {
                error!("Failed to parse metadata for account {}", pubkey);
                continue;
            }
        };
        items.push(Item::from_metadata(pubkey, &metadata));
    }

    items
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn items_by_update_authority(&self, update_authority: &Pubkey) -> AnyResult<Vec<Item>> {
        #[allow(deprecated)]
        let filter = RpcFilterType::Memcmp(Memcmp {
            offset: METADATA_UPDATE_AUTHORITY_OFFSET,
            bytes: MemcmpEncodedBytes::Base58(update_authority.to_string()),
            encoding: None,
        });
        let config = RpcProgramAccountsConfig {
            filters: Some(vec![filter]),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                data_slice: None,
                commitment: Some(CommitmentConfig::processed()),
                min_context_slot: None,
            },
            with_context: None,
        };

        let accounts = self
            .client
            .get_program_accounts_with_config(&TOKEN_METADATA_PROGRAM_ID, config)
            .await?;

        Ok(decode_items(accounts))
    }

    async fn items_by_mints(&self, mints: &[Pubkey]) -> AnyResult<Vec<Item>> {
        let mut accounts = Vec::new();

        for chunk in mints.chunks(MAX_MULTIPLE_ACCOUNTS) {
            let metadata_pubkeys: Vec<Pubkey> = chunk.iter().map(derive_metadata_pda).collect();
            let results = self.client.get_multiple_accounts(&metadata_pubkeys).await?;

            for ((mint, metadata_pubkey), account) in
                chunk.iter().zip(metadata_pubkeys).zip(results)
            {
                match account {
                    Some(account) => accounts.push((metadata_pubkey, account)),
                    None => error!("No metadata account for mint {}", mint),
                }
            }
        }

        Ok(decode_items(accounts))
    }

    async fn indexed_token_accounts(&self, mint: &Pubkey) -> AnyResult<IndexedLookup> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getProgramAccounts",
            "params": [
                TOKEN_PROGRAM_ID.to_string(),
                {
                    "encoding": "jsonParsed",
                    "filters": [
                        { "dataSize": TOKEN_ACCOUNT_SIZE },
                        {
                            "memcmp": {
                                "offset": TOKEN_ACCOUNT_MINT_OFFSET,
                                "bytes": mint.to_string(),
                            }
                        }
                    ]
                }
            ]
        });

        let response: RpcResponse<Vec<GpaResult>> = self
            .http
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        match response.result {
            Some(accounts) => Ok(IndexedLookup::Accounts(accounts)),
            None => {
                if let Some(err) = response.error {
                    log::debug!("Indexed lookup for {} returned error: {}", mint, err);
                }
                Ok(IndexedLookup::NoResult)
            }
        }
    }

    async fn node_token_accounts(&self, mint: &Pubkey) -> AnyResult<Vec<Pubkey>> {
        let config = RpcProgramAccountsConfig {
            filters: Some(token_account_filters(mint)),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                data_slice: Some(UiDataSliceConfig {
                    offset: 0,
                    length: 0,
                }),
                commitment: Some(CommitmentConfig::processed()),
                min_context_slot: None,
            },
            with_context: None,
        };

        let accounts = self
            .client
            .get_program_accounts_with_config(&TOKEN_PROGRAM_ID, config)
            .await?;

        Ok(accounts.into_iter().map(|(pubkey, _)| pubkey).collect())
    }

    async fn latest_blockhash(&self) -> AnyResult<Hash> {
        let (blockhash, _) = self
            .client
            .get_latest_blockhash_with_commitment(CommitmentConfig::processed())
            .await
            .map_err(|e| anyhow!("Failed to get latest blockhash: {}", e))?;
        Ok(blockhash)
    }

    async fn send_transaction(&self, transaction: &Transaction) -> AnyResult<Signature> {
        let sig = self.client.send_transaction(transaction).await?;
        Ok(sig)
    }
}

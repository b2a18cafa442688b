use mpl_token_metadata::state::{Metadata, TokenStandard};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey};

use crate::derive::derive_edition_pda;

/// An NFT selected for migration, decoded from its metadata account.
#[derive(Clone, Debug)]
pub struct Item {
    pub mint: Pubkey,
    pub metadata: Pubkey,
    pub edition: Pubkey,
    pub symbol: String,
    pub token_standard: Option<TokenStandard>,
    pub update_authority: Pubkey,
}

impl Item {
    pub fn from_metadata(metadata_pubkey: Pubkey, metadata: &Metadata) -> Self {
        Item {
            mint: metadata.mint,
            metadata: metadata_pubkey,
            edition: derive_edition_pda(&metadata.mint),
            symbol: clean_symbol(&metadata.data.symbol),
            token_standard: metadata.token_standard.clone(),
            update_authority: metadata.update_authority,
        }
    }

    /// Programmable NFTs carry a rule set that every metadata update must satisfy.
    pub fn is_programmable(&self) -> bool {
        matches!(
            self.token_standard,
            Some(TokenStandard::ProgrammableNonFungible)
        )
    }
}

/// On-chain strings are padded with null bytes up to their maximum length.
pub fn clean_symbol(raw: &str) -> String {
    raw.trim_matches(char::from(0)).trim().to_string()
}

/// The instructions moving one item to its new update authority.
#[derive(Clone, Debug)]
pub struct InstructionSet {
    pub mint: Pubkey,
    pub instructions: Vec<Instruction>,
}

#[derive(Debug, Deserialize)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct GpaResult {
    pub pubkey: String,
    pub account: GpaAccount,
}

#[derive(Debug, Deserialize)]
pub struct GpaAccount {
    pub data: Value,
}

/// Outcome of a token account query against the indexed endpoint.
#[derive(Debug)]
pub enum IndexedLookup {
    /// The endpoint answered with no result; the node should be asked instead.
    NoResult,
    Accounts(Vec<GpaResult>),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    pub items: usize,
    pub resolved: usize,
    pub skipped: usize,
    pub batches: usize,
    pub submitted: usize,
    pub failed: usize,
}

impl MigrationReport {
    pub fn is_clean(&self) -> bool {
        self.skipped == 0 && self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_null_padding_from_symbol() {
        assert_eq!(clean_symbol("YC\0\0\0\0\0\0\0\0"), "YC");
        assert_eq!(clean_symbol("KK"), "KK");
        assert_eq!(clean_symbol("\0\0"), "");
    }

    #[test]
    fn only_programmable_standard_is_rule_set_enforced() {
        let mut item = Item {
            mint: Pubkey::new_unique(),
            metadata: Pubkey::new_unique(),
            edition: Pubkey::new_unique(),
            symbol: "KK".to_string(),
            token_standard: Some(TokenStandard::ProgrammableNonFungible),
            update_authority: Pubkey::new_unique(),
        };
        assert!(item.is_programmable());

        item.token_standard = Some(TokenStandard::NonFungible);
        assert!(!item.is_programmable());

        item.token_standard = None;
        assert!(!item.is_programmable());
    }

    #[test]
    fn indexed_response_without_result_parses() {
        let body = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32010,"message":"excluded"}}"#;
        let response: RpcResponse<Vec<GpaResult>> = serde_json::from_str(body).unwrap();

        assert!(response.result.is_none());
        assert!(response.error.is_some());
    }
}

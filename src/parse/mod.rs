use anyhow::{anyhow, Result};
use log::error;
use serde_json::Value;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

use crate::constants::UPDATE_AUTHORITIES;

pub mod config;
pub mod keypair;

/// Turns cached mint strings into pubkeys, dropping entries that don't parse.
pub fn parse_mint_list(mints: &[String]) -> Vec<Pubkey> {
    mints
        .iter()
        .filter_map(|mint| match Pubkey::from_str(mint) {
            Ok(pubkey) => Some(pubkey),
            Err(_) => {
                error!("Invalid mint address {} in cache", mint);
                None
            }
        })
        .collect()
}

/// Reads `info.tokenAmount.uiAmount` out of a `jsonParsed` token account.
pub fn parse_ui_amount(data: &Value) -> Result<f64> {
    let amount = data
        .get("parsed")
        .ok_or_else(|| anyhow!("Invalid data account!"))?
        .get("info")
        .ok_or_else(|| anyhow!("Invalid data account!"))?
        .get("tokenAmount")
        .ok_or_else(|| anyhow!("Invalid token amount!"))?
        .get("uiAmount")
        .ok_or_else(|| anyhow!("Invalid token amount!"))?
        .as_f64()
        .ok_or_else(|| anyhow!("Invalid token amount!"))?;
    Ok(amount)
}

pub fn parse_update_authority(symbol: &str) -> Option<Result<Pubkey>> {
    UPDATE_AUTHORITIES.get(symbol).map(|authority| {
        Pubkey::from_str(authority)
            .map_err(|_| anyhow!(format!("Invalid update authority: {:?}!", authority)))
    })
}

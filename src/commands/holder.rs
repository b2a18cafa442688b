use super::common::*;
use crate::data::GpaResult;
use crate::errors::MigrateError;
use crate::parse::parse_ui_amount;

/// Finds the token account currently holding the single unit of `mint`.
///
/// The indexed endpoint is asked first and the account with a balance of exactly one
/// wins. Only when it has no answer at all is the node queried, in which case the
/// first account returned is taken.
pub async fn find_holder<C>(client: &C, mint: &Pubkey) -> Result<Pubkey, MigrateError>
where
    C: ChainClient + ?Sized,
{
    match client.indexed_token_accounts(mint).await {
        Ok(IndexedLookup::Accounts(accounts)) => {
            return current_holder(&accounts).ok_or_else(|| MigrateError::NoHolder(mint.to_string()))
        }
        Ok(IndexedLookup::NoResult) => {
            debug!("Indexed lookup empty for {}, asking node", mint);
        }
        Err(e) => {
            warn!("Indexed lookup failed for {}: {}, asking node", mint, e);
        }
    }

    let accounts = client
        .node_token_accounts(mint)
        .await
        .map_err(|e| MigrateError::LookupFailed(mint.to_string(), e.to_string()))?;

    accounts
        .first()
        .copied()
        .ok_or_else(|| MigrateError::NoHolder(mint.to_string()))
}

fn current_holder(accounts: &[GpaResult]) -> Option<Pubkey> {
    for account in accounts {
        let amount = match parse_ui_amount(&account.account.data) {
            Ok(amount) => amount,
            Err(err) => {
                debug!("Account {} has no amount: {}", account.pubkey, err);
                continue;
            }
        };

        if amount == 1.0 {
            match Pubkey::from_str(&account.pubkey) {
                Ok(pubkey) => return Some(pubkey),
                Err(_) => {
                    error!("Invalid token account address {}", account.pubkey);
                    continue;
                }
            }
        }
    }
    None
}

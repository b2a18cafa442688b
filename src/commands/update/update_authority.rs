use mpl_token_metadata::instruction::{
    builders::UpdateBuilder, InstructionBuilder, RuleSetToggle, UpdateArgs,
};

use super::common::*;
use crate::errors::MigrateError;

/// Index of the token account in the `Update` instruction's account list.
pub const TOKEN_ACCOUNT_INDEX: usize = 2;

pub struct SetUpdateAuthorityArgs<'a> {
    pub item: &'a Item,
    pub authority: Pubkey,
    pub payer: Pubkey,
    pub new_authority: Pubkey,
    pub rule_set: Pubkey,
    pub holder: Pubkey,
}

/// Builds the instructions handing `item` over to `new_authority`.
pub fn set_update_authority(args: &SetUpdateAuthorityArgs) -> Result<InstructionSet, MigrateError> {
    let item = args.item;
    let rule_set = item.is_programmable().then_some(args.rule_set);

    let ix = update_ix(args, rule_set)
        .map_err(|e| MigrateError::BuildFailed(item.mint.to_string(), e.to_string()))?;
    let instructions = with_holder_token_account(vec![ix], item, &args.holder);

    Ok(InstructionSet {
        mint: item.mint,
        instructions,
    })
}

fn update_args(new_authority: Pubkey, rule_set: Option<Pubkey>) -> UpdateArgs {
    let mut update_args = UpdateArgs::default();
    if let UpdateArgs::V1 {
        new_update_authority,
        rule_set: rule_set_toggle,
        ..
    } = &mut update_args
    {
        *new_update_authority = Some(new_authority);
        if let Some(rule_set) = rule_set {
            *rule_set_toggle = RuleSetToggle::Set(rule_set);
        }
    }
    update_args
}

fn update_ix(args: &SetUpdateAuthorityArgs, rule_set: Option<Pubkey>) -> AnyResult<Instruction> {
    let mut builder = UpdateBuilder::new();
    builder
        .authority(args.authority)
        .mint(args.item.mint)
        .metadata(args.item.metadata)
        .edition(args.item.edition)
        .payer(args.payer);
    if let Some(rule_set) = rule_set {
        builder.authorization_rules(rule_set);
    }

    let update = builder
        .build(update_args(args.new_authority, rule_set))
        .map_err(|e| anyhow!(e.to_string()))?;
    Ok(update.instruction())
}

/// The builder leaves a placeholder in the token slot. Rule set validation reads the
/// holder's token account, so programmable items get it swapped in on their first
/// instruction. Other items pass through untouched.
pub fn with_holder_token_account(
    mut instructions: Vec<Instruction>,
    item: &Item,
    holder: &Pubkey,
) -> Vec<Instruction> {
    if !item.is_programmable() {
        return instructions;
    }

    if let Some(slot) = instructions
        .first_mut()
        .and_then(|ix| ix.accounts.get_mut(TOKEN_ACCOUNT_INDEX))
    {
        *slot = AccountMeta::new_readonly(*holder, false);
    }
    instructions
}

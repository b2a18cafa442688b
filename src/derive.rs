use solana_sdk::pubkey::Pubkey;

use crate::constants::{EDITION_PREFIX, METADATA_PREFIX, TOKEN_METADATA_PROGRAM_ID};

pub fn derive_metadata_pda(mint: &Pubkey) -> Pubkey {
    let seeds = &[
        METADATA_PREFIX.as_bytes(),
        TOKEN_METADATA_PROGRAM_ID.as_ref(),
        mint.as_ref(),
    ];
    let (pda, _) = Pubkey::find_program_address(seeds, &TOKEN_METADATA_PROGRAM_ID);
    pda
}

pub fn derive_edition_pda(mint: &Pubkey) -> Pubkey {
    let seeds = &[
        METADATA_PREFIX.as_bytes(),
        TOKEN_METADATA_PROGRAM_ID.as_ref(),
        mint.as_ref(),
        EDITION_PREFIX.as_bytes(),
    ];
    let (pda, _) = Pubkey::find_program_address(seeds, &TOKEN_METADATA_PROGRAM_ID);
    pda
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_and_edition_pdas_differ() {
        let mint = Pubkey::new_unique();
        let metadata = derive_metadata_pda(&mint);
        let edition = derive_edition_pda(&mint);

        assert_ne!(metadata, edition);
        assert_eq!(metadata, derive_metadata_pda(&mint));
        assert!(!metadata.is_on_curve());
    }
}

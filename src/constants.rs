use phf::phf_map;

pub use mpl_token_metadata::ID as TOKEN_METADATA_PROGRAM_ID;
pub use spl_token::ID as TOKEN_PROGRAM_ID;

pub const METADATA_PREFIX: &str = "metadata";
pub const EDITION_PREFIX: &str = "edition";

pub const RULE_SET: &str = "eBJLFYPxJmMGKuFwpDWkzxZeUrad92kZRC5BJLpzyT9";

/// Size of an SPL token account.
pub const TOKEN_ACCOUNT_SIZE: u64 = 165;
/// The mint sits at the start of an SPL token account.
pub const TOKEN_ACCOUNT_MINT_OFFSET: usize = 0;
/// Update authority follows the one byte account key in a metadata account.
pub const METADATA_UPDATE_AUTHORITY_OFFSET: usize = 1;

pub const MAX_MULTIPLE_ACCOUNTS: usize = 100;
pub const INSTRUCTION_SETS_PER_TRANSACTION: usize = 2;

pub const DEFAULT_CACHE_FILE: &str = "traitNfts.json";
pub const DEFAULT_CONCURRENCY: usize = 20;
pub const DEFAULT_THROTTLE_EVERY: usize = 10;
pub const DEFAULT_THROTTLE_PAUSE_MS: u64 = 5000;

/// New update authority for each collection symbol.
pub static UPDATE_AUTHORITIES: phf::Map<&'static str, &'static str> = phf_map! {
    "YC" => "6x7rUQwSH7R36kJHAR8kL9sD7ts3FXC6xbvmoCnnmwbN",
    "KK" => "BhJr628K8R1sDLj2fSmwXNiUnHEVuMErQT14b4zhMUFA",
};

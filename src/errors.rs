use thiserror::Error;

/// Reasons a single item drops out of the migration. None of these abort the run.
#[derive(Error, Debug)]
pub enum MigrateError {
    #[error("Unknown symbol {1:?} for mint {0}")]
    UnknownSymbol(String, String),

    #[error("Mint {0} is under update authority {1}, not the operator")]
    NotUpdateAuthority(String, String),

    #[error("No token account holds mint {0}")]
    NoHolder(String),

    #[error("Holder lookup failed for {0}: {1}")]
    LookupFailed(String, String),

    #[error("Failed to build update for {0}: {1}")]
    BuildFailed(String, String),
}

impl MigrateError {
    pub fn mint(&self) -> &str {
        match self {
            MigrateError::UnknownSymbol(mint, _)
            | MigrateError::NotUpdateAuthority(mint, _)
            | MigrateError::NoHolder(mint)
            | MigrateError::LookupFailed(mint, _)
            | MigrateError::BuildFailed(mint, _) => mint,
        }
    }
}

#[derive(Error, Debug)]
pub enum BroadcastError {
    #[error("Batch {0} failed to fetch blockhash: {1}")]
    BlockhashFailed(usize, String),

    #[error("Batch {0} failed to sign: {1}")]
    SignFailed(usize, String),

    #[error("Batch {0} failed to submit: {1}")]
    SubmitFailed(usize, String),
}

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to read cache file {0}: {1}")]
    ReadFailed(String, std::io::Error),

    #[error("Failed to parse cache file {0}: {1}")]
    ParseFailed(String, serde_json::Error),

    #[error("Failed to write cache file {0}: {1}")]
    WriteFailed(String, String),
}

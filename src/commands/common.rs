pub use anyhow::{anyhow, Result as AnyResult};
pub use indexmap::IndexSet;
pub use log::{debug, error, info, warn};
pub use serde::{Deserialize, Serialize};
pub use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    signature::Signature,
    signer::{keypair::Keypair, Signer},
    transaction::Transaction,
};
pub use std::{
    fs::File,
    io::{BufReader, ErrorKind, Write},
    ops::{Deref, DerefMut},
    path::Path,
    str::FromStr,
    sync::Arc,
};

pub use crate::client::ChainClient;
pub use crate::constants::*;
pub use crate::data::{IndexedLookup, InstructionSet, Item, MigrationReport};

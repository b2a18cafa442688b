use super::common;

pub mod update_authority;
pub use update_authority::*;

mod common;

pub mod broadcast;
pub mod holder;
pub mod migrate;
pub mod source;
pub mod update;

pub use broadcast::*;
pub use holder::*;
pub use migrate::*;
pub use source::*;
pub use update::*;

pub mod client;
pub mod commands;
pub mod constants;
pub mod data;
pub mod derive;
pub mod errors;
pub mod parse;

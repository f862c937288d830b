pub mod cli;
pub mod config;

pub use cli::{Cli, Commands, FetchCommands, PushCsvCommands};
pub use config::OdreConfig;

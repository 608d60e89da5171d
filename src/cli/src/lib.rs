//! Command line node for the denomination factory.

pub mod app;
pub mod commands;
pub mod config;
pub mod errors;

// Re-export commonly used types and functions
pub use app::{App, AppGenesis, AppKeeper, GenesisBalance};
pub use commands::{fund, genesis, query, tx};
pub use config::CliConfig;
pub use errors::CliError;

//! Error types for the factory node.

use factory_core::FactoryError;
use std::error::Error as StdError;
use std::fmt;

/// Errors that can occur while running a command.
#[derive(Debug)]
pub enum CliError {
    /// Error when a file operation fails.
    FileError(std::io::Error),

    /// Error when JSON serialization or deserialization fails.
    JsonError(serde_json::Error),

    /// Error reported by the registry, ledger or store.
    FactoryError(FactoryError),

    /// Error when a command line argument cannot be used.
    InvalidArgument(String),

    /// Error when the genesis file is inconsistent.
    GenesisError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileError(e) => write!(f, "File error: {}", e),
            CliError::JsonError(e) => write!(f, "JSON error: {}", e),
            CliError::FactoryError(e) => write!(f, "{}", e),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::GenesisError(msg) => write!(f, "Genesis error: {}", msg),
        }
    }
}

impl StdError for CliError {}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::FileError(error)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        CliError::JsonError(error)
    }
}

impl From<FactoryError> for CliError {
    fn from(error: FactoryError) -> Self {
        CliError::FactoryError(error)
    }
}

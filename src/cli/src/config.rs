//! Configuration for the factory node.

use crate::errors::CliError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Environment variable overriding the default data directory.
pub const DATA_DIR_ENV: &str = "FACTORYD_HOME";

/// Configuration for the factory node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Directory holding the RocksDB database
    pub data_dir: PathBuf,
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Store namespace of the registry
    pub module_name: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: "info".to_string(),
            module_name: factory_core::MODULE_NAME.to_string(),
        }
    }
}

/// `$FACTORYD_HOME`, or `<platform data dir>/denom-factory`.
pub fn default_data_dir() -> PathBuf {
    if let Ok(home) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(home);
    }
    let mut dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.push("denom-factory");
    dir
}

impl CliConfig {
    /// Loads configuration from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Saves configuration to a file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CliError> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

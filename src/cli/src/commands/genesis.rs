//! Commands to import and export genesis files.

use crate::app::{App, AppGenesis};
use crate::config::CliConfig;
use crate::errors::CliError;
use factory_core::keeper::MODULE_NAME;
use std::path::Path;
use tracing::info;

/// Imports `genesis_file` into the database, which must not hold any state yet.
pub fn init(config: &CliConfig, genesis_file: &Path) -> Result<usize, CliError> {
    let genesis = AppGenesis::from_file(genesis_file)?;

    let mut app = App::open(config)?;
    if !app.is_empty()? {
        return Err(CliError::GenesisError(format!(
            "{} already holds {} state",
            config.data_dir.display(),
            MODULE_NAME
        )));
    }

    app.init_genesis(&genesis)?;
    app.commit()?;
    info!("Initialized {} from {}", config.data_dir.display(), genesis_file.display());

    Ok(genesis.tokenfactory.factory_denoms.len())
}

/// Exports the current state, to `output` if given, otherwise as a JSON string.
pub fn export(config: &CliConfig, output: Option<&Path>) -> Result<String, CliError> {
    let app = App::open(config)?;
    let genesis = app.export_genesis()?;

    match output {
        Some(path) => {
            genesis.to_file(path)?;
            Ok(path.display().to_string())
        }
        None => Ok(serde_json::to_string_pretty(&genesis)?),
    }
}

//! Read-only commands.

use crate::app::App;
use crate::config::CliConfig;
use crate::errors::CliError;
use factory_core::expected::Ledger;
use factory_core::types::Coin;
use factory_core::Query;

/// Answers a registry query as pretty JSON.
pub fn run(config: &CliConfig, query: &Query) -> Result<String, CliError> {
    let app = App::open(config)?;
    let response = app.keeper().query(query)?;
    Ok(serde_json::to_string_pretty(&response)?)
}

/// The balance of `denom` held by `address`, as pretty JSON.
pub fn balance(config: &CliConfig, address: &str, denom: &str) -> Result<String, CliError> {
    let app = App::open(config)?;
    let amount = app.keeper().ledger().spendable_balance(address, denom)?;
    Ok(serde_json::to_string_pretty(&Coin::new(denom, amount))?)
}

//! Command to fund an account with native coins.

use crate::app::App;
use crate::config::CliConfig;
use crate::errors::CliError;
use factory_core::types::{parse_coins, Coin};

/// Credits `coins` (e.g. `"150uosmo,10stake"`) to `address`.
pub fn run(config: &CliConfig, address: &str, coins: &str) -> Result<Vec<Coin>, CliError> {
    let coins = parse_coins(coins)?;
    if coins.is_empty() {
        return Err(CliError::InvalidArgument("no coins given".to_string()));
    }

    let mut app = App::open(config)?;
    app.fund(address, &coins)?;
    app.commit()?;

    Ok(coins)
}

//! Commands that change registry state.

use crate::app::App;
use crate::config::CliConfig;
use crate::errors::CliError;
use factory_core::events::Event;
use factory_core::{Msg, MsgResponse};
use tracing::debug;

/// Outcome of a committed transaction.
#[derive(Debug)]
pub struct TxResult {
    /// What the keeper answered
    pub response: MsgResponse,
    /// Events recorded while applying
    pub events: Vec<Event>,
}

/// Applies `msg` and flushes the result.
pub fn run(config: &CliConfig, msg: Msg) -> Result<TxResult, CliError> {
    debug!("Applying {}", msg);

    let mut app = App::open(config)?;
    let response = app.keeper_mut().apply(msg)?;
    let events = app.keeper_mut().take_events();
    app.commit()?;

    Ok(TxResult { response, events })
}

//! Events emitted by successful registry operations.

use crate::types::{Coin, DenomMetadata};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A committed state transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A new denomination was created.
    CreateDenom {
        /// The creator and initial admin
        creator: String,
        /// The derived denomination
        new_token_denom: String,
    },
    /// Tokens were minted to the admin.
    Mint {
        /// The account credited
        mint_to_address: String,
        /// The minted amount
        amount: Coin,
    },
    /// Tokens were burned from the admin.
    Burn {
        /// The account debited
        burn_from_address: String,
        /// The burned amount
        amount: Coin,
    },
    /// Admin rights were reassigned or dropped.
    ChangeAdmin {
        /// The denomination
        denom: String,
        /// The new admin, empty when orphaned
        new_admin: String,
    },
    /// The before-send hook was set or cleared.
    SetBeforeSendHook {
        /// The denomination
        denom: String,
        /// The hook, empty when cleared
        before_send_hook_address: String,
    },
    /// Display metadata was replaced by the admin.
    SetDenomMetadata {
        /// The denomination
        denom: String,
        /// The new metadata
        metadata: DenomMetadata,
    },
}

impl Event {
    /// Stable event type name.
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::CreateDenom { .. } => "create_denom",
            Event::Mint { .. } => "tf_mint",
            Event::Burn { .. } => "tf_burn",
            Event::ChangeAdmin { .. } => "change_admin",
            Event::SetBeforeSendHook { .. } => "set_before_send_hook",
            Event::SetDenomMetadata { .. } => "set_denom_metadata",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.event_type();
        match self {
            Event::CreateDenom { creator, new_token_denom } => {
                write!(f, "{} {{ creator: {}, denom: {} }}", name, creator, new_token_denom)
            }
            Event::Mint { mint_to_address, amount } => {
                write!(f, "{} {{ to: {}, amount: {} }}", name, mint_to_address, amount)
            }
            Event::Burn { burn_from_address, amount } => {
                write!(f, "{} {{ from: {}, amount: {} }}", name, burn_from_address, amount)
            }
            Event::ChangeAdmin { denom, new_admin } => {
                write!(f, "{} {{ denom: {}, new_admin: {} }}", name, denom, new_admin)
            }
            Event::SetBeforeSendHook { denom, before_send_hook_address } => {
                write!(f, "{} {{ denom: {}, hook: {} }}", name, denom, before_send_hook_address)
            }
            Event::SetDenomMetadata { denom, .. } => {
                write!(f, "{} {{ denom: {} }}", name, denom)
            }
        }
    }
}

/// Append-only log of events for the host to drain.
#[derive(Clone, Debug, Default)]
pub struct EventManager {
    events: Vec<Event>,
}

impl EventManager {
    /// Creates an empty event log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event.
    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Events emitted since the last drain.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Counts the events of the given type.
    pub fn count(&self, event_type: &str) -> usize {
        self.events
            .iter()
            .filter(|event| event.event_type() == event_type)
            .count()
    }

    /// Removes and returns all events.
    pub fn take(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

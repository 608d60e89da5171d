//! Core of the denomination factory.
//!
//! This crate lets any account create a namespaced denomination
//! (`factory/<creator>/<subdenom>`) by paying a fee, and afterwards restricts
//! minting, burning, admin transfer and before-send hook registration to the
//! denomination's current admin. Balances, accounts and parameter storage are
//! supplied by the host through the traits in [`expected`].

pub mod authority;
pub mod denom;
pub mod errors;
pub mod events;
pub mod expected;
pub mod genesis;
pub mod keeper;
pub mod msgs;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use errors::FactoryError;
pub use events::{Event, EventManager};
pub use genesis::{GenesisDenom, GenesisState};
pub use keeper::{Keeper, MODULE_NAME};
pub use msgs::{Msg, MsgResponse, Query, QueryResponse};
pub use store::{KvStore, MemStore, PrefixStore};
pub use types::{Address, AuthorityMetadata, Balance, Coin, DenomMetadata, DenomUnit, Params};

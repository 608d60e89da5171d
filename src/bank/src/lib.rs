//! Reference collaborators for the denomination factory.
//!
//! A store-backed ledger, account registry and parameter space implementing
//! the capability traits of `factory_core::expected`. Each component owns its
//! own store, so they can share one database through
//! [`factory_core::PrefixStore`] namespaces.

pub mod accounts;
pub mod bank;
pub mod params;

// Re-export commonly used types
pub use accounts::{Account, Accounts};
pub use bank::Bank;
pub use params::ParamSpace;

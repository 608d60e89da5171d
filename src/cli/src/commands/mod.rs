//! Commands for the factory node.

pub mod fund;
pub mod genesis;
pub mod query;
pub mod tx;

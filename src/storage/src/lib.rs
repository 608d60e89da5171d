//! Persistent storage for the denomination factory.
//!
//! Provides a RocksDB implementation of `factory_core::KvStore`. One database
//! is shared between the registry and its collaborators through namespaced
//! views.

pub mod rocks;

// Re-export commonly used types
pub use rocks::{Namespace, RocksStore};

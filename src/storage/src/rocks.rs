//! RocksDB-backed key-value store.

use factory_core::errors::{FactoryError, Result};
use factory_core::store::{KvStore, PrefixIter, PrefixStore};
use rocksdb::{Direction, IteratorMode, Options, DB};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// A namespaced view of a [`RocksStore`].
pub type Namespace = PrefixStore<RocksStore>;

/// A wrapper around RocksDB implementing [`KvStore`].
///
/// Cloning is cheap; clones share the same database handle.
#[derive(Clone)]
pub struct RocksStore {
    /// The RocksDB instance
    db: Arc<DB>,
}

impl RocksStore {
    /// Opens (creating if missing) the database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);

        let db = DB::open(&opts, path.as_ref())
            .map_err(|e| FactoryError::StorageError(e.to_string()))?;
        info!("Opened store at {}", path.as_ref().display());

        Ok(Self { db: Arc::new(db) })
    }

    /// A view in which every key is prefixed with `prefix`.
    pub fn namespace(&self, prefix: impl Into<Vec<u8>>) -> Namespace {
        PrefixStore::new(self.clone(), prefix)
    }

    /// Flushes memtables to disk.
    pub fn flush(&self) -> Result<()> {
        self.db
            .flush()
            .map_err(|e| FactoryError::StorageError(e.to_string()))
    }
}

impl KvStore for RocksStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.db
            .get(key)
            .map_err(|e| FactoryError::StorageError(e.to_string()))
    }

    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.db
            .put(key, value)
            .map_err(|e| FactoryError::StorageError(e.to_string()))
    }

    fn delete(&mut self, key: &[u8]) -> Result<()> {
        self.db
            .delete(key)
            .map_err(|e| FactoryError::StorageError(e.to_string()))
    }

    fn prefix_iter<'a>(&'a self, prefix: &[u8]) -> Result<PrefixIter<'a>> {
        let prefix = prefix.to_vec();
        let iter = self
            .db
            .iterator(IteratorMode::From(&prefix, Direction::Forward))
            .take_while({
                let prefix = prefix.clone();
                move |item| match item {
                    Ok((key, _)) => key.starts_with(&prefix),
                    // Surface the error to the caller
                    Err(_) => true,
                }
            })
            .map(|item| {
                item.map(|(key, value)| (key.into_vec(), value.into_vec()))
                    .map_err(|e| FactoryError::StorageError(e.to_string()))
            });
        Ok(Box::new(iter))
    }
}

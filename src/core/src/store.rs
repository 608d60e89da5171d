//! Key-value store abstraction.
//!
//! The registry only defines a logical layout; the storage engine behind it
//! is supplied by the host. Anything offering point reads, writes and
//! lexicographically ordered prefix iteration can back the registry.

use crate::errors::{FactoryError, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::BTreeMap;

/// A raw key-value pair as stored.
pub type KvPair = (Vec<u8>, Vec<u8>);

/// A lazy, finite iterator over the pairs under a prefix.
///
/// Each call to [`KvStore::prefix_iter`] starts a fresh scan. Any cursor the
/// store holds is released when the iterator is dropped, whichever way the
/// caller leaves the loop.
pub type PrefixIter<'a> = Box<dyn Iterator<Item = Result<KvPair>> + 'a>;

/// An ordered key-value store.
pub trait KvStore {
    /// Reads the value stored under `key`.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Writes `value` under `key`, overwriting any previous value.
    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Removes `key` if present.
    fn delete(&mut self, key: &[u8]) -> Result<()>;

    /// Iterates all pairs whose key starts with `prefix`, in ascending key order.
    /// Returned keys are full keys, prefix included.
    fn prefix_iter<'a>(&'a self, prefix: &[u8]) -> Result<PrefixIter<'a>>;

    /// Returns true if a value is stored under `key`.
    fn has(&self, key: &[u8]) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl<S: KvStore + ?Sized> KvStore for &mut S {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &[u8]) -> Result<()> {
        (**self).delete(key)
    }

    fn prefix_iter<'a>(&'a self, prefix: &[u8]) -> Result<PrefixIter<'a>> {
        (**self).prefix_iter(prefix)
    }

    fn has(&self, key: &[u8]) -> Result<bool> {
        (**self).has(key)
    }
}

/// Reads and bincode-decodes the value under `key`.
pub fn get_value<S, T>(store: &S, key: &[u8]) -> Result<Option<T>>
where
    S: KvStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get(key)? {
        Some(bytes) => Ok(Some(bincode::deserialize(&bytes)?)),
        None => Ok(None),
    }
}

/// Bincode-encodes `value` and writes it under `key`.
pub fn set_value<S, T>(store: &mut S, key: &[u8], value: &T) -> Result<()>
where
    S: KvStore + ?Sized,
    T: Serialize,
{
    let bytes = bincode::serialize(value)?;
    store.set(key, &bytes)
}

/// Concatenates key segments.
pub fn join_key(parts: &[&[u8]]) -> Vec<u8> {
    let mut key = Vec::with_capacity(parts.iter().map(|p| p.len()).sum());
    for part in parts {
        key.extend_from_slice(part);
    }
    key
}

/// In-memory store backed by a `BTreeMap`.
#[derive(Clone, Debug, Default)]
pub struct MemStore {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.entries.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn prefix_iter<'a>(&'a self, prefix: &[u8]) -> Result<PrefixIter<'a>> {
        let prefix = prefix.to_vec();
        let iter = self
            .entries
            .range(prefix.clone()..)
            .take_while(move |(key, _)| key.starts_with(&prefix))
            .map(|(key, value)| Ok((key.clone(), value.clone())));
        Ok(Box::new(iter))
    }
}

/// A view of a store in which every key is transparently prefixed.
///
/// Lets several components share one underlying store without their key
/// spaces overlapping.
#[derive(Clone, Debug)]
pub struct PrefixStore<S> {
    inner: S,
    prefix: Vec<u8>,
}

impl<S: KvStore> PrefixStore<S> {
    /// Wraps `inner` so all keys live under `prefix`.
    pub fn new(inner: S, prefix: impl Into<Vec<u8>>) -> Self {
        Self {
            inner,
            prefix: prefix.into(),
        }
    }

    /// The namespace prefix.
    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    /// Unwraps the underlying store.
    pub fn into_inner(self) -> S {
        self.inner
    }

    fn full_key(&self, key: &[u8]) -> Vec<u8> {
        join_key(&[&self.prefix, key])
    }
}

impl<S: KvStore> KvStore for PrefixStore<S> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.inner.get(&self.full_key(key))
    }

    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        let full = self.full_key(key);
        self.inner.set(&full, value)
    }

    fn delete(&mut self, key: &[u8]) -> Result<()> {
        let full = self.full_key(key);
        self.inner.delete(&full)
    }

    fn prefix_iter<'a>(&'a self, prefix: &[u8]) -> Result<PrefixIter<'a>> {
        let strip = self.prefix.len();
        let iter = self
            .inner
            .prefix_iter(&self.full_key(prefix))?
            .map(move |item| -> Result<KvPair> {
                let (key, value) = item?;
                let key = key.get(strip..).map(<[u8]>::to_vec).ok_or_else(|| {
                    FactoryError::StorageError("iterated key shorter than namespace".to_string())
                })?;
                Ok((key, value))
            });
        Ok(Box::new(iter))
    }
}

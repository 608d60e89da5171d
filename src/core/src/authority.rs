//! Persistent layout of the registry: the authority store and the creator index.
//!
//! Both live in the module's own store:
//!
//! ```text
//! denoms|<denom>             -> AuthorityMetadata (bincode)
//! creator|<creator>|<denom>  -> <denom>
//! ```
//!
//! Creator addresses never contain `|`, so a creator's entries form one
//! contiguous, denom-ordered range.

use crate::errors::{FactoryError, Result};
use crate::store::{get_value, join_key, set_value, KvStore};
use crate::types::AuthorityMetadata;

/// Namespace of the authority store.
pub const DENOM_AUTHORITY_PREFIX: &[u8] = b"denoms|";

/// Namespace of the creator index.
pub const CREATOR_PREFIX: &[u8] = b"creator|";

const SEPARATOR: &[u8] = b"|";

/// Key of the authority record for `denom`.
pub fn authority_key(denom: &str) -> Vec<u8> {
    join_key(&[DENOM_AUTHORITY_PREFIX, denom.as_bytes()])
}

/// Prefix of every creator index entry belonging to `creator`.
pub fn creator_prefix(creator: &str) -> Vec<u8> {
    join_key(&[CREATOR_PREFIX, creator.as_bytes(), SEPARATOR])
}

/// Key of the creator index entry for `(creator, denom)`.
pub fn creator_key(creator: &str, denom: &str) -> Vec<u8> {
    join_key(&[&creator_prefix(creator), denom.as_bytes()])
}

fn utf8(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec())
        .map_err(|e| FactoryError::SerializationError(format!("non utf-8 key: {}", e)))
}

/// Lazy scan over `(denom, AuthorityMetadata)` pairs in denom order.
pub type AuthorityIter<'a> = Box<dyn Iterator<Item = Result<(String, AuthorityMetadata)>> + 'a>;

/// Lazy scan over denominations.
pub type DenomIter<'a> = Box<dyn Iterator<Item = Result<String>> + 'a>;

/// Denomination to authority record mapping.
///
/// `set_authority_metadata` is an unconditional overwrite; creation versus
/// mutation semantics are enforced by the keeper.
pub trait AuthorityStore: KvStore {
    /// Reads the authority record for `denom`.
    fn get_authority_metadata(&self, denom: &str) -> Result<Option<AuthorityMetadata>> {
        get_value(self, &authority_key(denom))
    }

    /// Overwrites the authority record for `denom`.
    fn set_authority_metadata(&mut self, denom: &str, metadata: &AuthorityMetadata) -> Result<()> {
        set_value(self, &authority_key(denom), metadata)
    }

    /// Returns true if `denom` has an authority record.
    fn has_authority_metadata(&self, denom: &str) -> Result<bool> {
        self.has(&authority_key(denom))
    }

    /// Scans every authority record, ordered lexicographically by denom.
    fn iterate_authority_metadata(&self) -> Result<AuthorityIter<'_>> {
        let strip = DENOM_AUTHORITY_PREFIX.len();
        let iter = self
            .prefix_iter(DENOM_AUTHORITY_PREFIX)?
            .map(move |item| -> Result<(String, AuthorityMetadata)> {
                let (key, value) = item?;
                let denom = utf8(&key[strip..])?;
                let metadata = bincode::deserialize(&value)?;
                Ok((denom, metadata))
            });
        Ok(Box::new(iter))
    }
}

impl<S: KvStore + ?Sized> AuthorityStore for S {}

/// Write-once reverse index from creator to the denominations it created.
///
/// Only used for discovery; authorization always reads the authority store.
pub trait CreatorIndex: KvStore {
    /// Records that `creator` created `denom`.
    fn add_denom_from_creator(&mut self, creator: &str, denom: &str) -> Result<()> {
        self.set(&creator_key(creator, denom), denom.as_bytes())
    }

    /// Scans the denominations created by `creator`, ordered by denom.
    fn iterate_denoms_from_creator(&self, creator: &str) -> Result<DenomIter<'_>> {
        let iter = self
            .prefix_iter(&creator_prefix(creator))?
            .map(|item| -> Result<String> {
                let (_, value) = item?;
                utf8(&value)
            });
        Ok(Box::new(iter))
    }
}

impl<S: KvStore + ?Sized> CreatorIndex for S {}

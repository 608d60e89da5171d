//! Genesis import and export of the registry.

use crate::authority::AuthorityStore;
use crate::denom::{deconstruct_denom, validate_address};
use crate::errors::{FactoryError, Result};
use crate::expected::{AccountKeeper, Ledger, ParamStore};
use crate::keeper::Keeper;
use crate::store::KvStore;
use crate::types::{AuthorityMetadata, Params};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::info;

/// One registered denomination in a snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisDenom {
    /// The factory denomination
    pub denom: String,
    /// Its authority record
    pub authority_metadata: AuthorityMetadata,
}

impl GenesisDenom {
    /// Creates a genesis entry.
    pub fn new(denom: impl Into<String>, authority_metadata: AuthorityMetadata) -> Self {
        Self {
            denom: denom.into(),
            authority_metadata,
        }
    }
}

/// Full snapshot of the registry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    /// Module parameters
    #[serde(default)]
    pub params: Params,
    /// Every registered denomination, in denom order when exported
    #[serde(default)]
    pub factory_denoms: Vec<GenesisDenom>,
}

impl GenesisState {
    /// Creates a snapshot.
    pub fn new(params: Params, factory_denoms: Vec<GenesisDenom>) -> Self {
        Self {
            params,
            factory_denoms,
        }
    }

    /// Checks params, denom well-formedness, uniqueness and admin addresses.
    pub fn validate(&self) -> Result<()> {
        self.params
            .validate()
            .map_err(|e| FactoryError::InvalidGenesis(e.to_string()))?;

        let mut seen = BTreeSet::new();
        for entry in &self.factory_denoms {
            if !seen.insert(entry.denom.as_str()) {
                return Err(FactoryError::InvalidGenesis(format!(
                    "duplicate denom: {}",
                    entry.denom
                )));
            }
            deconstruct_denom(&entry.denom)
                .map_err(|e| FactoryError::InvalidGenesis(e.to_string()))?;

            let metadata = &entry.authority_metadata;
            if let Some(admin) = metadata.admin() {
                validate_address(admin).map_err(|e| {
                    FactoryError::InvalidGenesis(format!("admin of {}: {}", entry.denom, e))
                })?;
            }
            if let Some(hook) = metadata.before_send_hook() {
                validate_address(hook).map_err(|e| {
                    FactoryError::InvalidGenesis(format!("hook of {}: {}", entry.denom, e))
                })?;
            }
        }
        Ok(())
    }

    /// Loads a snapshot from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|e| {
            FactoryError::InvalidGenesis(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Writes the snapshot to a JSON file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), contents).map_err(|e| {
            FactoryError::StorageError(format!("{}: {}", path.as_ref().display(), e))
        })
    }
}

impl<S, L, A, P> Keeper<S, L, A, P>
where
    S: KvStore,
    L: Ledger,
    A: AccountKeeper,
    P: ParamStore,
{
    /// Loads a trusted snapshot.
    ///
    /// Bypasses the fee and collision checks of `create_denom`. Ensures the
    /// holding account exists and back-fills ledger display metadata only
    /// where none exists. Safe to repeat.
    pub fn init_genesis(&mut self, genesis: &GenesisState) -> Result<()> {
        genesis.validate()?;

        self.create_module_account()?;
        self.set_params(&genesis.params)?;

        for entry in &genesis.factory_denoms {
            let (creator, _) = deconstruct_denom(&entry.denom)?;
            self.register_denom(&creator, &entry.denom, &entry.authority_metadata)?;
        }

        info!(
            "Imported genesis with {} factory denoms",
            genesis.factory_denoms.len()
        );
        Ok(())
    }

    /// Snapshots the registry in store order.
    pub fn export_genesis(&self) -> Result<GenesisState> {
        let factory_denoms = self
            .store()
            .iterate_authority_metadata()?
            .map(|item| item.map(|(denom, metadata)| GenesisDenom::new(denom, metadata)))
            .collect::<Result<Vec<_>>>()?;

        info!("Exported genesis with {} factory denoms", factory_denoms.len());
        Ok(GenesisState::new(self.get_params()?, factory_denoms))
    }
}

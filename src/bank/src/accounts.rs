//! Store-backed account registry.

use factory_core::denom::validate_address;
use factory_core::errors::{FactoryError, Result};
use factory_core::expected::{AccountI, AccountKeeper};
use factory_core::store::{get_value, join_key, set_value, KvStore};
use factory_core::types::Address;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

/// Constants for store keys
const ACCOUNT_PREFIX: &[u8] = b"accounts|";
const NEXT_ACCOUNT_NUMBER_KEY: &[u8] = b"next_account_number";

/// Length in bytes of a derived module address.
const MODULE_ADDRESS_LENGTH: usize = 20;

fn account_key(address: &str) -> Vec<u8> {
    join_key(&[ACCOUNT_PREFIX, address.as_bytes()])
}

/// An account record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// The account address
    pub address: Address,
    /// Sequential number assigned at creation
    pub account_number: u64,
    /// Set for module-owned accounts
    pub module_name: Option<String>,
}

impl AccountI for Account {
    fn address(&self) -> &str {
        &self.address
    }
}

/// Derives a module's holding address: the first 20 bytes of
/// `sha256(module_name)`, hex encoded.
pub fn module_address(module_name: &str) -> Address {
    let mut hasher = Sha256::new();
    hasher.update(module_name.as_bytes());
    let result = hasher.finalize();
    hex::encode(&result[..MODULE_ADDRESS_LENGTH])
}

/// Registry of existing accounts.
pub struct Accounts<S> {
    store: S,
}

impl<S: KvStore> Accounts<S> {
    /// Creates an account registry over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The number the next created account will receive.
    pub fn next_account_number(&self) -> Result<u64> {
        Ok(get_value(&self.store, NEXT_ACCOUNT_NUMBER_KEY)?.unwrap_or(0))
    }

    fn insert(&mut self, address: &str, module_name: Option<&str>) -> Result<Account> {
        validate_address(address)?;
        if self.store.has(&account_key(address))? {
            return Err(FactoryError::InvalidAddress(format!(
                "account {} already exists",
                address
            )));
        }

        let account_number = self.next_account_number()?;
        let account = Account {
            address: address.to_string(),
            account_number,
            module_name: module_name.map(str::to_string),
        };

        set_value(&mut self.store, &account_key(address), &account)?;
        set_value(&mut self.store, NEXT_ACCOUNT_NUMBER_KEY, &(account_number + 1))?;
        debug!("Created account {} with number {}", address, account_number);
        Ok(account)
    }

    /// Creates a plain user account.
    pub fn new_account(&mut self, address: &str) -> Result<Account> {
        self.insert(address, None)
    }

    /// Removes an account record. Account numbers are never reused.
    pub fn remove_account(&mut self, address: &str) -> Result<()> {
        self.store.delete(&account_key(address))
    }
}

impl<S: KvStore> AccountKeeper for Accounts<S> {
    type Account = Account;

    fn get_account(&self, address: &str) -> Result<Option<Account>> {
        get_value(&self.store, &account_key(address))
    }

    fn create_module_account(&mut self, address: &str, module_name: &str) -> Result<Account> {
        self.insert(address, Some(module_name))
    }

    fn module_address(&self, module_name: &str) -> Address {
        module_address(module_name)
    }
}

//! Wiring of the registry keeper over a RocksDB database.

use crate::config::CliConfig;
use crate::errors::CliError;
use factory_bank::{Accounts, Bank, ParamSpace};
use factory_core::denom::{deconstruct_denom, validate_address, validate_denom};
use factory_core::expected::{AccountKeeper, Ledger};
use factory_core::types::{Balance, Coin};
use factory_core::{FactoryError, GenesisState, Keeper};
use factory_storage::{Namespace, RocksStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Store namespaces
const BANK_NAMESPACE: &str = "bank/";
const ACCOUNTS_NAMESPACE: &str = "acc/";
const PARAMS_NAMESPACE: &str = "params/";

/// Module names the registry namespace may not take.
const RESERVED_MODULE_NAMES: [&str; 3] = ["bank", "acc", "params"];

fn check_module_name(name: &str) -> Result<(), CliError> {
    if name.is_empty() || name.contains('/') || RESERVED_MODULE_NAMES.contains(&name) {
        return Err(CliError::InvalidArgument(format!(
            "module name '{}' clashes with a store namespace",
            name
        )));
    }
    Ok(())
}

/// The keeper as assembled by the node.
pub type AppKeeper =
    Keeper<Namespace, Bank<Namespace>, Accounts<Namespace>, ParamSpace<Namespace>>;

/// Initial coins of one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisBalance {
    /// The account
    pub address: String,
    /// Coins credited at genesis
    pub coins: Vec<Coin>,
}

/// Genesis file of the node: the registry section plus opening balances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppGenesis {
    /// Registry state
    #[serde(default)]
    pub tokenfactory: GenesisState,
    /// Opening balances
    #[serde(default)]
    pub balances: Vec<GenesisBalance>,
}

impl AppGenesis {
    /// Loads a genesis file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Writes the genesis as pretty JSON.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CliError> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// An opened node: one database shared by every store the keeper uses.
pub struct App {
    db: RocksStore,
    keeper: AppKeeper,
}

impl App {
    /// Opens the database under `config.data_dir` and makes sure the module
    /// holding account exists.
    pub fn open(config: &CliConfig) -> Result<Self, CliError> {
        check_module_name(&config.module_name)?;
        std::fs::create_dir_all(&config.data_dir)?;
        let db = RocksStore::open(&config.data_dir)?;

        let registry = db.namespace(format!("{}/", config.module_name));
        let bank = Bank::new(db.namespace(BANK_NAMESPACE));
        let accounts = Accounts::new(db.namespace(ACCOUNTS_NAMESPACE));
        let params = ParamSpace::new(db.namespace(format!(
            "{}{}/",
            PARAMS_NAMESPACE, config.module_name
        )));

        let mut keeper = Keeper::new(registry, bank, accounts, params);
        keeper.create_module_account()?;

        debug!("Opened node at {}", config.data_dir.display());
        Ok(Self { db, keeper })
    }

    /// The keeper.
    pub fn keeper(&self) -> &AppKeeper {
        &self.keeper
    }

    /// Mutable access to the keeper.
    pub fn keeper_mut(&mut self) -> &mut AppKeeper {
        &mut self.keeper
    }

    /// Flushes pending writes to disk.
    pub fn commit(&self) -> Result<(), CliError> {
        self.db.flush()?;
        Ok(())
    }

    /// Creates `address` in the account registry if it is unknown.
    pub fn ensure_account(&mut self, address: &str) -> Result<(), CliError> {
        if self.keeper.accounts().get_account(address)?.is_none() {
            self.keeper.accounts_mut().new_account(address)?;
        }
        Ok(())
    }

    /// Mints `coins` to `address` outside the registry's admin checks.
    ///
    /// Factory denominations are refused: those only enter circulation
    /// through their admin.
    pub fn fund(&mut self, address: &str, coins: &[Coin]) -> Result<(), CliError> {
        if let Some(coin) = coins
            .iter()
            .find(|coin| deconstruct_denom(&coin.denom).is_ok())
        {
            return Err(CliError::InvalidArgument(format!(
                "{} is a factory denom and can only be minted by its admin",
                coin.denom
            )));
        }

        self.ensure_account(address)?;
        for coin in coins.iter().filter(|coin| !coin.is_zero()) {
            self.keeper.ledger_mut().mint(address, coin)?;
        }
        info!("Funded {} with {:?}", address, coins);
        Ok(())
    }

    /// Whether the database holds neither registry state nor balances.
    pub fn is_empty(&self) -> Result<bool, CliError> {
        Ok(self.keeper.export_genesis()?.factory_denoms.is_empty()
            && self.keeper.ledger().balances()?.is_empty())
    }

    /// Imports a genesis file into an empty database.
    ///
    /// Every section is checked before the first write.
    pub fn init_genesis(&mut self, genesis: &AppGenesis) -> Result<(), CliError> {
        if !self.is_empty()? {
            return Err(CliError::GenesisError("database already holds state".to_string()));
        }
        genesis.tokenfactory.validate()?;
        validate_balances(&genesis.balances)?;

        for balance in &genesis.balances {
            self.ensure_account(&balance.address)?;
            for coin in balance.coins.iter().filter(|coin| !coin.is_zero()) {
                self.keeper.ledger_mut().mint(&balance.address, coin)?;
            }
        }
        self.keeper.init_genesis(&genesis.tokenfactory)?;

        info!(
            "Imported genesis with {} denoms and {} balances",
            genesis.tokenfactory.factory_denoms.len(),
            genesis.balances.len()
        );
        Ok(())
    }

    /// Exports the registry and every balance.
    pub fn export_genesis(&self) -> Result<AppGenesis, CliError> {
        let mut grouped: BTreeMap<String, Vec<Coin>> = BTreeMap::new();
        for (address, coin) in self.keeper.ledger().balances()? {
            grouped.entry(address).or_default().push(coin);
        }

        Ok(AppGenesis {
            tokenfactory: self.keeper.export_genesis()?,
            balances: grouped
                .into_iter()
                .map(|(address, coins)| GenesisBalance { address, coins })
                .collect(),
        })
    }
}

/// Checks addresses, denoms and that no balance or supply overflows.
fn validate_balances(balances: &[GenesisBalance]) -> Result<(), CliError> {
    let mut held: BTreeMap<(&str, &str), Balance> = BTreeMap::new();
    let mut supply: BTreeMap<&str, Balance> = BTreeMap::new();

    for balance in balances {
        let invalid = |e: FactoryError| {
            CliError::GenesisError(format!("balance of {}: {}", balance.address, e))
        };
        validate_address(&balance.address).map_err(invalid)?;
        for coin in &balance.coins {
            validate_denom(&coin.denom).map_err(invalid)?;
            let overflow = || CliError::GenesisError(format!("{} overflows", coin.denom));

            let total = held
                .entry((balance.address.as_str(), coin.denom.as_str()))
                .or_insert(0);
            *total = total.checked_add(coin.amount).ok_or_else(overflow)?;
            let total = supply.entry(coin.denom.as_str()).or_insert(0);
            *total = total.checked_add(coin.amount).ok_or_else(overflow)?;
        }
    }
    Ok(())
}

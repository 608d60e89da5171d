//! Capabilities the registry consumes from its host.
//!
//! The keeper depends only on these traits. `factory-bank` ships store-backed
//! implementations; hosts may plug in their own ledger and account system.

use crate::errors::Result;
use crate::types::{Address, Balance, Coin, DenomMetadata, Params};

/// The ledger that actually holds balances.
pub trait Ledger {
    /// Adds `coins` to `account`.
    fn credit(&mut self, account: &str, coins: &[Coin]) -> Result<()>;

    /// Removes `coins` from `account`.
    ///
    /// Fails with `InsufficientBalance` without changing any balance if any
    /// single coin is not covered.
    fn debit(&mut self, account: &str, coins: &[Coin]) -> Result<()>;

    /// The amount of `denom` that `account` can spend.
    fn spendable_balance(&self, account: &str, denom: &str) -> Result<Balance>;

    /// Creates `coin` out of nothing and credits it to `account`.
    fn mint(&mut self, account: &str, coin: &Coin) -> Result<()>;

    /// Debits `coin` from `account` and destroys it.
    fn burn(&mut self, account: &str, coin: &Coin) -> Result<()>;

    /// Stores display metadata for `denom`.
    fn set_denom_metadata(&mut self, denom: &str, metadata: &DenomMetadata) -> Result<()>;

    /// Reads display metadata for `denom`.
    fn get_denom_metadata(&self, denom: &str) -> Result<Option<DenomMetadata>>;

    /// Moves `coins` from `from` to `to`, all-or-nothing.
    ///
    /// The default debits first and refunds `from` if the credit fails.
    /// Implementations that can check both sides up front should override it.
    fn send_coins(&mut self, from: &str, to: &str, coins: &[Coin]) -> Result<()> {
        self.debit(from, coins)?;
        if let Err(e) = self.credit(to, coins) {
            self.credit(from, coins)?;
            return Err(e);
        }
        Ok(())
    }
}

/// An account record as seen by the registry.
pub trait AccountI {
    /// The account address.
    fn address(&self) -> &str;
}

/// The account subsystem.
pub trait AccountKeeper {
    /// The account type held by this keeper.
    type Account: AccountI;

    /// Looks up the account at `address`.
    fn get_account(&self, address: &str) -> Result<Option<Self::Account>>;

    /// Creates a module account named `module_name` at `address`.
    fn create_module_account(&mut self, address: &str, module_name: &str) -> Result<Self::Account>;

    /// Deterministic address of a module's holding account.
    fn module_address(&self, module_name: &str) -> Address;
}

/// Storage for the module parameters.
pub trait ParamStore {
    /// The current parameters. Defaults when none have been set.
    fn get_params(&self) -> Result<Params>;

    /// Replaces the parameters.
    fn set_params(&mut self, params: &Params) -> Result<()>;
}

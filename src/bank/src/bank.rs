//! Store-backed ledger.

use factory_core::errors::{FactoryError, Result};
use factory_core::expected::Ledger;
use factory_core::store::{get_value, join_key, set_value, KvStore};
use factory_core::types::{Balance, Coin, DenomMetadata};
use std::collections::BTreeMap;
use tracing::debug;

/// Constants for store keys
const BALANCE_PREFIX: &[u8] = b"balances|";
const SUPPLY_PREFIX: &[u8] = b"supply|";
const METADATA_PREFIX: &[u8] = b"metadata|";
const SEPARATOR: &[u8] = b"|";

fn balance_prefix(account: &str) -> Vec<u8> {
    join_key(&[BALANCE_PREFIX, account.as_bytes(), SEPARATOR])
}

fn balance_key(account: &str, denom: &str) -> Vec<u8> {
    join_key(&[&balance_prefix(account), denom.as_bytes()])
}

fn supply_key(denom: &str) -> Vec<u8> {
    join_key(&[SUPPLY_PREFIX, denom.as_bytes()])
}

fn metadata_key(denom: &str) -> Vec<u8> {
    join_key(&[METADATA_PREFIX, denom.as_bytes()])
}

/// Sums coins per denom, dropping zero amounts.
fn aggregate(coins: &[Coin]) -> Result<BTreeMap<&str, Balance>> {
    let mut totals: BTreeMap<&str, Balance> = BTreeMap::new();
    for coin in coins.iter().filter(|coin| !coin.is_zero()) {
        let total = totals.entry(coin.denom.as_str()).or_insert(0);
        *total = total
            .checked_add(coin.amount)
            .ok_or_else(|| FactoryError::AmountOverflow(coin.denom.clone()))?;
    }
    Ok(totals)
}

/// Balances, total supply and display metadata per denomination.
pub struct Bank<S> {
    store: S,
}

impl<S: KvStore> Bank<S> {
    /// Creates a ledger over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The balance of `denom` held by `account`.
    pub fn balance(&self, account: &str, denom: &str) -> Result<Balance> {
        Ok(get_value(&self.store, &balance_key(account, denom))?.unwrap_or(0))
    }

    /// Every non-zero balance of `account`, ordered by denom.
    pub fn all_balances(&self, account: &str) -> Result<Vec<Coin>> {
        let prefix = balance_prefix(account);
        self.store
            .prefix_iter(&prefix)?
            .map(|item| -> Result<Coin> {
                let (key, value) = item?;
                let denom = String::from_utf8(key[prefix.len()..].to_vec())
                    .map_err(|e| FactoryError::SerializationError(e.to_string()))?;
                let amount: Balance = bincode::deserialize(&value)?;
                Ok(Coin::new(denom, amount))
            })
            .collect()
    }

    /// Every non-zero balance in the ledger as `(account, coin)`, ordered by
    /// account then denom.
    pub fn balances(&self) -> Result<Vec<(String, Coin)>> {
        self.store
            .prefix_iter(BALANCE_PREFIX)?
            .map(|item| -> Result<(String, Coin)> {
                let (key, value) = item?;
                let rest = String::from_utf8(key[BALANCE_PREFIX.len()..].to_vec())
                    .map_err(|e| FactoryError::SerializationError(e.to_string()))?;
                let (account, denom) = rest.split_once('|').ok_or_else(|| {
                    FactoryError::SerializationError(format!("malformed balance key {}", rest))
                })?;
                let amount: Balance = bincode::deserialize(&value)?;
                Ok((account.to_string(), Coin::new(denom, amount)))
            })
            .collect()
    }

    /// Total amount of `denom` in existence.
    pub fn supply(&self, denom: &str) -> Result<Balance> {
        Ok(get_value(&self.store, &supply_key(denom))?.unwrap_or(0))
    }

    /// Balances of `account` after adding `totals`, or the first overflow.
    fn credited<'a>(
        &self,
        account: &str,
        totals: &BTreeMap<&'a str, Balance>,
    ) -> Result<Vec<(&'a str, Balance)>> {
        let mut updated = Vec::with_capacity(totals.len());
        for (&denom, &amount) in totals {
            let new_balance = self
                .balance(account, denom)?
                .checked_add(amount)
                .ok_or_else(|| FactoryError::AmountOverflow(denom.to_string()))?;
            updated.push((denom, new_balance));
        }
        Ok(updated)
    }

    /// Balances of `account` after removing `totals`, or the first shortfall.
    fn debited<'a>(
        &self,
        account: &str,
        totals: &BTreeMap<&'a str, Balance>,
    ) -> Result<Vec<(&'a str, Balance)>> {
        let mut updated = Vec::with_capacity(totals.len());
        for (&denom, &amount) in totals {
            let available = self.balance(account, denom)?;
            let new_balance =
                available
                    .checked_sub(amount)
                    .ok_or_else(|| FactoryError::InsufficientBalance {
                        denom: denom.to_string(),
                        required: amount,
                        available,
                    })?;
            updated.push((denom, new_balance));
        }
        Ok(updated)
    }

    fn set_balance(&mut self, account: &str, denom: &str, amount: Balance) -> Result<()> {
        let key = balance_key(account, denom);
        if amount == 0 {
            self.store.delete(&key)
        } else {
            set_value(&mut self.store, &key, &amount)
        }
    }

    fn set_supply(&mut self, denom: &str, amount: Balance) -> Result<()> {
        set_value(&mut self.store, &supply_key(denom), &amount)
    }
}

impl<S: KvStore> Ledger for Bank<S> {
    fn credit(&mut self, account: &str, coins: &[Coin]) -> Result<()> {
        let updated = self.credited(account, &aggregate(coins)?)?;
        for (denom, new_balance) in updated {
            self.set_balance(account, denom, new_balance)?;
        }
        debug!("Credited {:?} to {}", coins, account);
        Ok(())
    }

    fn debit(&mut self, account: &str, coins: &[Coin]) -> Result<()> {
        let updated = self.debited(account, &aggregate(coins)?)?;
        for (denom, new_balance) in updated {
            self.set_balance(account, denom, new_balance)?;
        }
        debug!("Debited {:?} from {}", coins, account);
        Ok(())
    }

    fn send_coins(&mut self, from: &str, to: &str, coins: &[Coin]) -> Result<()> {
        let totals = aggregate(coins)?;

        // Both sides are computed before either is written
        let debits = self.debited(from, &totals)?;
        if from == to {
            return Ok(());
        }
        let credits = self.credited(to, &totals)?;

        for (denom, new_balance) in debits {
            self.set_balance(from, denom, new_balance)?;
        }
        for (denom, new_balance) in credits {
            self.set_balance(to, denom, new_balance)?;
        }
        debug!("Sent {:?} from {} to {}", coins, from, to);
        Ok(())
    }

    fn spendable_balance(&self, account: &str, denom: &str) -> Result<Balance> {
        self.balance(account, denom)
    }

    fn mint(&mut self, account: &str, coin: &Coin) -> Result<()> {
        let new_supply = self
            .supply(&coin.denom)?
            .checked_add(coin.amount)
            .ok_or_else(|| FactoryError::AmountOverflow(coin.denom.clone()))?;

        self.credit(account, std::slice::from_ref(coin))?;
        self.set_supply(&coin.denom, new_supply)
    }

    fn burn(&mut self, account: &str, coin: &Coin) -> Result<()> {
        self.debit(account, std::slice::from_ref(coin))?;

        // Supply always covers any single balance
        let new_supply = self.supply(&coin.denom)?.saturating_sub(coin.amount);
        self.set_supply(&coin.denom, new_supply)
    }

    fn set_denom_metadata(&mut self, denom: &str, metadata: &DenomMetadata) -> Result<()> {
        set_value(&mut self.store, &metadata_key(denom), metadata)
    }

    fn get_denom_metadata(&self, denom: &str) -> Result<Option<DenomMetadata>> {
        get_value(&self.store, &metadata_key(denom))
    }
}

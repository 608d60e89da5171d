//! Core types for the denomination registry.

use crate::denom::validate_denom;
use crate::errors::FactoryError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// An account address in its string form.
pub type Address = String;

/// Token amount, represented as a 128-bit unsigned integer.
pub type Balance = u128;

/// An amount of a single denomination.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coin {
    /// The denomination
    pub denom: String,
    /// The amount
    pub amount: Balance,
}

impl Coin {
    /// Creates a new coin.
    pub fn new(denom: impl Into<String>, amount: Balance) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Parses `<amount><denom>`, e.g. `100uatom` or `10factory/addr/bitcoin`.
impl FromStr for Coin {
    type Err = FactoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| FactoryError::InvalidDenom(format!("missing denom in coin '{}'", s)))?;
        let (amount, denom) = s.split_at(split);
        if amount.is_empty() {
            return Err(FactoryError::InvalidAmount(format!("missing amount in coin '{}'", s)));
        }
        let amount = amount
            .parse::<Balance>()
            .map_err(|e| FactoryError::InvalidAmount(format!("{}: {}", amount, e)))?;
        validate_denom(denom)?;
        Ok(Coin::new(denom, amount))
    }
}

/// Parses a comma separated list of coins. An empty string yields no coins.
pub fn parse_coins(s: &str) -> Result<Vec<Coin>, FactoryError> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(Coin::from_str)
        .collect()
}

/// Admin authority over a single factory denomination.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityMetadata {
    /// The current admin. Empty means the denom is permanently un-administered.
    pub admin: Address,
    /// Handler invoked by the ledger before transfers. Empty means no hook.
    #[serde(default)]
    pub before_send_hook_address: Address,
}

impl AuthorityMetadata {
    /// Creates authority metadata with the given admin and no hook.
    pub fn with_admin(admin: impl Into<Address>) -> Self {
        Self {
            admin: admin.into(),
            before_send_hook_address: String::new(),
        }
    }

    /// Returns the admin, or `None` for an orphaned denom.
    pub fn admin(&self) -> Option<&str> {
        if self.admin.is_empty() {
            None
        } else {
            Some(&self.admin)
        }
    }

    /// Returns the registered before-send hook, if any.
    pub fn before_send_hook(&self) -> Option<&str> {
        if self.before_send_hook_address.is_empty() {
            None
        } else {
            Some(&self.before_send_hook_address)
        }
    }

    /// Returns true if `sender` currently holds admin rights.
    pub fn is_admin(&self, sender: &str) -> bool {
        !self.admin.is_empty() && self.admin == sender
    }
}

/// Module parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// Fee charged to the creator on every successful denom creation.
    #[serde(default)]
    pub denom_creation_fee: Vec<Coin>,
}

impl Params {
    /// Creates params with the given creation fee.
    pub fn new(denom_creation_fee: Vec<Coin>) -> Self {
        Self { denom_creation_fee }
    }

    /// Validates the creation fee: valid denoms, no duplicates, no zero amounts.
    pub fn validate(&self) -> Result<(), FactoryError> {
        let mut seen = BTreeSet::new();
        for coin in &self.denom_creation_fee {
            validate_denom(&coin.denom)
                .map_err(|e| FactoryError::InvalidParams(e.to_string()))?;
            if coin.is_zero() {
                return Err(FactoryError::InvalidParams(format!(
                    "zero amount in denom creation fee for {}",
                    coin.denom
                )));
            }
            if !seen.insert(coin.denom.as_str()) {
                return Err(FactoryError::InvalidParams(format!(
                    "duplicate denom {} in denom creation fee",
                    coin.denom
                )));
            }
        }
        Ok(())
    }
}

/// A unit of a denomination for display purposes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenomUnit {
    /// The unit name
    pub denom: String,
    /// Power of ten relative to the base unit
    pub exponent: u32,
    /// Alternative names
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Display metadata held by the ledger for a denomination.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenomMetadata {
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Units, base unit first
    #[serde(default)]
    pub denom_units: Vec<DenomUnit>,
    /// The base denomination
    pub base: String,
    /// The unit shown to users
    #[serde(default)]
    pub display: String,
    /// Human readable name
    #[serde(default)]
    pub name: String,
    /// Ticker symbol
    #[serde(default)]
    pub symbol: String,
}

impl DenomMetadata {
    /// The record written for a freshly created denom: one unit at exponent zero.
    pub fn minimal(denom: &str) -> Self {
        Self {
            denom_units: vec![DenomUnit {
                denom: denom.to_string(),
                exponent: 0,
                aliases: Vec::new(),
            }],
            base: denom.to_string(),
            display: denom.to_string(),
            ..Default::default()
        }
    }
}

//! Error types for the core crate.

use thiserror::Error;

/// Errors that can occur in the core crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FactoryError {
    /// Error when a subdenom is too long or contains characters outside the denom alphabet.
    #[error("Invalid subdenom: {0}")]
    InvalidSubdenom(String),

    /// Error when a creator address cannot be embedded in a denomination.
    #[error("Invalid creator: {0}")]
    InvalidCreator(String),

    /// Error when a denomination is malformed or not a factory denomination.
    #[error("Invalid denom: {0}")]
    InvalidDenom(String),

    /// Error when an address (sender, admin, recipient) is malformed.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Error when a creation request collides with an existing denomination.
    #[error("Attempting to create a denom that already exists: {0}")]
    DenomAlreadyExists(String),

    /// Error when an operation references an unregistered denomination.
    #[error("Denom does not exist: {0}")]
    DenomDoesNotExist(String),

    /// Error when the caller is not the current admin of a denomination.
    #[error("Unauthorized account {sender} for denom {denom}")]
    Unauthorized {
        /// The account that attempted the operation
        sender: String,
        /// The denomination the operation targeted
        denom: String,
    },

    /// Error when a mint or burn amount is zero.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Error when the creator cannot pay the denom creation fee.
    #[error("Insufficient funds to pay creation fee: required {required}{denom}, available {available}{denom}")]
    InsufficientFunds {
        /// The fee denomination that could not be covered
        denom: String,
        /// The required amount
        required: u128,
        /// The available amount
        available: u128,
    },

    /// Error when an account's spendable balance is below the requested amount.
    #[error("Insufficient balance: required {required}{denom}, available {available}{denom}")]
    InsufficientBalance {
        /// The denomination being debited
        denom: String,
        /// The required amount
        required: u128,
        /// The available amount
        available: u128,
    },

    /// Error when a balance or supply counter would overflow.
    #[error("Amount overflow for denom {0}")]
    AmountOverflow(String),

    /// Error when module parameters fail validation.
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// Error when a genesis document fails validation.
    #[error("Invalid genesis: {0}")]
    InvalidGenesis(String),

    /// Error when the backing key-value store fails.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Error when serialization or deserialization fails.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<bincode::Error> for FactoryError {
    fn from(error: bincode::Error) -> Self {
        FactoryError::SerializationError(error.to_string())
    }
}

impl From<serde_json::Error> for FactoryError {
    fn from(error: serde_json::Error) -> Self {
        FactoryError::SerializationError(error.to_string())
    }
}

/// Convenience alias used throughout the core crate.
pub type Result<T> = std::result::Result<T, FactoryError>;

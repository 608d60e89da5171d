//! Factory denomination naming.
//!
//! A factory denomination is the path `factory/<creator>/<subdenom>`. The
//! creator address is embedded in the name, so two creators can never collide
//! and a single creator only collides with itself when reusing a subdenom.
//! Names are case-sensitive and never normalized.

use crate::errors::FactoryError;

/// First path segment of every factory denomination.
pub const MODULE_DENOM_PREFIX: &str = "factory";

/// Maximum length of the creator-chosen subdenom.
pub const MAX_SUBDENOM_LENGTH: usize = 44;

/// Maximum length of a bech32 human readable part.
pub const MAX_HRP_LENGTH: usize = 16;

/// Maximum length of a creator address embedded in a denomination.
pub const MAX_CREATOR_LENGTH: usize = 59 + MAX_HRP_LENGTH;

const MIN_DENOM_LENGTH: usize = 3;
const MAX_DENOM_LENGTH: usize = 128;

fn is_denom_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '/' | ':' | '.' | '_' | '-')
}

/// Validates a ledger denomination against `[a-zA-Z][a-zA-Z0-9/:._-]{2,127}`.
pub fn validate_denom(denom: &str) -> Result<(), FactoryError> {
    if denom.len() < MIN_DENOM_LENGTH || denom.len() > MAX_DENOM_LENGTH {
        return Err(FactoryError::InvalidDenom(format!(
            "{}: length must be between {} and {}",
            denom, MIN_DENOM_LENGTH, MAX_DENOM_LENGTH
        )));
    }
    let mut chars = denom.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => {
            return Err(FactoryError::InvalidDenom(format!(
                "{}: must start with a letter",
                denom
            )))
        }
    }
    if let Some(bad) = chars.find(|c| !is_denom_char(*c)) {
        return Err(FactoryError::InvalidDenom(format!(
            "{}: invalid character '{}'",
            denom, bad
        )));
    }
    Ok(())
}

/// Validates an account address string.
///
/// Addresses are non-empty ASCII alphanumeric strings of at most
/// [`MAX_CREATOR_LENGTH`] characters. This covers both bech32 and hex
/// encodings and guarantees an address never contains the `/` separator.
pub fn validate_address(address: &str) -> Result<(), FactoryError> {
    if address.is_empty() {
        return Err(FactoryError::InvalidAddress("empty address".to_string()));
    }
    if address.len() > MAX_CREATOR_LENGTH {
        return Err(FactoryError::InvalidAddress(format!(
            "{}: longer than {} characters",
            address, MAX_CREATOR_LENGTH
        )));
    }
    if let Some(bad) = address.chars().find(|c| !c.is_ascii_alphanumeric()) {
        return Err(FactoryError::InvalidAddress(format!(
            "{}: invalid character '{}'",
            address, bad
        )));
    }
    Ok(())
}

fn validate_subdenom(subdenom: &str) -> Result<(), FactoryError> {
    if subdenom.is_empty() {
        return Err(FactoryError::InvalidSubdenom("empty subdenom".to_string()));
    }
    if subdenom.len() > MAX_SUBDENOM_LENGTH {
        return Err(FactoryError::InvalidSubdenom(format!(
            "{}: subdenom too long, max length is {} bytes",
            subdenom, MAX_SUBDENOM_LENGTH
        )));
    }
    if let Some(bad) = subdenom.chars().find(|c| !is_denom_char(*c)) {
        return Err(FactoryError::InvalidSubdenom(format!(
            "{}: invalid character '{}'",
            subdenom, bad
        )));
    }
    Ok(())
}

/// Derives the factory denomination for `(creator, subdenom)`.
///
/// Pure and side-effect free.
pub fn get_token_denom(creator: &str, subdenom: &str) -> Result<String, FactoryError> {
    validate_subdenom(subdenom)?;
    validate_address(creator).map_err(|e| match e {
        FactoryError::InvalidAddress(msg) => FactoryError::InvalidCreator(msg),
        other => other,
    })?;

    let denom = format!("{}/{}/{}", MODULE_DENOM_PREFIX, creator, subdenom);
    validate_denom(&denom)?;
    Ok(denom)
}

/// Splits a factory denomination into `(creator, subdenom)`.
///
/// The subdenom is everything after the creator segment, so subdenoms that
/// themselves contain `/` are recovered intact.
pub fn deconstruct_denom(denom: &str) -> Result<(String, String), FactoryError> {
    validate_denom(denom)?;

    let parts: Vec<&str> = denom.split('/').collect();
    if parts[0] != MODULE_DENOM_PREFIX {
        return Err(FactoryError::InvalidDenom(format!(
            "{}: denom prefix is incorrect, expected '{}'",
            denom, MODULE_DENOM_PREFIX
        )));
    }
    if parts.len() < 3 {
        return Err(FactoryError::InvalidDenom(format!(
            "{}: not enough parts of denom",
            denom
        )));
    }

    let creator = parts[1];
    validate_address(creator)
        .map_err(|e| FactoryError::InvalidDenom(format!("{}: invalid creator: {}", denom, e)))?;

    Ok((creator.to_string(), parts[2..].join("/")))
}

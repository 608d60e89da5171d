//! Request types accepted by the registry and their dispatch.

use crate::denom::{deconstruct_denom, get_token_denom, validate_address, validate_denom};
use crate::errors::{FactoryError, Result};
use crate::expected::{AccountKeeper, Ledger, ParamStore};
use crate::keeper::Keeper;
use crate::store::KvStore;
use crate::types::{Address, AuthorityMetadata, Coin, DenomMetadata, Params};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A state-mutating request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Msg {
    /// Create `factory/<sender>/<subdenom>`.
    CreateDenom {
        /// The creator
        sender: Address,
        /// The creator-chosen suffix
        subdenom: String,
    },
    /// Mint to the sender.
    Mint {
        /// The admin
        sender: Address,
        /// Amount and denom to mint
        amount: Coin,
    },
    /// Burn from the sender.
    Burn {
        /// The admin
        sender: Address,
        /// Amount and denom to burn
        amount: Coin,
    },
    /// Reassign or drop admin rights.
    ChangeAdmin {
        /// The current admin
        sender: Address,
        /// The denomination
        denom: String,
        /// The new admin; empty orphans the denom
        new_admin: Address,
    },
    /// Set or clear the before-send hook.
    SetBeforeSendHook {
        /// The admin
        sender: Address,
        /// The denomination
        denom: String,
        /// The hook; empty clears it
        before_send_hook_address: Address,
    },
    /// Replace ledger display metadata.
    SetDenomMetadata {
        /// The admin
        sender: Address,
        /// The new metadata, keyed by its base denom
        metadata: DenomMetadata,
    },
}

impl Msg {
    /// The account that signed the request.
    pub fn sender(&self) -> &str {
        match self {
            Msg::CreateDenom { sender, .. }
            | Msg::Mint { sender, .. }
            | Msg::Burn { sender, .. }
            | Msg::ChangeAdmin { sender, .. }
            | Msg::SetBeforeSendHook { sender, .. }
            | Msg::SetDenomMetadata { sender, .. } => sender,
        }
    }

    /// Stable message type name.
    pub fn msg_type(&self) -> &'static str {
        match self {
            Msg::CreateDenom { .. } => "create_denom",
            Msg::Mint { .. } => "tf_mint",
            Msg::Burn { .. } => "tf_burn",
            Msg::ChangeAdmin { .. } => "change_admin",
            Msg::SetBeforeSendHook { .. } => "set_before_send_hook",
            Msg::SetDenomMetadata { .. } => "set_denom_metadata",
        }
    }

    /// Stateless checks, run before any state is read.
    pub fn validate_basic(&self) -> Result<()> {
        validate_address(self.sender())?;

        match self {
            Msg::CreateDenom { sender, subdenom } => {
                get_token_denom(sender, subdenom)?;
            }
            Msg::Mint { amount, .. } | Msg::Burn { amount, .. } => {
                validate_denom(&amount.denom)?;
                if amount.is_zero() {
                    return Err(FactoryError::InvalidAmount(format!(
                        "amount must be positive, got {}",
                        amount
                    )));
                }
            }
            Msg::ChangeAdmin { denom, new_admin, .. } => {
                deconstruct_denom(denom)?;
                if !new_admin.is_empty() {
                    validate_address(new_admin)?;
                }
            }
            Msg::SetBeforeSendHook {
                denom,
                before_send_hook_address,
                ..
            } => {
                deconstruct_denom(denom)?;
                if !before_send_hook_address.is_empty() {
                    validate_address(before_send_hook_address)?;
                }
            }
            Msg::SetDenomMetadata { metadata, .. } => {
                deconstruct_denom(&metadata.base)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Msg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Msg::CreateDenom { sender, subdenom } => {
                write!(f, "CreateDenom {{ sender: {}, subdenom: {} }}", sender, subdenom)
            }
            Msg::Mint { sender, amount } => {
                write!(f, "Mint {{ sender: {}, amount: {} }}", sender, amount)
            }
            Msg::Burn { sender, amount } => {
                write!(f, "Burn {{ sender: {}, amount: {} }}", sender, amount)
            }
            Msg::ChangeAdmin { sender, denom, new_admin } => write!(
                f,
                "ChangeAdmin {{ sender: {}, denom: {}, new_admin: {} }}",
                sender, denom, new_admin
            ),
            Msg::SetBeforeSendHook {
                sender,
                denom,
                before_send_hook_address,
            } => write!(
                f,
                "SetBeforeSendHook {{ sender: {}, denom: {}, hook: {} }}",
                sender, denom, before_send_hook_address
            ),
            Msg::SetDenomMetadata { sender, metadata } => write!(
                f,
                "SetDenomMetadata {{ sender: {}, denom: {} }}",
                sender, metadata.base
            ),
        }
    }
}

/// Result of a successfully applied [`Msg`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MsgResponse {
    /// The denomination that was created.
    CreateDenom {
        /// `factory/<creator>/<subdenom>`
        new_token_denom: String,
    },
    /// Nothing to report.
    Empty,
}

/// A read-only request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Query {
    /// Current module parameters.
    Params,
    /// Authority record of a denom.
    DenomAuthorityMetadata {
        /// The denomination
        denom: String,
    },
    /// Denoms created by an address.
    DenomsFromCreator {
        /// The creator
        creator: Address,
    },
    /// Before-send hook of a denom.
    BeforeSendHookAddress {
        /// The denomination
        denom: String,
    },
}

/// Answer to a [`Query`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryResponse {
    /// Module parameters
    Params {
        /// The parameters
        params: Params,
    },
    /// Authority record
    DenomAuthorityMetadata {
        /// The record
        authority_metadata: AuthorityMetadata,
    },
    /// Denoms of a creator
    DenomsFromCreator {
        /// Lexicographically ordered denoms
        denoms: Vec<String>,
    },
    /// Before-send hook
    BeforeSendHookAddress {
        /// The hook, empty if none
        before_send_hook_address: Address,
    },
}

impl<S, L, A, P> Keeper<S, L, A, P>
where
    S: KvStore,
    L: Ledger,
    A: AccountKeeper,
    P: ParamStore,
{
    /// Validates and executes a request.
    pub fn apply(&mut self, msg: Msg) -> Result<MsgResponse> {
        msg.validate_basic()?;

        match msg {
            Msg::CreateDenom { sender, subdenom } => {
                let new_token_denom = self.create_denom(&sender, &subdenom)?;
                Ok(MsgResponse::CreateDenom { new_token_denom })
            }
            Msg::Mint { sender, amount } => {
                self.mint(&sender, &amount)?;
                Ok(MsgResponse::Empty)
            }
            Msg::Burn { sender, amount } => {
                self.burn(&sender, &amount)?;
                Ok(MsgResponse::Empty)
            }
            Msg::ChangeAdmin {
                sender,
                denom,
                new_admin,
            } => {
                self.change_admin(&sender, &denom, &new_admin)?;
                Ok(MsgResponse::Empty)
            }
            Msg::SetBeforeSendHook {
                sender,
                denom,
                before_send_hook_address,
            } => {
                self.set_before_send_hook(&sender, &denom, &before_send_hook_address)?;
                Ok(MsgResponse::Empty)
            }
            Msg::SetDenomMetadata { sender, metadata } => {
                self.set_denom_metadata(&sender, &metadata)?;
                Ok(MsgResponse::Empty)
            }
        }
    }

    /// Answers a read-only request.
    pub fn query(&self, query: &Query) -> Result<QueryResponse> {
        match query {
            Query::Params => Ok(QueryResponse::Params {
                params: self.get_params()?,
            }),
            Query::DenomAuthorityMetadata { denom } => Ok(QueryResponse::DenomAuthorityMetadata {
                authority_metadata: self.get_authority_metadata(denom)?,
            }),
            Query::DenomsFromCreator { creator } => Ok(QueryResponse::DenomsFromCreator {
                denoms: self.get_denoms_from_creator(creator)?,
            }),
            Query::BeforeSendHookAddress { denom } => Ok(QueryResponse::BeforeSendHookAddress {
                before_send_hook_address: self.get_before_send_hook(denom)?,
            }),
        }
    }
}

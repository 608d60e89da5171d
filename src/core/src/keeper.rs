//! The registry keeper: creation, admin-gated mutation and lookups.
//!
//! Every operation runs to completion against the current state. All checks
//! that can fail happen before the first write, and the only fallible ledger
//! mutation in `create_denom` (the fee charge) is itself all-or-nothing and
//! precedes any registry write, so a failed operation leaves no trace.

use crate::authority::{AuthorityStore, CreatorIndex};
use crate::denom::{get_token_denom, validate_address, validate_denom};
use crate::errors::{FactoryError, Result};
use crate::events::{Event, EventManager};
use crate::expected::{AccountKeeper, Ledger, ParamStore};
use crate::store::KvStore;
use crate::types::{Address, AuthorityMetadata, Coin, DenomMetadata, Params};
use tracing::{debug, info, warn};

/// Name of the module; also seeds the holding account address.
pub const MODULE_NAME: &str = "tokenfactory";

/// Owns the registry store and the collaborators it writes through.
pub struct Keeper<S, L, A, P> {
    store: S,
    ledger: L,
    accounts: A,
    params: P,
    events: EventManager,
}

impl<S, L, A, P> Keeper<S, L, A, P>
where
    S: KvStore,
    L: Ledger,
    A: AccountKeeper,
    P: ParamStore,
{
    /// Creates a keeper over the module store and its collaborators.
    pub fn new(store: S, ledger: L, accounts: A, params: P) -> Self {
        Self {
            store,
            ledger,
            accounts,
            params,
            events: EventManager::new(),
        }
    }

    /// The module store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The ledger collaborator.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutable access to the ledger, for hosts that also drive transfers.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// The account collaborator.
    pub fn accounts(&self) -> &A {
        &self.accounts
    }

    /// Mutable access to the account collaborator.
    pub fn accounts_mut(&mut self) -> &mut A {
        &mut self.accounts
    }

    /// Events emitted since the last drain.
    pub fn events(&self) -> &EventManager {
        &self.events
    }

    /// Drains the emitted events.
    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take()
    }

    pub(crate) fn emit(&mut self, event: Event) {
        debug!("Emitting event: {}", event);
        self.events.emit(event);
    }

    /// Address of the holding account that collects creation fees.
    pub fn module_address(&self) -> Address {
        self.accounts.module_address(MODULE_NAME)
    }

    /// Reads the current parameters.
    pub fn get_params(&self) -> Result<Params> {
        self.params.get_params()
    }

    /// Validates and stores new parameters.
    pub fn set_params(&mut self, params: &Params) -> Result<()> {
        params.validate()?;
        self.params.set_params(params)?;
        info!("Set denom creation fee to {:?}", params.denom_creation_fee);
        Ok(())
    }

    /// Creates the module holding account if it does not exist yet.
    pub fn create_module_account(&mut self) -> Result<()> {
        let address = self.module_address();
        if self.accounts.get_account(&address)?.is_some() {
            debug!("Module account {} already exists", address);
            return Ok(());
        }
        self.accounts.create_module_account(&address, MODULE_NAME)?;
        info!("Created module account {}", address);
        Ok(())
    }

    /// Creates `factory/<creator>/<subdenom>` with `creator` as admin, charging
    /// the configured creation fee.
    pub fn create_denom(&mut self, creator: &str, subdenom: &str) -> Result<String> {
        debug!("Creating denom with subdenom '{}' for {}", subdenom, creator);

        let denom = self.validate_create_denom(creator, subdenom)?;
        self.charge_for_create_denom(creator)?;
        self.register_denom(creator, &denom, &AuthorityMetadata::with_admin(creator))?;

        self.emit(Event::CreateDenom {
            creator: creator.to_string(),
            new_token_denom: denom.clone(),
        });
        info!("Created denom {} for {}", denom, creator);

        Ok(denom)
    }

    fn validate_create_denom(&self, creator: &str, subdenom: &str) -> Result<String> {
        let denom = get_token_denom(creator, subdenom)?;

        if self.store.has_authority_metadata(&denom)? {
            return Err(FactoryError::DenomAlreadyExists(denom));
        }
        // A display record under this name means the ledger already knows it.
        if self.ledger.get_denom_metadata(&denom)?.is_some() {
            return Err(FactoryError::DenomAlreadyExists(denom));
        }

        Ok(denom)
    }

    fn charge_for_create_denom(&mut self, creator: &str) -> Result<()> {
        let fee = self.get_params()?.denom_creation_fee;
        if fee.iter().all(Coin::is_zero) {
            return Ok(());
        }

        let module_address = self.module_address();
        self.ledger
            .send_coins(creator, &module_address, &fee)
            .map_err(|e| match e {
                FactoryError::InsufficientBalance {
                    denom,
                    required,
                    available,
                } => FactoryError::InsufficientFunds {
                    denom,
                    required,
                    available,
                },
                other => other,
            })?;

        debug!("Charged {:?} from {} for denom creation", fee, creator);
        Ok(())
    }

    /// Writes the authority record and the creator index entry for a denom
    /// that has already passed validation, back-filling display metadata.
    pub(crate) fn register_denom(
        &mut self,
        creator: &str,
        denom: &str,
        metadata: &AuthorityMetadata,
    ) -> Result<()> {
        if self.ledger.get_denom_metadata(denom)?.is_none() {
            self.ledger
                .set_denom_metadata(denom, &DenomMetadata::minimal(denom))?;
        }
        self.store.set_authority_metadata(denom, metadata)?;
        self.store.add_denom_from_creator(creator, denom)?;
        Ok(())
    }

    /// Loads the authority record and checks `sender` is its current admin.
    fn authorize(&self, sender: &str, denom: &str) -> Result<AuthorityMetadata> {
        let metadata = self.get_authority_metadata(denom)?;
        if !metadata.is_admin(sender) {
            warn!(
                "Rejected {} acting on {} (admin: '{}')",
                sender, denom, metadata.admin
            );
            return Err(FactoryError::Unauthorized {
                sender: sender.to_string(),
                denom: denom.to_string(),
            });
        }
        Ok(metadata)
    }

    /// Mints `coin` to `sender`, who must be the denom's admin.
    pub fn mint(&mut self, sender: &str, coin: &Coin) -> Result<()> {
        if coin.is_zero() {
            return Err(FactoryError::InvalidAmount(format!(
                "mint amount must be positive, got {}",
                coin
            )));
        }
        self.authorize(sender, &coin.denom)?;

        self.ledger.mint(sender, coin)?;

        self.emit(Event::Mint {
            mint_to_address: sender.to_string(),
            amount: coin.clone(),
        });
        info!("Minted {} to {}", coin, sender);
        Ok(())
    }

    /// Burns `coin` from `sender`, who must be the denom's admin.
    ///
    /// The balance check belongs to the ledger.
    pub fn burn(&mut self, sender: &str, coin: &Coin) -> Result<()> {
        if coin.is_zero() {
            return Err(FactoryError::InvalidAmount(format!(
                "burn amount must be positive, got {}",
                coin
            )));
        }
        self.authorize(sender, &coin.denom)?;

        self.ledger.burn(sender, coin)?;

        self.emit(Event::Burn {
            burn_from_address: sender.to_string(),
            amount: coin.clone(),
        });
        info!("Burned {} from {}", coin, sender);
        Ok(())
    }

    /// Hands admin rights over `denom` to `new_admin`.
    ///
    /// An empty `new_admin` orphans the denom permanently.
    pub fn change_admin(&mut self, sender: &str, denom: &str, new_admin: &str) -> Result<()> {
        if !new_admin.is_empty() {
            validate_address(new_admin)?;
        }
        let mut metadata = self.authorize(sender, denom)?;

        metadata.admin = new_admin.to_string();
        self.store.set_authority_metadata(denom, &metadata)?;

        self.emit(Event::ChangeAdmin {
            denom: denom.to_string(),
            new_admin: new_admin.to_string(),
        });
        if new_admin.is_empty() {
            info!("Denom {} is now orphaned", denom);
        } else {
            info!("Changed admin of {} from {} to {}", denom, sender, new_admin);
        }
        Ok(())
    }

    /// Sets or, with an empty `hook`, clears the before-send hook of `denom`.
    pub fn set_before_send_hook(&mut self, sender: &str, denom: &str, hook: &str) -> Result<()> {
        if !hook.is_empty() {
            validate_address(hook)?;
        }
        let mut metadata = self.authorize(sender, denom)?;

        metadata.before_send_hook_address = hook.to_string();
        self.store.set_authority_metadata(denom, &metadata)?;

        self.emit(Event::SetBeforeSendHook {
            denom: denom.to_string(),
            before_send_hook_address: hook.to_string(),
        });
        info!("Set before-send hook of {} to '{}'", denom, hook);
        Ok(())
    }

    /// Replaces the ledger display metadata of `metadata.base`.
    pub fn set_denom_metadata(&mut self, sender: &str, metadata: &DenomMetadata) -> Result<()> {
        validate_denom(&metadata.base)?;
        self.authorize(sender, &metadata.base)?;

        self.ledger.set_denom_metadata(&metadata.base, metadata)?;

        self.emit(Event::SetDenomMetadata {
            denom: metadata.base.clone(),
            metadata: metadata.clone(),
        });
        info!("Set display metadata of {}", metadata.base);
        Ok(())
    }

    /// The authority record of `denom`.
    pub fn get_authority_metadata(&self, denom: &str) -> Result<AuthorityMetadata> {
        self.store
            .get_authority_metadata(denom)?
            .ok_or_else(|| FactoryError::DenomDoesNotExist(denom.to_string()))
    }

    /// Every denom created by `creator`, in lexicographic order.
    pub fn get_denoms_from_creator(&self, creator: &str) -> Result<Vec<String>> {
        self.store.iterate_denoms_from_creator(creator)?.collect()
    }

    /// The before-send hook of `denom`; empty if none is set or the denom is unknown.
    pub fn get_before_send_hook(&self, denom: &str) -> Result<Address> {
        Ok(self
            .store
            .get_authority_metadata(denom)?
            .map(|metadata| metadata.before_send_hook_address)
            .unwrap_or_default())
    }
}

//! Store-backed parameter space.

use factory_core::errors::Result;
use factory_core::expected::ParamStore;
use factory_core::store::{get_value, set_value, KvStore};
use factory_core::types::Params;

const PARAMS_KEY: &[u8] = b"params";

/// Holds the module's single `Params` record.
pub struct ParamSpace<S> {
    store: S,
}

impl<S: KvStore> ParamSpace<S> {
    /// Creates a parameter space over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KvStore> ParamStore for ParamSpace<S> {
    fn get_params(&self) -> Result<Params> {
        Ok(get_value(&self.store, PARAMS_KEY)?.unwrap_or_default())
    }

    fn set_params(&mut self, params: &Params) -> Result<()> {
        set_value(&mut self.store, PARAMS_KEY, params)
    }
}

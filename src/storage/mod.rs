//! Persistence of the cart snapshot in a synchronous key-value store.

pub mod in_memory;
pub mod json_file;

pub use in_memory::*;
pub use json_file::*;

use tracing::{debug, instrument};
use crate::domain::Cart;
use crate::error::StorageError;

/// Default key the cart snapshot is stored under.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Synchronous string key-value store.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Reads and writes the serialized cart under one fixed key.
pub struct CartStorage {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl CartStorage {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self::with_key(store, CART_STORAGE_KEY)
    }

    pub fn with_key(store: impl KeyValueStore + 'static, key: impl Into<String>) -> Self {
        Self {
            store: Box::new(store),
            key: key.into(),
        }
    }

    /// Loads the stored snapshot.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn load(&self) -> Result<Option<Cart>, StorageError> {
        let Some(raw) = self.store.get(&self.key)? else {
            debug!("No stored cart");
            return Ok(None);
        };
        let cart: Cart = serde_json::from_str(&raw)?;
        debug!(items = cart.len(), "Stored cart loaded");
        Ok(Some(cart))
    }

    /// Serializes the full cart and writes it under the storage key.
    #[instrument(skip(self, cart), fields(key = %self.key, items = cart.len()))]
    pub fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        let raw = serde_json::to_string(cart)?;
        self.store.set(&self.key, &raw)?;
        debug!("Cart saved");
        Ok(())
    }
}

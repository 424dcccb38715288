use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use crate::api::{CartApi, HttpApi};
use crate::cart_actor::CartService;
use crate::clients::CartClient;
use crate::domain::Cart;
use crate::error::ConfigError;
use crate::notify::{Notifier, TracingNotifier};
use crate::storage::{CartStorage, JsonFileStore};
use super::CartConfig;

/// The application system that owns the cart actor.
///
/// Built once at startup; `cart_client` is the handle passed to whatever UI
/// layer needs the cart.
pub struct CartSystem {
    pub cart_client: CartClient,
    handle: JoinHandle<()>,
}

impl CartSystem {
    /// Wires the HTTP API, the JSON file store and the tracing notifier from `config`.
    pub fn new(config: &CartConfig) -> Result<Self, ConfigError> {
        info!(api_url = %config.api_url, storage = %config.storage_path.display(), "Starting cart system");

        let api = HttpApi::new(&config.api_url, config.http_timeout)?;
        let storage = CartStorage::with_key(
            JsonFileStore::new(config.storage_path.clone()),
            config.storage_key.clone(),
        );

        Ok(Self::with_parts(config.channel_capacity, api, storage, TracingNotifier))
    }

    /// Starts the cart actor on explicit collaborators.
    ///
    /// Must be called inside a tokio runtime.
    pub fn with_parts(
        channel_capacity: usize,
        api: impl CartApi + 'static,
        storage: CartStorage,
        notifier: impl Notifier + 'static,
    ) -> Self {
        let initial = load_initial_cart(&storage);
        let (service, cart_client) = CartService::new(channel_capacity, initial, api, storage, notifier);
        let handle = tokio::spawn(service.run());

        Self { cart_client, handle }
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down cart system...");

        if let Err(e) = self.cart_client.shutdown().await {
            warn!(error = %e, "Cart service already stopped");
        }
        drop(self.cart_client);

        if let Err(e) = self.handle.await {
            error!("Cart task failed: {:?}", e);
            return Err(format!("Cart task failed: {:?}", e));
        }

        info!("Cart system shutdown complete.");
        Ok(())
    }
}

/// Seeds the cart from storage. A missing snapshot gives an empty cart, and
/// so does an unreadable one, after a warning.
fn load_initial_cart(storage: &CartStorage) -> Cart {
    match storage.load() {
        Ok(Some(cart)) => {
            info!(items = cart.len(), "Restored cart from storage");
            cart
        }
        Ok(None) => Cart::new(),
        Err(e) => {
            warn!(error = %e, "Stored cart unreadable, starting empty");
            Cart::new()
        }
    }
}

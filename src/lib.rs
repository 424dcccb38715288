//! # rocket-cart
//!
//! Shopping-cart state for a storefront: an ordered list of line items,
//! checked against a remote inventory service and persisted across restarts.
//!
//! - **Domain types** - [`Cart`], [`CartItem`] and [`Product`], pure values with copy-on-write updates
//! - **Cart actor** - [`CartService`] owns the cart and applies add, remove and update requests
//! - **Client** - [`CartClient`] is the cloneable handle given to the UI layer
//! - **Collaborators** - [`CartApi`] for stock and catalog lookups, [`CartStorage`] for the snapshot, [`Notifier`] for user messages
//! - **System** - [`CartSystem`] wires everything from a [`CartConfig`]
//!
//! ```rust,no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use rocket_cart::{CartConfig, CartSystem, UpdateProductAmount};
//!
//! let system = CartSystem::new(&CartConfig::from_env()?)?;
//! system.cart_client.add_product(1).await.ok();
//! system.cart_client.update_product_amount(UpdateProductAmount::new(1, 3)).await.ok();
//! let cart = system.cart_client.cart().await?;
//! println!("{} items", cart.total_items());
//! system.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod domain;
pub mod error;
pub mod api;
pub mod storage;
pub mod notify;
pub mod messages;
pub mod clients;
pub mod cart_actor;
pub mod app_system;

#[cfg(test)]
mod mock_framework;

pub use domain::{Cart, CartItem, Product, ProductId, UpdateProductAmount};
pub use error::{ApiError, CartError, CartOperation, ConfigError, StorageError};
pub use api::{CartApi, HttpApi};
pub use storage::{CartStorage, InMemoryStore, JsonFileStore, KeyValueStore, CART_STORAGE_KEY};
pub use notify::{Notifier, TracingNotifier};
pub use clients::CartClient;
pub use cart_actor::CartService;
pub use app_system::{setup_tracing, CartConfig, CartSystem};

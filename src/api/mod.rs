//! Storefront HTTP collaborators: the inventory (`/stock`) and catalog
//! (`/products`) endpoints.

pub mod http;

pub use http::*;

use async_trait::async_trait;
use crate::domain::{Product, ProductId};
use crate::error::ApiError;

/// Read-only access to the storefront services the cart depends on.
#[async_trait]
pub trait CartApi: Send + Sync {
    /// Current stock level of `id`.
    async fn stock(&self, id: ProductId) -> Result<u32, ApiError>;

    /// Catalog metadata of `id`.
    async fn product(&self, id: ProductId) -> Result<Product, ApiError>;
}

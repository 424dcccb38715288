use serde::{Deserialize, Serialize};

/// Catalog identifier of a product.
pub type ProductId = u64;

/// Represents a product as served by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub image: String,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Catalog identifier
    /// * `title` - Display title
    /// * `price` - Unit price
    /// * `image` - Image URL
    pub fn new(id: ProductId, title: impl Into<String>, price: f64, image: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            image: image.into(),
        }
    }
}

/// Payload for changing the amount of a product already in the cart.
///
/// `amount` is signed because the UI may hand over zero or negative values,
/// which are ignored rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

impl UpdateProductAmount {
    pub fn new(product_id: ProductId, amount: i64) -> Self {
        Self { product_id, amount }
    }
}

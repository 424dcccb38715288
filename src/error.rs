use thiserror::Error;
use crate::domain::ProductId;

/// Errors from the storefront HTTP API.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("service error: HTTP {status} from {url}")]
    Status { status: u16, url: String },
    #[error("parse error: {0}")]
    Parse(String),
}

/// Errors from loading or saving the cart snapshot.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from reading configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
    #[error("http client setup failed: {0}")]
    HttpClient(String),
}

/// Errors that abort a cart operation.
///
/// The cart is left unchanged whenever one of these is returned.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    StockExceeded { product_id: ProductId, requested: i64, available: u32 },
    #[error("Product not in cart: {0}")]
    NotFound(ProductId),
    #[error("Storefront API error: {0}")]
    Api(#[from] ApiError),
    #[error("Cart service unavailable: {0}")]
    ServiceUnavailable(String),
}

pub const OUT_OF_STOCK_MESSAGE: &str = "requested quantity is out of stock";

/// The three mutating cart operations, used to pick the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    Add,
    Remove,
    Update,
}

impl CartOperation {
    /// Generic failure message for this operation.
    pub fn failure_message(&self) -> &'static str {
        match self {
            CartOperation::Add => "error adding product",
            CartOperation::Remove => "error removing product",
            CartOperation::Update => "error updating product quantity",
        }
    }

    /// User-facing message for `error`.
    ///
    /// Only stock problems get their own text; not-found and transport
    /// failures share the generic message of the operation.
    pub fn message_for(&self, error: &CartError) -> &'static str {
        match error {
            CartError::StockExceeded { .. } => OUT_OF_STOCK_MESSAGE,
            _ => self.failure_message(),
        }
    }
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::CartApi;
use crate::domain::{Product, ProductId};
use crate::error::{ApiError, ConfigError};

/// Body of `GET /stock/{id}`.
#[derive(Debug, Deserialize)]
struct StockResponse {
    amount: i64,
}

impl StockResponse {
    /// Negative levels count as no stock; levels past `u32::MAX` saturate.
    fn level(&self) -> u32 {
        u32::try_from(self.amount.max(0)).unwrap_or(u32::MAX)
    }
}

/// HTTP client for the storefront API.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the storefront API (e.g., "http://localhost:3333")
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Sending request");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Status {
                status: response.status().as_u16(),
                url,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl CartApi for HttpApi {
    #[instrument(skip(self))]
    async fn stock(&self, id: ProductId) -> Result<u32, ApiError> {
        let body: StockResponse = self.get_json(&format!("/stock/{}", id)).await?;
        debug!(stock_level = body.amount, "Stock fetched");
        Ok(body.level())
    }

    #[instrument(skip(self))]
    async fn product(&self, id: ProductId) -> Result<Product, ApiError> {
        let product: Product = self.get_json(&format!("/products/{}", id)).await?;
        debug!(product_title = %product.title, "Product fetched");
        Ok(product)
    }
}

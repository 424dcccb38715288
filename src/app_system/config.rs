use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::storage::CART_STORAGE_KEY;

/// Runtime configuration for the cart system.
#[derive(Debug, Clone, PartialEq)]
pub struct CartConfig {
    /// Base URL of the storefront API serving `/stock` and `/products`.
    pub api_url: String,

    /// JSON file backing the persistent store.
    pub storage_path: PathBuf,

    /// Key the cart snapshot is stored under.
    pub storage_key: String,

    /// Per-request HTTP timeout.
    pub http_timeout: Duration,

    /// Capacity of the cart actor's request channel.
    pub channel_capacity: usize,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3333".to_string(),
            storage_path: PathBuf::from(".rocketshoes/storage.json"),
            storage_key: CART_STORAGE_KEY.to_string(),
            http_timeout: Duration::from_secs(10),
            channel_capacity: 32,
        }
    }
}

impl CartConfig {
    /// Create config from environment variables.
    ///
    /// - `CART_API_URL`: storefront API base URL (default: http://localhost:3333)
    /// - `CART_STORAGE_PATH`: storage file (default: .rocketshoes/storage.json)
    /// - `CART_STORAGE_KEY`: snapshot key (default: @RocketShoes:cart)
    /// - `CART_HTTP_TIMEOUT`: timeout in seconds (default: 10)
    /// - `CART_CHANNEL_CAPACITY`: actor channel capacity (default: 32)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`CartConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let timeout_secs: u64 = parse_var(&lookup, "CART_HTTP_TIMEOUT")?
            .unwrap_or(defaults.http_timeout.as_secs());
        let channel_capacity: usize = parse_var(&lookup, "CART_CHANNEL_CAPACITY")?
            .unwrap_or(defaults.channel_capacity);

        if channel_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "CART_CHANNEL_CAPACITY".to_string(),
                value: "0".to_string(),
            });
        }

        Ok(Self {
            api_url: lookup("CART_API_URL").unwrap_or(defaults.api_url),
            storage_path: lookup("CART_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_path),
            storage_key: lookup("CART_STORAGE_KEY").unwrap_or(defaults.storage_key),
            http_timeout: Duration::from_secs(timeout_secs),
            channel_capacity,
        })
    }

    /// Set the API base URL.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Set the storage file.
    pub fn with_storage_path(mut self, storage_path: impl Into<PathBuf>) -> Self {
        self.storage_path = storage_path.into();
        self
    }

    /// Set the snapshot key.
    pub fn with_storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = storage_key.into();
        self
    }

    /// Set the HTTP timeout.
    pub fn with_http_timeout(mut self, http_timeout: Duration) -> Self {
        self.http_timeout = http_timeout;
        self
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key: key.to_string(), value }),
    }
}

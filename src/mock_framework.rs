//! # Mock Framework
//!
//! Test doubles for the cart's collaborators.
//!
//! - [`StubApi`] answers stock and catalog lookups from in-memory tables and records every call.
//! - [`RecordingNotifier`] keeps every message shown to the user.
//! - [`CountingStore`] is an in-memory store that counts writes.
//! - [`MockStorefront`] is an in-process HTTP server for exercising [`HttpApi`](crate::api::HttpApi).
//!
//! All doubles are cheap to clone and clones share state, so a test keeps one
//! copy for assertions and hands the other to the system under test.

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::api::CartApi;
use crate::domain::{Product, ProductId};
use crate::error::{ApiError, StorageError};
use crate::notify::Notifier;
use crate::storage::{InMemoryStore, KeyValueStore};

/// A call observed by [`StubApi`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiCall {
    Stock(ProductId),
    Product(ProductId),
}

#[derive(Default)]
struct StubState {
    stock: HashMap<ProductId, u32>,
    products: HashMap<ProductId, Product>,
    failing: HashSet<ApiCall>,
    calls: Vec<ApiCall>,
}

/// In-memory [`CartApi`]. Unknown ids answer HTTP 404.
#[derive(Clone, Default)]
pub struct StubApi {
    state: Arc<Mutex<StubState>>,
}

impl StubApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, StubState> {
        self.state.lock().unwrap()
    }

    /// Registers a product in the catalog with `stock` units available.
    pub fn with_product(self, product: Product, stock: u32) -> Self {
        {
            let mut state = self.state();
            state.stock.insert(product.id, stock);
            state.products.insert(product.id, product);
        }
        self
    }

    pub fn set_stock(&self, id: ProductId, stock: u32) {
        self.state().stock.insert(id, stock);
    }

    /// Serves `product` for lookups of `id`, whatever `product.id` says.
    pub fn set_catalog_entry(&self, id: ProductId, product: Product) {
        self.state().products.insert(id, product);
    }

    /// Makes `call` fail with a network error.
    pub fn fail(&self, call: ApiCall) {
        self.state().failing.insert(call);
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.state().calls.clone()
    }

    fn answer<T>(&self, call: ApiCall, table: impl Fn(&StubState) -> Option<T>) -> Result<T, ApiError> {
        let mut state = self.state();
        state.calls.push(call);

        if state.failing.contains(&call) {
            return Err(ApiError::Network("connection reset by stub".to_string()));
        }

        table(&*state).ok_or_else(|| ApiError::Status {
            status: 404,
            url: format!("stub://{:?}", call),
        })
    }
}

#[async_trait]
impl CartApi for StubApi {
    async fn stock(&self, id: ProductId) -> Result<u32, ApiError> {
        self.answer(ApiCall::Stock(id), |state| state.stock.get(&id).copied())
    }

    async fn product(&self, id: ProductId) -> Result<Product, ApiError> {
        self.answer(ApiCall::Product(id), |state| state.products.get(&id).cloned())
    }
}

/// Notifier that records every message.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// In-memory store that counts `set` calls and can be made to fail them.
#[derive(Clone, Default)]
pub struct CountingStore {
    inner: InMemoryStore,
    writes: Arc<AtomicUsize>,
    fail_writes: Arc<Mutex<bool>>,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self) {
        *self.fail_writes.lock().unwrap() = true;
    }
}

impl KeyValueStore for CountingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "store is read-only",
            )));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value)
    }
}

#[derive(Default)]
struct StorefrontState {
    stock: HashMap<ProductId, i64>,
    products: HashMap<ProductId, serde_json::Value>,
}

type SharedStorefront = Arc<RwLock<StorefrontState>>;

/// In-process storefront API on a random local port.
///
/// Serves `GET /stock/{id}` and `GET /products/{id}`; ids that were never
/// configured answer 404.
pub struct MockStorefront {
    state: SharedStorefront,
    addr: SocketAddr,
    _handle: JoinHandle<()>,
}

impl MockStorefront {
    pub async fn start() -> Self {
        let state = SharedStorefront::default();

        // Bind to port 0 to get a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock storefront");
        let addr = listener.local_addr().expect("Failed to get local address");

        let app = Router::new()
            .route("/stock/:id", get(handle_stock))
            .route("/products/:id", get(handle_product))
            .with_state(state.clone());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Mock storefront failed");
        });

        Self {
            state,
            addr,
            _handle: handle,
        }
    }

    /// Base URL of this server (e.g., "http://127.0.0.1:12345").
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Serves `{"amount": amount}` for `/stock/{id}`; any integer is accepted.
    pub async fn set_stock(&self, id: ProductId, amount: i64) {
        self.state.write().await.stock.insert(id, amount);
    }

    pub async fn set_product(&self, product: &Product) {
        let body = serde_json::to_value(product).expect("Product serializes");
        self.set_product_json(product.id, body).await;
    }

    /// Serves `body` verbatim for `/products/{id}`.
    pub async fn set_product_json(&self, id: ProductId, body: serde_json::Value) {
        self.state.write().await.products.insert(id, body);
    }
}

async fn handle_stock(
    State(state): State<SharedStorefront>,
    Path(id): Path<ProductId>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let state = state.read().await;
    let amount = state.stock.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(serde_json::json!({ "id": id, "amount": amount })))
}

async fn handle_product(
    State(state): State<SharedStorefront>,
    Path(id): Path<ProductId>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let state = state.read().await;
    state.products.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stub_api_records_calls_and_fails_on_demand() {
        let api = StubApi::new().with_product(Product::new(1, "Tenis", 99.0, "t.jpg"), 2);
        api.fail(ApiCall::Product(1));

        assert_eq!(api.stock(1).await, Ok(2));
        assert!(matches!(api.product(1).await, Err(ApiError::Network(_))));
        assert!(matches!(api.stock(2).await, Err(ApiError::Status { status: 404, .. })));

        assert_eq!(
            api.calls(),
            vec![ApiCall::Stock(1), ApiCall::Product(1), ApiCall::Stock(2)]
        );
    }

    #[test]
    fn test_counting_store_counts_writes() {
        let store = CountingStore::new();
        store.set("k", "v").unwrap();
        store.set("k", "w").unwrap();

        assert_eq!(store.writes(), 2);
        assert_eq!(store.get("k").unwrap(), Some("w".to_string()));

        store.fail_writes();
        assert!(store.set("k", "x").is_err());
        assert_eq!(store.writes(), 2);
    }
}

//! Product store contract and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use common::ProductId;
use domain::Product;

use crate::error::{Result, StoreError};

/// Read access to product records.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Fetches a product by id.
    async fn get_by_id(&self, id: ProductId) -> Result<Product>;
}

#[derive(Debug, Default)]
struct InMemoryProductState {
    products: HashMap<ProductId, Product>,
    delay: Option<Duration>,
    get_calls: u64,
    fail_on_get: bool,
}

/// In-memory product store for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductStore {
    state: Arc<RwLock<InMemoryProductState>>,
}

impl InMemoryProductStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a product record.
    pub fn insert(&self, product: Product) {
        self.state
            .write()
            .unwrap()
            .products
            .insert(product.id, product);
    }

    /// Delays every subsequent fetch.
    pub fn set_delay(&self, delay: Duration) {
        self.state.write().unwrap().delay = Some(delay);
    }

    /// Configures the store to fail every subsequent fetch.
    pub fn set_fail_on_get(&self, fail: bool) {
        self.state.write().unwrap().fail_on_get = fail;
    }

    /// Number of `get_by_id` calls observed.
    pub fn get_calls(&self) -> u64 {
        self.state.read().unwrap().get_calls
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn get_by_id(&self, id: ProductId) -> Result<Product> {
        let delay = {
            let mut state = self.state.write().unwrap();
            state.get_calls += 1;
            state.delay
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let state = self.state.read().unwrap();
        if state.fail_on_get {
            return Err(StoreError::Internal("product store unavailable".to_string()));
        }
        state.products.get(&id).cloned().ok_or(StoreError::NotFound)
    }
}

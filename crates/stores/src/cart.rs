//! Cart store contract and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::CartId;
use domain::Cart;

use crate::error::{Result, StoreError};

/// Access to cart records.
///
/// Checkout reads the cart once at the start of the operation and writes it
/// back exactly once after all orders have been persisted.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Fetches a cart by id.
    async fn get_by_id(&self, id: CartId) -> Result<Cart>;

    /// Replaces a cart record, returning the stored value.
    async fn update_one(&self, cart: Cart) -> Result<Cart>;
}

#[derive(Debug, Default)]
struct InMemoryCartState {
    carts: HashMap<CartId, Cart>,
    get_calls: u64,
    update_calls: u64,
    fail_on_update: bool,
}

/// In-memory cart store for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCartStore {
    state: Arc<RwLock<InMemoryCartState>>,
}

impl InMemoryCartStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a cart record.
    pub fn insert(&self, cart: Cart) {
        self.state.write().unwrap().carts.insert(cart.id, cart);
    }

    /// Returns the currently stored cart, if any.
    pub fn stored(&self, id: CartId) -> Option<Cart> {
        self.state.read().unwrap().carts.get(&id).cloned()
    }

    /// Configures the store to fail every subsequent update.
    pub fn set_fail_on_update(&self, fail: bool) {
        self.state.write().unwrap().fail_on_update = fail;
    }

    /// Number of `get_by_id` calls observed.
    pub fn get_calls(&self) -> u64 {
        self.state.read().unwrap().get_calls
    }

    /// Number of `update_one` calls observed.
    pub fn update_calls(&self) -> u64 {
        self.state.read().unwrap().update_calls
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn get_by_id(&self, id: CartId) -> Result<Cart> {
        let mut state = self.state.write().unwrap();
        state.get_calls += 1;
        state.carts.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn update_one(&self, cart: Cart) -> Result<Cart> {
        let mut state = self.state.write().unwrap();
        state.update_calls += 1;

        if state.fail_on_update {
            return Err(StoreError::Internal("cart store unavailable".to_string()));
        }

        if !state.carts.contains_key(&cart.id) {
            return Err(StoreError::NotFound);
        }
        state.carts.insert(cart.id, cart.clone());
        Ok(cart)
    }
}

//! Order store contract and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::OrderId;
use domain::Order;

use crate::error::{Result, StoreError};

/// Access to order records.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists a new order, returning the stored value.
    async fn create(&self, order: Order) -> Result<Order>;

    /// Fetches an order by id.
    async fn get_by_id(&self, id: OrderId) -> Result<Order>;

    /// Replaces an order record, returning the stored value.
    async fn update_one(&self, order: Order) -> Result<Order>;
}

#[derive(Debug, Default)]
struct InMemoryOrderState {
    orders: HashMap<OrderId, Order>,
    create_calls: u64,
    fail_on_create: bool,
    fail_after_creates: Option<u64>,
}

/// In-memory order store for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderStore {
    state: Arc<RwLock<InMemoryOrderState>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to fail every subsequent create.
    pub fn set_fail_on_create(&self, fail: bool) {
        self.state.write().unwrap().fail_on_create = fail;
    }

    /// Lets `n` creates succeed, then fails the rest.
    pub fn set_fail_after_creates(&self, n: u64) {
        self.state.write().unwrap().fail_after_creates = Some(n);
    }

    /// Number of orders currently persisted.
    pub fn order_count(&self) -> usize {
        self.state.read().unwrap().orders.len()
    }

    /// Number of `create` calls observed (including failed ones).
    pub fn create_calls(&self) -> u64 {
        self.state.read().unwrap().create_calls
    }

    /// Returns all persisted orders, in no particular order.
    pub fn orders(&self) -> Vec<Order> {
        self.state.read().unwrap().orders.values().cloned().collect()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create(&self, order: Order) -> Result<Order> {
        let mut state = self.state.write().unwrap();
        state.create_calls += 1;

        let over_budget = state
            .fail_after_creates
            .is_some_and(|n| state.orders.len() as u64 >= n);
        if state.fail_on_create || over_budget {
            return Err(StoreError::Internal("order store unavailable".to_string()));
        }

        state.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn get_by_id(&self, id: OrderId) -> Result<Order> {
        let state = self.state.read().unwrap();
        state.orders.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn update_one(&self, order: Order) -> Result<Order> {
        let mut state = self.state.write().unwrap();
        if !state.orders.contains_key(&order.id) {
            return Err(StoreError::NotFound);
        }
        state.orders.insert(order.id, order.clone());
        Ok(order)
    }
}

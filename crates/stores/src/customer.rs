//! Customer store contract and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::CustomerId;
use domain::Customer;

use crate::error::{Result, StoreError};

/// Read access to customer records.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Fetches a customer by id.
    async fn get_by_id(&self, id: CustomerId) -> Result<Customer>;
}

#[derive(Debug, Default)]
struct InMemoryCustomerState {
    customers: HashMap<CustomerId, Customer>,
    get_calls: u64,
    fail_on_get: bool,
}

/// In-memory customer store for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomerStore {
    state: Arc<RwLock<InMemoryCustomerState>>,
}

impl InMemoryCustomerStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a customer record.
    pub fn insert(&self, customer: Customer) {
        self.state
            .write()
            .unwrap()
            .customers
            .insert(customer.id, customer);
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
impl CustomerStore for InMemoryCustomerStore {
    async fn get_by_id(&self, id: CustomerId) -> Result<Customer> {
        let mut state = self.state.write().unwrap();
        state.get_calls += 1;

        if state.fail_on_get {
            return Err(StoreError::Internal("customer store unavailable".to_string()));
        }

        state.customers.get(&id).cloned().ok_or(StoreError::NotFound)
    }
}

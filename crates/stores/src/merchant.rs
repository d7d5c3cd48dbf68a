//! Merchant store contract and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use common::MerchantId;
use domain::Merchant;

use crate::error::{Result, StoreError};

/// Read access to merchant records.
#[async_trait]
pub trait MerchantStore: Send + Sync {
    /// Fetches a merchant by id.
    async fn get_by_id(&self, id: MerchantId) -> Result<Merchant>;
}

#[derive(Debug, Default)]
struct InMemoryMerchantState {
    merchants: HashMap<MerchantId, Merchant>,
    delays: HashMap<MerchantId, Duration>,
    get_calls: u64,
    fail_on_get: bool,
}

/// In-memory merchant store for testing.
///
/// Besides failure injection it supports per-merchant latency injection so
/// tests can force resolution tasks to complete out of request order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMerchantStore {
    state: Arc<RwLock<InMemoryMerchantState>>,
}

impl InMemoryMerchantStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a merchant record.
    pub fn insert(&self, merchant: Merchant) {
        self.state
            .write()
            .unwrap()
            .merchants
            .insert(merchant.id, merchant);
    }

    /// Delays every subsequent fetch of the given merchant.
    pub fn set_delay_for(&self, id: MerchantId, delay: Duration) {
        self.state.write().unwrap().delays.insert(id, delay);
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
impl MerchantStore for InMemoryMerchantStore {
    async fn get_by_id(&self, id: MerchantId) -> Result<Merchant> {
        let delay = {
            let mut state = self.state.write().unwrap();
            state.get_calls += 1;
            state.delays.get(&id).copied()
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let state = self.state.read().unwrap();
        if state.fail_on_get {
            return Err(StoreError::Internal("merchant store unavailable".to_string()));
        }
        state.merchants.get(&id).cloned().ok_or(StoreError::NotFound)
    }
}

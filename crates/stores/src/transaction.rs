//! Transaction store contract and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::TransactionId;
use domain::Transaction;

use crate::error::{Result, StoreError};

/// Write access to buyer payment transactions.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Persists a new transaction, returning the stored value.
    async fn create(&self, transaction: Transaction) -> Result<Transaction>;
}

#[derive(Debug, Default)]
struct InMemoryTransactionState {
    transactions: HashMap<TransactionId, Transaction>,
    create_calls: u64,
    fail_on_create: bool,
}

/// In-memory transaction store for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransactionStore {
    state: Arc<RwLock<InMemoryTransactionState>>,
}

impl InMemoryTransactionStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to fail every subsequent create.
    pub fn set_fail_on_create(&self, fail: bool) {
        self.state.write().unwrap().fail_on_create = fail;
    }

    /// Number of transactions currently persisted.
    pub fn transaction_count(&self) -> usize {
        self.state.read().unwrap().transactions.len()
    }

    /// Number of `create` calls observed (including failed ones).
    pub fn create_calls(&self) -> u64 {
        self.state.read().unwrap().create_calls
    }

    /// Returns all persisted transactions, in no particular order.
    pub fn transactions(&self) -> Vec<Transaction> {
        self.state
            .read()
            .unwrap()
            .transactions
            .values()
            .cloned()
            .collect()
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn create(&self, transaction: Transaction) -> Result<Transaction> {
        let mut state = self.state.write().unwrap();
        state.create_calls += 1;

        if state.fail_on_create {
            return Err(StoreError::Internal("transaction store unavailable".to_string()));
        }

        state.transactions.insert(transaction.id, transaction.clone());
        Ok(transaction)
    }
}

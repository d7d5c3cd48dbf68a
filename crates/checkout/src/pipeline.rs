//! The checkout pipeline orchestrator.

use std::sync::Arc;

use chrono::Utc;
use common::TransactionId;
use domain::{Credential, Order};
use stores::{CartStore, CustomerStore, MerchantStore, OrderStore, ProductStore, TransactionStore};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::config::CheckoutConfig;
use crate::draft;
use crate::error::{CheckoutError, Result};
use crate::persist::persist_orders;
use crate::request::CheckoutRequest;
use crate::resolve::{resolve_merchant, resolve_products};

/// Orchestrates the checkout stages over the collaborator stores.
///
/// One call turns a multi-merchant checkout request into one persisted order
/// per sub-order plus a single payment transaction, or into the first error
/// any stage produced. All stages share one cancellation token derived from
/// the configured deadline; the first error cancels it and aborts the batch.
pub struct CheckoutPipeline {
    customers: Arc<dyn CustomerStore>,
    carts: Arc<dyn CartStore>,
    merchants: Arc<dyn MerchantStore>,
    products: Arc<dyn ProductStore>,
    orders: Arc<dyn OrderStore>,
    transactions: Arc<dyn TransactionStore>,
    config: CheckoutConfig,
}

impl CheckoutPipeline {
    /// Creates a pipeline over the given stores.
    pub fn new(
        customers: Arc<dyn CustomerStore>,
        carts: Arc<dyn CartStore>,
        merchants: Arc<dyn MerchantStore>,
        products: Arc<dyn ProductStore>,
        orders: Arc<dyn OrderStore>,
        transactions: Arc<dyn TransactionStore>,
        config: CheckoutConfig,
    ) -> Self {
        Self {
            customers,
            carts,
            merchants,
            products,
            orders,
            transactions,
            config,
        }
    }

    /// Runs a checkout under the configured deadline.
    pub async fn create_orders(
        &self,
        credential: Option<&Credential>,
        request: CheckoutRequest,
    ) -> Result<Vec<Order>> {
        self.create_orders_with_cancel(CancellationToken::new(), credential, request)
            .await
    }

    /// Runs a checkout under both the configured deadline and a
    /// caller-supplied cancellation token.
    ///
    /// A token that is already cancelled on entry returns immediately with
    /// no collaborator call made.
    #[tracing::instrument(skip_all, fields(sub_orders = request.orders.len()))]
    pub async fn create_orders_with_cancel(
        &self,
        caller: CancellationToken,
        credential: Option<&Credential>,
        request: CheckoutRequest,
    ) -> Result<Vec<Order>> {
        metrics::counter!("checkout_attempts_total").increment(1);
        let started = std::time::Instant::now();

        let result = self.run(caller, credential, request).await;

        metrics::histogram!("checkout_duration_seconds").record(started.elapsed().as_secs_f64());
        match &result {
            Ok(orders) => {
                metrics::counter!("checkout_orders_created_total").increment(orders.len() as u64);
                tracing::info!(orders = orders.len(), "checkout completed");
            }
            Err(err) => {
                metrics::counter!("checkout_failures_total").increment(1);
                tracing::warn!(error = %err, detail = ?err, "checkout failed");
            }
        }
        result
    }

    async fn run(
        &self,
        caller: CancellationToken,
        credential: Option<&Credential>,
        request: CheckoutRequest,
    ) -> Result<Vec<Order>> {
        let Some(credential) = credential else {
            return Err(CheckoutError::Unauthenticated);
        };
        request.validate()?;

        if caller.is_cancelled() {
            return Err(CheckoutError::Cancelled);
        }
        let cancel = caller.child_token();

        // The deadline races the whole pipeline; losing drops the stage
        // futures, and cancelling the token stops their spawned tasks.
        tokio::select! {
            biased;
            _ = tokio::time::sleep(self.config.timeout) => {
                cancel.cancel();
                Err(CheckoutError::Cancelled)
            }
            result = self.execute(&cancel, credential, request) => result,
        }
    }

    async fn execute(
        &self,
        cancel: &CancellationToken,
        credential: &Credential,
        request: CheckoutRequest,
    ) -> Result<Vec<Order>> {
        // Caller identity and cart snapshot, fetched concurrently. The cart
        // is read exactly once; everything downstream works on this snapshot.
        let (customer, cart) = tokio::try_join!(
            async {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => Err(CheckoutError::Cancelled),
                    result = self.customers.get_by_id(credential.customer_id) => {
                        result.map_err(|e| CheckoutError::from_store("customer", e))
                    }
                }
            },
            async {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => Err(CheckoutError::Cancelled),
                    result = self.carts.get_by_id(credential.cart_id) => {
                        result.map_err(|e| CheckoutError::from_store("cart", e))
                    }
                }
            },
        )?;

        let now = Utc::now();
        let transaction_id = TransactionId::new();
        let drafts = draft::build_drafts(&customer, transaction_id, now, &request);
        let submitted = drafts.len();

        // Fan out resolution, one task per sub-order; each task fans out
        // again per item. The semaphore caps concurrent store fetches
        // across the whole call.
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_fetches));
        let mut resolutions: JoinSet<(usize, Result<Order>)> = JoinSet::new();
        for (index, order) in drafts.into_iter().enumerate() {
            let merchants = self.merchants.clone();
            let products = self.products.clone();
            let semaphore = semaphore.clone();
            let cancel = cancel.clone();
            resolutions.spawn(async move {
                let resolved =
                    resolve_merchant(merchants, semaphore.clone(), cancel.clone(), order).await;
                let resolved = resolve_products(products, semaphore, cancel, resolved).await;
                (index, resolved)
            });
        }

        let outcome =
            persist_orders(self.orders.clone(), cancel.clone(), cart, resolutions, submitted)
                .await?;

        // The payable total, strictly from resolved prices.
        let mut transaction = draft::draft_transaction(customer.id, transaction_id, now);
        transaction.total = outcome
            .orders
            .iter()
            .map(|order| order.items_total() + order.shipping_cost)
            .sum();

        // Final pair: write the spliced cart and the transaction
        // concurrently. Orders persisted above are not rolled back if
        // either write fails.
        let mut cart = outcome.cart;
        cart.updated_at = Utc::now();
        tokio::try_join!(
            async {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => Err(CheckoutError::Cancelled),
                    result = self.carts.update_one(cart) => {
                        result.map_err(|e| CheckoutError::from_store("cart", e))
                    }
                }
            },
            async {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => Err(CheckoutError::Cancelled),
                    result = self.transactions.create(transaction) => {
                        result.map_err(|e| CheckoutError::from_store("transaction", e))
                    }
                }
            },
        )?;

        Ok(outcome.orders)
    }
}

//! Product resolution: ownership checks and snapshot/price fill.

use std::sync::Arc;

use domain::Order;
use stores::ProductStore;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::error::{CheckoutError, Result};

/// Resolves every product of one order, concurrently.
///
/// An order that already failed merchant resolution is forwarded untouched —
/// none of its products are fetched. Otherwise one task per item fetches the
/// product, verifies it belongs to the order's merchant (a mismatch is
/// indistinguishable from an absent product) and fills the item's snapshot
/// and unit price. The order resolves only if every item does; the first
/// item-level error fails it.
pub(crate) async fn resolve_products(
    store: Arc<dyn ProductStore>,
    semaphore: Arc<Semaphore>,
    cancel: CancellationToken,
    upstream: Result<Order>,
) -> Result<Order> {
    let mut order = upstream?;

    let mut tasks: JoinSet<(usize, Result<domain::Product>)> = JoinSet::new();
    for (index, item) in order.items.iter().enumerate() {
        let store = store.clone();
        let semaphore = semaphore.clone();
        let cancel = cancel.clone();
        let product_id = item.product.id;
        tasks.spawn(async move {
            let _permit = tokio::select! {
                biased;
                _ = cancel.cancelled() => return (index, Err(CheckoutError::Cancelled)),
                permit = semaphore.acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => return (index, Err(CheckoutError::Cancelled)),
                },
            };

            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(CheckoutError::Cancelled),
                result = store.get_by_id(product_id) => {
                    result.map_err(|e| CheckoutError::from_store("product", e))
                }
            };
            (index, result)
        });
    }

    let merchant_id = order.merchant.id;
    let mut first_error: Option<CheckoutError> = None;
    while let Some(joined) = tasks.join_next().await {
        let Ok((index, result)) = joined else {
            first_error
                .get_or_insert(CheckoutError::Internal("product resolution task died".to_string()));
            continue;
        };
        match result {
            Ok(product) if product.merchant.id != merchant_id => {
                first_error.get_or_insert(CheckoutError::NotFound { entity: "product" });
            }
            Ok(product) => {
                let item = &mut order.items[index];
                item.price = product.price;
                item.product = product.summarize();
            }
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(order),
    }
}

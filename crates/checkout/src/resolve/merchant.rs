//! Merchant resolution: validate the shipping pick and fill the snapshot.

use std::sync::Arc;

use domain::Order;
use stores::MerchantStore;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use crate::error::{CheckoutError, Result};

/// Resolves one draft order's merchant.
///
/// Fetches the merchant, checks that the requested shipping provider is
/// among the ones the merchant offers, then replaces the order's shipping
/// placeholder with the full provider record and the merchant placeholder
/// with the real snapshot. Read-only; a failure here is carried on the
/// order and does not affect sibling orders.
pub(crate) async fn resolve_merchant(
    store: Arc<dyn MerchantStore>,
    semaphore: Arc<Semaphore>,
    cancel: CancellationToken,
    mut order: Order,
) -> Result<Order> {
    let _permit = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(CheckoutError::Cancelled),
        permit = semaphore.acquire_owned() => match permit {
            Ok(permit) => permit,
            Err(_) => return Err(CheckoutError::Cancelled),
        },
    };

    let merchant = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(CheckoutError::Cancelled),
        result = store.get_by_id(order.merchant.id) => {
            result.map_err(|e| CheckoutError::from_store("merchant", e))?
        }
    };

    let Some(provider) = merchant.offers_shipping(order.shipping.id) else {
        return Err(CheckoutError::validation(
            "shipping_id",
            "shipping is not provided by merchant",
        ));
    };
    order.shipping = provider.clone();
    order.merchant = merchant.summarize();

    Ok(order)
}

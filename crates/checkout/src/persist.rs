//! Persistence fan-in: cart splice and order writes.

use std::sync::Arc;

use domain::{Cart, Order};
use stores::OrderStore;
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;

use crate::error::{CheckoutError, Result};

/// What a fully persisted batch leaves behind: the orders in request order
/// and the cart snapshot with every purchased item spliced out.
#[derive(Debug)]
pub(crate) struct PersistOutcome {
    pub orders: Vec<Order>,
    pub cart: Cart,
}

/// Consumes resolution results as they complete and persists each resolved
/// order.
///
/// This is the single owner of the cart snapshot: purchased items are
/// spliced out here, after all validation for that order has passed, and
/// nowhere else. Order writes are issued concurrently; results land in
/// index-addressed slots so the batch comes back in request order no matter
/// the completion order.
///
/// The first error from any upstream stage or write cancels the shared
/// token, aborts remaining work and becomes the operation's result. Orders
/// whose writes completed before the abort are left in place — there is no
/// compensation pass.
pub(crate) async fn persist_orders(
    store: Arc<dyn OrderStore>,
    cancel: CancellationToken,
    mut cart: Cart,
    mut resolutions: JoinSet<(usize, Result<Order>)>,
    submitted: usize,
) -> Result<PersistOutcome> {
    let mut slots: Vec<Option<Order>> = vec![None; submitted];
    let mut writes: JoinSet<(usize, Result<Order>)> = JoinSet::new();

    // Multiplex the two task sets until both run dry; a branch whose set is
    // empty disables itself, and `else` fires once both are done.
    loop {
        tokio::select! {
            Some(joined) = resolutions.join_next() => {
                let (index, result) = unpack(joined, &cancel)?;
                let order = match result {
                    Ok(order) => order,
                    Err(err) => {
                        cancel.cancel();
                        return Err(err);
                    }
                };

                for item in &order.items {
                    cart.remove_product(item.product.id);
                }

                let store = store.clone();
                let cancel_write = cancel.clone();
                writes.spawn(async move {
                    let result = tokio::select! {
                        biased;
                        _ = cancel_write.cancelled() => Err(CheckoutError::Cancelled),
                        result = store.create(order) => {
                            result.map_err(|e| CheckoutError::from_store("order", e))
                        }
                    };
                    (index, result)
                });
            }
            Some(joined) = writes.join_next() => {
                let (index, result) = unpack(joined, &cancel)?;
                match result {
                    Ok(order) => slots[index] = Some(order),
                    Err(err) => {
                        cancel.cancel();
                        return Err(err);
                    }
                }
            }
            else => break,
        }
    }

    let mut orders = Vec::with_capacity(slots.len());
    for slot in slots {
        match slot {
            Some(order) => orders.push(order),
            // Every submitted index either filled its slot or aborted above.
            None => return Err(CheckoutError::Internal("missing result slot".to_string())),
        }
    }

    Ok(PersistOutcome { orders, cart })
}

/// Unpacks a joined task, converting task death into the batch abort.
fn unpack(
    joined: std::result::Result<(usize, Result<Order>), JoinError>,
    cancel: &CancellationToken,
) -> Result<(usize, Result<Order>)> {
    match joined {
        Ok(pair) => Ok(pair),
        Err(err) => {
            cancel.cancel();
            if err.is_cancelled() {
                Err(CheckoutError::Cancelled)
            } else {
                Err(CheckoutError::Internal("checkout task died".to_string()))
            }
        }
    }
}

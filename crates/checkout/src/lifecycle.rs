//! Post-checkout order mutations.
//!
//! These run long after the pipeline, one order at a time, as the payment is
//! verified and the parcel moves: reject, record the tracking number, mark
//! delivered, finish. Each is a plain get → transition check → update.

use std::sync::Arc;

use chrono::Utc;
use common::OrderId;
use domain::{Order, OrderStatus};
use stores::OrderStore;

use crate::error::{CheckoutError, Result};

/// Service for the order mutations that follow checkout.
pub struct OrderLifecycle {
    orders: Arc<dyn OrderStore>,
}

impl OrderLifecycle {
    /// Creates a lifecycle service over the given order store.
    pub fn new(orders: Arc<dyn OrderStore>) -> Self {
        Self { orders }
    }

    /// Cancels an order that has not completed yet.
    #[tracing::instrument(skip(self))]
    pub async fn reject(&self, order_id: OrderId) -> Result<Order> {
        let mut order = self.get(order_id).await?;
        if !order.status.can_cancel() {
            return Err(CheckoutError::validation(
                "status",
                format!("order in {} cannot be cancelled", order.status),
            ));
        }
        order.status = OrderStatus::Cancelled;
        self.update(order).await
    }

    /// Records the parcel's tracking number and marks the order shipped.
    #[tracing::instrument(skip(self, tracking_number))]
    pub async fn set_tracking_number(
        &self,
        order_id: OrderId,
        tracking_number: impl Into<String>,
    ) -> Result<Order> {
        let mut order = self.get(order_id).await?;
        if !order.status.can_ship() {
            return Err(CheckoutError::validation(
                "status",
                format!("order in {} cannot be shipped", order.status),
            ));
        }
        order.tracking_number = tracking_number.into();
        order.status = OrderStatus::Shipped;
        self.update(order).await
    }

    /// Records that the buyer reported the parcel as arrived.
    #[tracing::instrument(skip(self))]
    pub async fn mark_delivered(&self, order_id: OrderId) -> Result<Order> {
        let mut order = self.get(order_id).await?;
        order.delivered = true;
        self.update(order).await
    }

    /// Completes a shipped order.
    #[tracing::instrument(skip(self))]
    pub async fn finish(&self, order_id: OrderId) -> Result<Order> {
        let mut order = self.get(order_id).await?;
        if !order.status.can_complete() {
            return Err(CheckoutError::validation(
                "status",
                format!("order in {} cannot be completed", order.status),
            ));
        }
        order.status = OrderStatus::Completed;
        self.update(order).await
    }

    async fn get(&self, order_id: OrderId) -> Result<Order> {
        self.orders
            .get_by_id(order_id)
            .await
            .map_err(|e| CheckoutError::from_store("order", e))
    }

    async fn update(&self, mut order: Order) -> Result<Order> {
        order.updated_at = Utc::now();
        self.orders
            .update_one(order)
            .await
            .map_err(|e| CheckoutError::from_store("order", e))
    }
}

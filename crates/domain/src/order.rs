//! Orders and their status machine.

use chrono::{DateTime, Utc};
use common::{OrderId, TransactionId};
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::customer::CustomerSummary;
use crate::merchant::MerchantSummary;
use crate::money::Money;
use crate::product::ProductSummary;
use crate::shipping::ShippingProvider;

/// The state of an order after checkout.
///
/// Transitions:
/// ```text
/// AwaitingPayment ──► Processing ──► Shipped ──► Completed
///        │                │             │
///        └────────────────┴─────────────┴──► Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Created by checkout; the buyer has not paid yet.
    #[default]
    AwaitingPayment,

    /// Payment verified; the merchant is preparing the shipment.
    Processing,

    /// A tracking number has been issued and the parcel is on its way.
    Shipped,

    /// Delivery confirmed (terminal).
    Completed,

    /// Rejected or cancelled before completion (terminal).
    Cancelled,
}

impl OrderStatus {
    /// True if a tracking number may be recorded in this state.
    pub fn can_ship(&self) -> bool {
        matches!(self, OrderStatus::Processing)
    }

    /// True if the order can be finished in this state.
    pub fn can_complete(&self) -> bool {
        matches!(self, OrderStatus::Shipped)
    }

    /// True if the order can still be cancelled.
    pub fn can_cancel(&self) -> bool {
        matches!(
            self,
            OrderStatus::AwaitingPayment | OrderStatus::Processing | OrderStatus::Shipped
        )
    }

    /// True once no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Returns the status name as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::AwaitingPayment => "AWAITING_PAYMENT",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One line of an order.
///
/// `price` is the unit price copied from the resolved product snapshot; it is
/// zero (meaningless) until product resolution has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product: ProductSummary,
    pub quantity: i64,
    pub buyer_note: String,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub price: Money,
}

impl OrderItem {
    /// Line total: unit price times quantity.
    pub fn subtotal(&self) -> Money {
        self.price.multiply(self.quantity)
    }
}

/// One merchant's portion of a checkout, persisted as its own record.
///
/// Invariants: `items` is non-empty, and after resolution `merchant.id`
/// equals the owning merchant id of every item's product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// The buyer payment transaction shared by every order of the same
    /// checkout call.
    pub transaction_id: TransactionId,
    pub items: Vec<OrderItem>,
    pub merchant: MerchantSummary,
    pub customer: CustomerSummary,
    pub receiver_name: String,
    pub receiver_phone: String,
    pub receiver_address: Address,
    pub shipping: ShippingProvider,
    pub shipping_cost: Money,
    pub service_name: String,
    pub status: OrderStatus,
    /// Empty until the merchant records the parcel's tracking number.
    pub tracking_number: String,
    pub reviewed_merchant: bool,
    pub reviewed_product: bool,
    pub delivered: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Sum of all line subtotals, excluding shipping.
    pub fn items_total(&self) -> Money {
        self.items.iter().map(OrderItem::subtotal).sum()
    }
}

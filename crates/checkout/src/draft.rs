//! Draft building: request specs become unresolved skeletons.

use chrono::{DateTime, Utc};
use common::{AddressId, CustomerId, OrderId, TransactionId};
use domain::{
    Address, Customer, MerchantSummary, Money, Order, OrderItem, OrderStatus, PaymentStatus,
    ProductSummary, ShippingProvider, Transaction,
};

use crate::request::CheckoutRequest;

/// Builds one unresolved order skeleton per sub-order spec.
///
/// Skeletons carry a fresh order id, the customer snapshot and the declared
/// receiver/shipping-cost fields; merchant, shipping and product fields are
/// placeholders holding only the requested ids until the resolution stages
/// replace them.
pub(crate) fn build_drafts(
    customer: &Customer,
    transaction_id: TransactionId,
    now: DateTime<Utc>,
    request: &CheckoutRequest,
) -> Vec<Order> {
    request
        .orders
        .iter()
        .map(|sub_order| Order {
            id: OrderId::new(),
            transaction_id,
            items: sub_order
                .products
                .iter()
                .map(|product| OrderItem {
                    product: ProductSummary::from_id(product.product_id),
                    quantity: product.quantity,
                    buyer_note: product.buyer_note.clone(),
                    colors: product.colors.clone(),
                    sizes: product.sizes.clone(),
                    price: Money::zero(),
                })
                .collect(),
            merchant: MerchantSummary::from_id(sub_order.merchant_id),
            customer: customer.summarize(),
            receiver_name: sub_order.receiver_name.clone(),
            receiver_phone: sub_order.receiver_phone.clone(),
            receiver_address: Address {
                id: AddressId::new(),
                city: sub_order.receiver_address.city.clone(),
                street: sub_order.receiver_address.street.clone(),
                number: sub_order.receiver_address.number.clone(),
            },
            shipping: ShippingProvider::from_id(sub_order.shipping_id),
            shipping_cost: sub_order.shipping_cost,
            service_name: sub_order.service_name.clone(),
            status: OrderStatus::AwaitingPayment,
            tracking_number: String::new(),
            reviewed_merchant: false,
            reviewed_product: false,
            delivered: false,
            created_at: now,
            updated_at: now,
        })
        .collect()
}

/// Builds the transaction skeleton shared by every order of the call.
///
/// The total starts at zero: item prices are unknown until product
/// resolution, so the payable amount is computed by the orchestrator after
/// all orders have resolved, never here.
pub(crate) fn draft_transaction(
    customer_id: CustomerId,
    transaction_id: TransactionId,
    now: DateTime<Utc>,
) -> Transaction {
    Transaction {
        id: transaction_id,
        customer_id,
        admin_id: None,
        total: Money::zero(),
        payment_status: PaymentStatus::AwaitingVerification,
        transfer_photo: String::new(),
        message: String::new(),
        created_at: now,
        updated_at: now,
    }
}

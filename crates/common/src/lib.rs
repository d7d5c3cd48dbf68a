//! Shared types for the marketplace backend.
//!
//! Every collection in the system addresses its records by a UUID. The
//! newtypes here keep those identifiers from being mixed up across
//! collections (an order id is not a cart id, even though both wrap a UUID).

pub mod types;

pub use types::{
    AddressId, AdminId, CartId, CustomerId, MerchantId, OrderId, ProductId, ShippingProviderId,
    TransactionId,
};

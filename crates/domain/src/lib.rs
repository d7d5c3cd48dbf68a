//! Domain model for the marketplace backend.
//!
//! Entities are plain serde-derived structs addressed by the id newtypes in
//! [`common`]. Cross-entity reads embed *denormalized snapshots* — copies of
//! another entity's fields taken at write time (`CustomerSummary`,
//! `MerchantSummary`, `ProductSummary`), refreshed only by explicit sync
//! operations elsewhere in the system.

pub mod address;
pub mod cart;
pub mod credential;
pub mod customer;
pub mod merchant;
pub mod money;
pub mod order;
pub mod product;
pub mod shipping;
pub mod transaction;

pub use address::Address;
pub use cart::{Cart, CartItem};
pub use credential::Credential;
pub use customer::{Customer, CustomerSummary};
pub use merchant::{Merchant, MerchantSummary};
pub use money::Money;
pub use order::{Order, OrderItem, OrderStatus};
pub use product::{Product, ProductSummary};
pub use shipping::ShippingProvider;
pub use transaction::{PaymentStatus, Transaction};

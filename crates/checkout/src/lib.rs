//! Multi-merchant order checkout pipeline.
//!
//! Turns a customer's cart-derived checkout request — possibly spanning
//! several merchants — into one persisted order per sub-order plus a single
//! buyer payment transaction, removing the purchased items from the cart.
//!
//! The pipeline runs in four stages:
//! 1. draft building — request specs become unresolved order skeletons
//! 2. merchant resolution — fetch each merchant, validate the shipping pick
//! 3. product resolution — fetch every item's product, check ownership
//! 4. persistence — splice the cart, write orders, then cart + transaction
//!
//! Stages 2 and 3 fan out one task per order / per item, capped by a
//! semaphore and sharing one cancellation token; the first error anywhere
//! cancels the token and aborts the whole batch.

pub mod config;
mod draft;
pub mod error;
pub mod lifecycle;
mod persist;
pub mod pipeline;
pub mod request;
mod resolve;

pub use config::CheckoutConfig;
pub use error::{CheckoutError, Result};
pub use lifecycle::OrderLifecycle;
pub use pipeline::CheckoutPipeline;
pub use request::{AddressRequest, CheckoutRequest, ProductRequest, SubOrderRequest};

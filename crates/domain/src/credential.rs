use common::{CartId, CustomerId, MerchantId};
use serde::{Deserialize, Serialize};

/// The caller's identity, produced by the authentication layer.
///
/// Checkout only needs the customer and cart ids; the merchant id is present
/// when the customer also owns a shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub customer_id: CustomerId,
    pub cart_id: CartId,
    pub merchant_id: Option<MerchantId>,
    pub email: String,
}

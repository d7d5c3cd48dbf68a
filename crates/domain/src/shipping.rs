use chrono::{DateTime, Utc};
use common::ShippingProviderId;
use serde::{Deserialize, Serialize};

/// A shipping provider a merchant may offer on its orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingProvider {
    pub id: ShippingProviderId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShippingProvider {
    /// Draft placeholder carrying only the requested provider id.
    ///
    /// Replaced with the merchant's full provider record during merchant
    /// resolution; reading any other field before then is meaningless.
    pub fn from_id(id: ShippingProviderId) -> Self {
        Self {
            id,
            name: String::new(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

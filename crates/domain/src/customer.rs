use chrono::{DateTime, Utc};
use common::{CartId, CustomerId, MerchantId};
use serde::{Deserialize, Serialize};

use crate::address::Address;

/// A customer account.
///
/// Credential material and payment accounts live with the authentication
/// layer; this record carries only what the marketplace itself reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub cart_id: CartId,
    pub merchant_id: Option<MerchantId>,
    pub email: String,
    pub name: String,
    pub phone: String,
    pub avatar: String,
    pub addresses: Vec<Address>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Denormalized snapshot embedded into orders.
    pub fn summarize(&self) -> CustomerSummary {
        CustomerSummary {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            addresses: self.addresses.clone(),
            phone: self.phone.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

/// Denormalized customer snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub id: CustomerId,
    pub email: String,
    pub name: String,
    pub addresses: Vec<Address>,
    pub phone: String,
    pub avatar: String,
}

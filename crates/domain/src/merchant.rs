use chrono::{DateTime, Utc};
use common::{MerchantId, ShippingProviderId};
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::shipping::ShippingProvider;

/// A merchant (shop) selling products on the marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Merchant {
    pub id: MerchantId,
    pub name: String,
    pub address: Address,
    pub avatar: String,
    pub phone: String,
    pub description: String,
    pub rating: f64,
    pub num_reviews: i64,
    /// Shipping providers this merchant ships with. Orders may only select
    /// one of these.
    pub shippings: Vec<ShippingProvider>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Merchant {
    /// Returns the offered provider with the given id, if any.
    pub fn offers_shipping(&self, id: ShippingProviderId) -> Option<&ShippingProvider> {
        self.shippings.iter().find(|s| s.id == id)
    }

    /// Denormalized snapshot embedded into orders, products and cart items.
    pub fn summarize(&self) -> MerchantSummary {
        MerchantSummary {
            id: self.id,
            name: self.name.clone(),
            avatar: self.avatar.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            shippings: self.shippings.clone(),
            rating: self.rating,
            num_reviews: self.num_reviews,
        }
    }
}

/// Denormalized merchant snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantSummary {
    pub id: MerchantId,
    pub name: String,
    pub avatar: String,
    pub phone: String,
    pub address: Address,
    pub shippings: Vec<ShippingProvider>,
    pub rating: f64,
    pub num_reviews: i64,
}

impl MerchantSummary {
    /// Draft placeholder referencing only the merchant id; replaced with the
    /// real snapshot during merchant resolution.
    pub fn from_id(id: MerchantId) -> Self {
        Self {
            id,
            name: String::new(),
            avatar: String::new(),
            phone: String::new(),
            address: Address::new("", "", ""),
            shippings: Vec::new(),
            rating: 0.0,
            num_reviews: 0,
        }
    }
}

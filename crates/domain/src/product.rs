use chrono::{DateTime, Utc};
use common::ProductId;
use serde::{Deserialize, Serialize};

use crate::merchant::MerchantSummary;
use crate::money::Money;

/// A product listing owned by exactly one merchant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub photos: Vec<String>,
    pub price: Money,
    pub stock: i64,
    /// Snapshot of the owning merchant; `merchant.id` is the ownership check
    /// used during product resolution.
    pub merchant: MerchantSummary,
    pub rating: f64,
    pub num_reviews: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Denormalized snapshot embedded into order items and cart items.
    pub fn summarize(&self) -> ProductSummary {
        ProductSummary {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            colors: self.colors.clone(),
            sizes: self.sizes.clone(),
            photos: self.photos.clone(),
            price: self.price,
            stock: self.stock,
            rating: self.rating,
            num_reviews: self.num_reviews,
        }
    }
}

/// Denormalized product snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub photos: Vec<String>,
    pub price: Money,
    pub stock: i64,
    pub rating: f64,
    pub num_reviews: i64,
}

impl ProductSummary {
    /// Draft placeholder referencing only the product id; the price is zero
    /// until product resolution fills the real snapshot.
    pub fn from_id(id: ProductId) -> Self {
        Self {
            id,
            name: String::new(),
            description: String::new(),
            colors: Vec::new(),
            sizes: Vec::new(),
            photos: Vec::new(),
            price: Money::zero(),
            stock: 0,
            rating: 0.0,
            num_reviews: 0,
        }
    }
}

use chrono::{DateTime, Utc};
use common::{CartId, ProductId};
use serde::{Deserialize, Serialize};

use crate::merchant::MerchantSummary;
use crate::product::ProductSummary;

/// A customer's cart.
///
/// Exactly one cart exists per customer and it is never deleted; checkout
/// removes the purchased items and writes the cart back once. Invariant:
/// at most one item per product id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub id: CartId,
    pub items: Vec<CartItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One cart line: denormalized product and merchant snapshots plus the
/// customer's selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: ProductSummary,
    pub merchant: MerchantSummary,
    pub quantity: i64,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub note: String,
}

impl Cart {
    /// Returns the index of the item holding the given product, if present.
    pub fn position_of(&self, product_id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.product.id == product_id)
    }

    /// Splices the item for the given product out of the cart, returning it.
    ///
    /// Single-pass index removal; the remaining items keep their relative
    /// order whether the removed line was first, last, in the middle, or the
    /// only one. Absent products leave the cart untouched.
    pub fn remove_product(&mut self, product_id: ProductId) -> Option<CartItem> {
        let index = self.position_of(product_id)?;
        Some(self.items.remove(index))
    }

    /// True while the one-item-per-product invariant holds.
    pub fn has_unique_products(&self) -> bool {
        for (i, item) in self.items.iter().enumerate() {
            if self.items[i + 1..].iter().any(|other| other.product.id == item.product.id) {
                return false;
            }
        }
        true
    }
}

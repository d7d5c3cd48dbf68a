//! Checkout request DTOs.
//!
//! These mirror the JSON body the HTTP layer (out of scope here) decodes:
//! an ordered list of sub-order specs, one per merchant.

use common::{MerchantId, ProductId, ShippingProviderId};
use domain::Money;
use serde::{Deserialize, Serialize};

use crate::error::{CheckoutError, Result};

/// One product line of a sub-order spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRequest {
    pub product_id: ProductId,
    pub quantity: i64,
    #[serde(default)]
    pub buyer_note: String,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
}

/// Receiver address fields as submitted by the buyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRequest {
    pub city: String,
    pub street: String,
    pub number: String,
}

/// One merchant's portion of the checkout request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubOrderRequest {
    pub merchant_id: MerchantId,
    pub receiver_name: String,
    #[serde(default)]
    pub receiver_phone: String,
    pub receiver_address: AddressRequest,
    pub shipping_id: ShippingProviderId,
    pub shipping_cost: Money,
    #[serde(default)]
    pub service_name: String,
    pub products: Vec<ProductRequest>,
}

/// The full checkout request: an ordered list of sub-order specs.
///
/// Results are returned in the same order the specs are submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub orders: Vec<SubOrderRequest>,
}

impl CheckoutRequest {
    /// Shape checks performed before any collaborator call: at least one
    /// sub-order, at least one product per sub-order, quantities >= 1.
    /// Everything deeper (does the merchant offer the shipping? does the
    /// product belong to the merchant?) is cross-entity validation done by
    /// the resolution stages.
    pub fn validate(&self) -> Result<()> {
        if self.orders.is_empty() {
            return Err(CheckoutError::validation(
                "orders",
                "at least one sub-order is required",
            ));
        }
        for sub_order in &self.orders {
            if sub_order.products.is_empty() {
                return Err(CheckoutError::validation(
                    "products",
                    "a sub-order must contain at least one product",
                ));
            }
            if sub_order.products.iter().any(|p| p.quantity < 1) {
                return Err(CheckoutError::validation(
                    "quantity",
                    "product quantity must be at least 1",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_the_wire_shape() {
        let merchant_id = MerchantId::new();
        let shipping_id = ShippingProviderId::new();
        let product_id = ProductId::new();
        let body = format!(
            r#"{{
                "orders": [
                    {{
                        "merchant_id": "{merchant_id}",
                        "receiver_name": "Siti",
                        "receiver_phone": "+62812222222",
                        "receiver_address": {{"city": "Bandung", "street": "Jl. Anggrek", "number": "12A"}},
                        "shipping_id": "{shipping_id}",
                        "shipping_cost": 900,
                        "service_name": "REG",
                        "products": [
                            {{"product_id": "{product_id}", "quantity": 2, "colors": ["red"]}}
                        ]
                    }}
                ]
            }}"#
        );

        let request: CheckoutRequest = serde_json::from_str(&body).unwrap();
        assert_eq!(request.orders.len(), 1);
        let sub_order = &request.orders[0];
        assert_eq!(sub_order.merchant_id, merchant_id);
        assert_eq!(sub_order.shipping_id, shipping_id);
        assert_eq!(sub_order.products[0].product_id, product_id);
        assert_eq!(sub_order.shipping_cost, Money::from_cents(900));
        assert_eq!(sub_order.products[0].quantity, 2);
        // Omitted optional fields default to empty.
        assert!(sub_order.products[0].buyer_note.is_empty());
        assert!(sub_order.products[0].sizes.is_empty());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn empty_request_is_rejected() {
        let request = CheckoutRequest { orders: vec![] };
        let err = request.validate().unwrap_err();
        assert!(matches!(err, CheckoutError::Validation { field: "orders", .. }));
    }

    #[test]
    fn sub_order_without_products_is_rejected() {
        let request = CheckoutRequest {
            orders: vec![SubOrderRequest {
                merchant_id: MerchantId::new(),
                receiver_name: "Siti".to_string(),
                receiver_phone: String::new(),
                receiver_address: AddressRequest {
                    city: "Bandung".to_string(),
                    street: "Jl. Anggrek".to_string(),
                    number: "12A".to_string(),
                },
                shipping_id: ShippingProviderId::new(),
                shipping_cost: Money::from_cents(900),
                service_name: String::new(),
                products: vec![],
            }],
        };
        let err = request.validate().unwrap_err();
        assert!(matches!(err, CheckoutError::Validation { field: "products", .. }));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let mut request = CheckoutRequest {
            orders: vec![SubOrderRequest {
                merchant_id: MerchantId::new(),
                receiver_name: "Siti".to_string(),
                receiver_phone: String::new(),
                receiver_address: AddressRequest {
                    city: "Bandung".to_string(),
                    street: "Jl. Anggrek".to_string(),
                    number: "12A".to_string(),
                },
                shipping_id: ShippingProviderId::new(),
                shipping_cost: Money::zero(),
                service_name: String::new(),
                products: vec![ProductRequest {
                    product_id: ProductId::new(),
                    quantity: 0,
                    buyer_note: String::new(),
                    colors: vec![],
                    sizes: vec![],
                }],
            }],
        };
        let err = request.validate().unwrap_err();
        assert!(matches!(err, CheckoutError::Validation { field: "quantity", .. }));

        request.orders[0].products[0].quantity = 1;
        assert!(request.validate().is_ok());
    }
}

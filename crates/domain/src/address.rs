use common::AddressId;
use serde::{Deserialize, Serialize};

/// A postal address, used both on customer profiles and as an order's
/// receiver address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: AddressId,
    pub city: String,
    pub street: String,
    pub number: String,
}

impl Address {
    /// Creates an address with a fresh id.
    pub fn new(city: impl Into<String>, street: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            id: AddressId::new(),
            city: city.into(),
            street: street.into(),
            number: number.into(),
        }
    }
}

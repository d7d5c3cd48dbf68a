use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Declares a UUID-backed identifier newtype for one collection.
///
/// All identifiers share the same surface: random v4 construction,
/// conversion to and from the raw UUID, transparent serde encoding,
/// and display as the canonical hyphenated form.
macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID.
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

entity_id! {
    /// Unique identifier for a customer account.
    CustomerId
}

entity_id! {
    /// Unique identifier for a customer's cart.
    ///
    /// Exactly one cart exists per customer; the id is issued when the
    /// account is created and lives for the customer's lifetime.
    CartId
}

entity_id! {
    /// Unique identifier for a merchant.
    MerchantId
}

entity_id! {
    /// Unique identifier for a product listing.
    ProductId
}

entity_id! {
    /// Unique identifier for a shipping provider.
    ShippingProviderId
}

entity_id! {
    /// Unique identifier for an address record.
    AddressId
}

entity_id! {
    /// Unique identifier for an order.
    OrderId
}

entity_id! {
    /// Unique identifier for a buyer payment transaction.
    ///
    /// One transaction is shared by every order created in the same
    /// checkout call.
    TransactionId
}

entity_id! {
    /// Unique identifier for an admin account.
    AdminId
}

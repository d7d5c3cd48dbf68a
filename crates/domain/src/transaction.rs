//! Buyer payment transactions.

use chrono::{DateTime, Utc};
use common::{AdminId, CustomerId, TransactionId};
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Verification state of a buyer's bank-transfer payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Created by checkout; no transfer proof submitted yet.
    #[default]
    AwaitingVerification,

    /// An admin is reviewing the submitted transfer proof.
    Verifying,

    /// Payment confirmed.
    Success,

    /// Payment rejected.
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::AwaitingVerification => "AWAITING_VERIFICATION",
            PaymentStatus::Verifying => "VERIFYING",
            PaymentStatus::Success => "SUCCESS",
            PaymentStatus::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The buyer payment record for one checkout call.
///
/// All orders created by the call reference this record through their
/// `transaction_id`; `total` covers every order's lines plus shipping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub customer_id: CustomerId,
    /// Set once an admin has reviewed the payment; unset at creation.
    pub admin_id: Option<AdminId>,
    pub total: Money,
    pub payment_status: PaymentStatus,
    pub transfer_photo: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

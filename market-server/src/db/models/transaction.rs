//! Transaction Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::{PaymentMethod, TransactionStatus};
use surrealdb::RecordId;

/// Transaction ID type
pub type TransactionId = RecordId;

/// A payment-intent record, prerequisite for order creation.
///
/// Created OPEN; the only transition out of OPEN is the order engine's
/// atomic claim, which sets `order`/`vendor` and status SUCCESS in one
/// conditional update. A transaction backs at most one order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<TransactionId>,
    #[serde(with = "serde_helpers::record_id")]
    pub customer: RecordId,
    /// Amount payable, post-discount. Not floored at zero: a discount
    /// larger than the amount yields a negative value.
    pub order_value: f64,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub offer_used: Option<RecordId>,
    pub payment_mode: PaymentMethod,
    /// Raw response echoed by the payment gateway
    #[serde(default)]
    pub payment_response: String,
    pub status: TransactionStatus,
    /// Set by the order engine's claim, never before
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub order: Option<RecordId>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub vendor: Option<RecordId>,
    #[serde(default)]
    pub created_at: i64,
}

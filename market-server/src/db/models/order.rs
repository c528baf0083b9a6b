//! Order Model

use super::serde_helpers;
pub use super::customer::CartLineItem;
use serde::{Deserialize, Serialize};
use shared::OrderStatus;
use surrealdb::RecordId;

/// Order ID type
pub type OrderId = RecordId;

/// Default preparation window in minutes, vendor-adjustable per order
pub const DEFAULT_READY_TIME_MINUTES: i32 = 45;

/// A placed order. Never deleted; mutated only by the vendor
/// (status/remarks/ready_time) and by delivery assignment (delivery_user).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<OrderId>,
    /// Opaque, globally unique, customer-facing
    pub order_number: String,
    /// Derived from the items' vendor; all items belong to this vendor
    #[serde(with = "serde_helpers::record_id")]
    pub vendor: RecordId,
    pub items: Vec<CartLineItem>,
    /// Sum of line amounts, priced server-side at creation time
    pub total_amount: f64,
    /// As reported by the payment flow; stored, not validated against
    /// total_amount
    pub paid_amount: f64,
    pub status: OrderStatus,
    #[serde(default)]
    pub remarks: String,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub delivery_user: Option<RecordId>,
    #[serde(default = "default_ready_time")]
    pub ready_time: i32,
    /// Millis since epoch
    pub order_date: i64,
    #[serde(default)]
    pub created_at: i64,
}

fn default_ready_time() -> i32 {
    DEFAULT_READY_TIME_MINUTES
}

/// New-order payload assembled by the order engine.
///
/// The record id is generated up front so the transaction claim can
/// reference the order before the row exists.
#[derive(Debug, Clone, Serialize)]
pub struct OrderCreate {
    #[serde(with = "serde_helpers::record_id")]
    pub id: RecordId,
    pub order_number: String,
    #[serde(with = "serde_helpers::record_id")]
    pub vendor: RecordId,
    pub items: Vec<CartLineItem>,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub ready_time: i32,
    pub order_date: i64,
}

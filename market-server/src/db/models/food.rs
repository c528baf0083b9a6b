//! Food Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Food ID type
pub type FoodId = RecordId;

/// A catalog item offered by one vendor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<FoodId>,
    /// Owning vendor
    #[serde(with = "serde_helpers::record_id")]
    pub vendor: RecordId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub food_type: String,
    /// Current price; order/cart amounts are always derived from this at
    /// mutation time, never from client input
    pub price: f64,
    /// Preparation time in minutes
    #[serde(default)]
    pub ready_time: i32,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub created_at: i64,
}

/// Food creation payload (vendor surface)
#[derive(Debug, Clone, Deserialize)]
pub struct FoodCreate {
    pub name: String,
    pub description: String,
    pub category: String,
    pub food_type: String,
    pub price: f64,
    #[serde(default)]
    pub ready_time: Option<i32>,
}

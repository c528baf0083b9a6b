//! Delivery User Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Delivery user ID type
pub type DeliveryUserId = RecordId;

/// Delivery rider account
///
/// Eligible for assignment only when `verified` (admin-controlled),
/// `is_available` (self-toggled) and the pincode matches the vendor's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryUser {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<DeliveryUserId>,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub address: String,
    /// Service-area code the rider covers
    pub pincode: String,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub verified: bool,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_available: bool,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lng: f64,
    #[serde(default)]
    pub created_at: i64,
}

/// New-account payload (password already hashed by the handler)
#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryUserCreate {
    pub email: String,
    pub phone: String,
    pub address: String,
    pub pincode: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl DeliveryUser {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        super::customer::verify_password(&self.hash_pass, password)
    }
}

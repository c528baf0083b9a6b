//! Vendor Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Vendor ID type
pub type VendorId = RecordId;

/// Restaurant / vendor account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vendor {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<VendorId>,
    pub name: String,
    pub owner_name: String,
    #[serde(default)]
    pub food_type: Vec<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// Service-area code used to match delivery users and browsing customers
    pub pincode: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub service_available: bool,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lng: f64,
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub foods: Vec<RecordId>,
    #[serde(default)]
    pub created_at: i64,
}

/// Vendor creation payload (admin surface)
#[derive(Debug, Clone, Deserialize)]
pub struct VendorCreate {
    pub name: String,
    pub owner_name: String,
    #[serde(default)]
    pub food_type: Vec<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub pincode: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Vendor profile update payload
#[derive(Debug, Clone, Deserialize)]
pub struct VendorUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub food_type: Option<Vec<String>>,
}

impl Vendor {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        super::customer::verify_password(&self.hash_pass, password)
    }
}

//! Customer Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Customer ID type
pub type CustomerId = RecordId;

/// A single (food, quantity, amount) line in a cart or an order.
///
/// `amount` is `quantity × food.price` as of the mutation that last touched
/// the line; untouched lines keep their stored amount even if the catalog
/// price changes later.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    #[serde(with = "serde_helpers::record_id")]
    pub food: RecordId,
    pub quantity: i32,
    pub amount: f64,
}

/// Customer account, including the embedded cart and the append-only list
/// of order references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<CustomerId>,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub verified: bool,
    /// Pending verification code, cleared once verified
    #[serde(default, skip_serializing)]
    pub otp: Option<i32>,
    /// OTP expiry (millis since epoch)
    #[serde(default, skip_serializing)]
    pub otp_expires_at: Option<i64>,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lng: f64,
    #[serde(default)]
    pub cart: Vec<CartLineItem>,
    /// Optimistic-concurrency counter for cart writes
    #[serde(default)]
    pub cart_version: i64,
    /// Append-only, insertion order = chronological
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub orders: Vec<RecordId>,
    #[serde(default)]
    pub created_at: i64,
}

impl Customer {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        verify_password(&self.hash_pass, password)
    }
}

/// Hash a password using argon2
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
    };

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(password_hash.to_string())
}

/// Verify a password against an argon2 hash
pub fn verify_password(hash: &str, password: &str) -> Result<bool, argon2::password_hash::Error> {
    use argon2::{
        Argon2,
        password_hash::{PasswordHash, PasswordVerifier},
    };

    let parsed_hash = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let hash = hash_password("secret-password").expect("hash");
        assert!(verify_password(&hash, "secret-password").expect("verify"));
        assert!(!verify_password(&hash, "wrong-password").expect("verify"));
    }

    #[test]
    fn test_sensitive_fields_not_serialized() {
        let customer = Customer {
            id: None,
            email: "jane@example.com".into(),
            phone: "12345678".into(),
            hash_pass: "argon2-hash".into(),
            first_name: None,
            last_name: None,
            address: None,
            verified: false,
            otp: Some(123456),
            otp_expires_at: Some(0),
            lat: 0.0,
            lng: 0.0,
            cart: vec![],
            cart_version: 0,
            orders: vec![],
            created_at: 0,
        };

        let json = serde_json::to_string(&customer).unwrap();
        assert!(!json.contains("hash_pass"));
        assert!(!json.contains("123456"));
    }
}

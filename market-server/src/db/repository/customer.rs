//! Customer Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{CartLineItem, Customer};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct CustomerRepository {
    base: BaseRepository,
}

impl CustomerRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find customer by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Customer>> {
        let thing = parse_record_id(id)?;
        let customer: Option<Customer> = self.base.db().select(thing).await?;
        Ok(customer)
    }

    /// Find customer by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Customer>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM customer WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let customers: Vec<Customer> = result.take(0)?;
        Ok(customers.into_iter().next())
    }

    /// Find customer by email or phone (signup duplicate check)
    pub async fn find_by_email_or_phone(
        &self,
        email: &str,
        phone: &str,
    ) -> RepoResult<Option<Customer>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM customer WHERE email = $email OR phone = $phone LIMIT 1")
            .bind(("email", email.to_string()))
            .bind(("phone", phone.to_string()))
            .await?;
        let customers: Vec<Customer> = result.take(0)?;
        Ok(customers.into_iter().next())
    }

    /// Create a new customer with a pending OTP
    pub async fn create(
        &self,
        email: &str,
        phone: &str,
        hash_pass: &str,
        otp: i32,
        otp_expires_at: i64,
    ) -> RepoResult<Customer> {
        let now = shared::util::now_millis();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE customer SET
                    email = $email,
                    phone = $phone,
                    hash_pass = $hash_pass,
                    verified = false,
                    otp = $otp,
                    otp_expires_at = $otp_expires_at,
                    lat = 0.0,
                    lng = 0.0,
                    cart = [],
                    cart_version = 0,
                    orders = [],
                    created_at = $now
                RETURN AFTER"#,
            )
            .bind(("email", email.to_string()))
            .bind(("phone", phone.to_string()))
            .bind(("hash_pass", hash_pass.to_string()))
            .bind(("otp", otp))
            .bind(("otp_expires_at", otp_expires_at))
            .bind(("now", now))
            .await?;

        let created: Option<Customer> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create customer".to_string()))
    }

    /// Update profile fields
    pub async fn update_profile(
        &self,
        id: &str,
        first_name: &str,
        last_name: &str,
        address: &str,
    ) -> RepoResult<Customer> {
        let thing = parse_record_id(id)?;
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $id SET first_name = $first_name, last_name = $last_name, address = $address RETURN AFTER",
            )
            .bind(("id", thing))
            .bind(("first_name", first_name.to_string()))
            .bind(("last_name", last_name.to_string()))
            .bind(("address", address.to_string()))
            .await?;
        let updated: Option<Customer> = result.take(0)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Customer {} not found", id)))
    }

    /// Store a fresh OTP
    pub async fn set_otp(&self, id: &str, otp: i32, otp_expires_at: i64) -> RepoResult<Customer> {
        let thing = parse_record_id(id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $id SET otp = $otp, otp_expires_at = $otp_expires_at RETURN AFTER")
            .bind(("id", thing))
            .bind(("otp", otp))
            .bind(("otp_expires_at", otp_expires_at))
            .await?;
        let updated: Option<Customer> = result.take(0)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Customer {} not found", id)))
    }

    /// Mark the account verified and clear the pending OTP
    pub async fn mark_verified(&self, id: &str) -> RepoResult<Customer> {
        let thing = parse_record_id(id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $id SET verified = true, otp = NONE, otp_expires_at = NONE RETURN AFTER")
            .bind(("id", thing))
            .await?;
        let updated: Option<Customer> = result.take(0)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Customer {} not found", id)))
    }

    /// Replace the cart if nobody else wrote it first (compare-and-swap on
    /// `cart_version`). Returns `None` when the version check failed and the
    /// caller must re-read and retry.
    pub async fn swap_cart(
        &self,
        id: &str,
        cart: Vec<CartLineItem>,
        expected_version: i64,
    ) -> RepoResult<Option<Customer>> {
        let thing = parse_record_id(id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $id SET cart = $cart, cart_version = cart_version + 1
                   WHERE cart_version = $version RETURN AFTER"#,
            )
            .bind(("id", thing))
            .bind(("cart", cart))
            .bind(("version", expected_version))
            .await?;
        let updated: Option<Customer> = result.take(0)?;
        Ok(updated)
    }

    /// Unconditionally empty the cart
    pub async fn clear_cart(&self, id: &str) -> RepoResult<Customer> {
        let thing = parse_record_id(id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $id SET cart = [], cart_version = cart_version + 1 RETURN AFTER")
            .bind(("id", thing))
            .await?;
        let updated: Option<Customer> = result.take(0)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Customer {} not found", id)))
    }

    /// Empty the cart and append the new order reference in one
    /// single-document update.
    pub async fn clear_cart_and_append_order(
        &self,
        id: &str,
        order_ref: &str,
    ) -> RepoResult<Customer> {
        let thing = parse_record_id(id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $id SET cart = [], cart_version = cart_version + 1,
                   orders += $order RETURN AFTER"#,
            )
            .bind(("id", thing))
            .bind(("order", order_ref.to_string()))
            .await?;
        let updated: Option<Customer> = result.take(0)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Customer {} not found", id)))
    }
}

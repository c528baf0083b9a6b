//! Delivery User Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{DeliveryUser, DeliveryUserCreate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct DeliveryUserRepository {
    base: BaseRepository,
}

impl DeliveryUserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find delivery user by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<DeliveryUser>> {
        let thing = parse_record_id(id)?;
        let user: Option<DeliveryUser> = self.base.db().select(thing).await?;
        Ok(user)
    }

    /// Find delivery user by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<DeliveryUser>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM delivery_user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let users: Vec<DeliveryUser> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Find delivery user by email or phone (signup duplicate check)
    pub async fn find_by_email_or_phone(
        &self,
        email: &str,
        phone: &str,
    ) -> RepoResult<Option<DeliveryUser>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM delivery_user WHERE email = $email OR phone = $phone LIMIT 1")
            .bind(("email", email.to_string()))
            .bind(("phone", phone.to_string()))
            .await?;
        let users: Vec<DeliveryUser> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// All delivery users, newest first (admin surface)
    pub async fn find_all(&self) -> RepoResult<Vec<DeliveryUser>> {
        let users: Vec<DeliveryUser> = self
            .base
            .db()
            .query("SELECT * FROM delivery_user ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(users)
    }

    /// Riders eligible for assignment in a service area
    pub async fn find_available(&self, pincode: &str) -> RepoResult<Vec<DeliveryUser>> {
        let users: Vec<DeliveryUser> = self
            .base
            .db()
            .query(
                r#"SELECT * FROM delivery_user
                   WHERE pincode = $pincode AND verified = true AND is_available = true"#,
            )
            .bind(("pincode", pincode.to_string()))
            .await?
            .take(0)?;
        Ok(users)
    }

    /// Create a new delivery user
    pub async fn create(&self, data: DeliveryUserCreate, hash_pass: &str) -> RepoResult<DeliveryUser> {
        let now = shared::util::now_millis();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE delivery_user SET
                    email = $email,
                    phone = $phone,
                    hash_pass = $hash_pass,
                    first_name = $first_name,
                    last_name = $last_name,
                    address = $address,
                    pincode = $pincode,
                    verified = false,
                    is_available = false,
                    lat = 0.0,
                    lng = 0.0,
                    created_at = $now
                RETURN AFTER"#,
            )
            .bind(("email", data.email))
            .bind(("phone", data.phone))
            .bind(("hash_pass", hash_pass.to_string()))
            .bind(("first_name", data.first_name))
            .bind(("last_name", data.last_name))
            .bind(("address", data.address))
            .bind(("pincode", data.pincode))
            .bind(("now", now))
            .await?;

        let created: Option<DeliveryUser> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create delivery user".to_string()))
    }

    /// Update profile fields
    pub async fn update_profile(
        &self,
        id: &str,
        first_name: &str,
        last_name: &str,
        address: &str,
    ) -> RepoResult<DeliveryUser> {
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
        let updated: Option<DeliveryUser> = result.take(0)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Delivery user {} not found", id)))
    }

    /// Flip availability, optionally updating coordinates
    pub async fn toggle_availability(
        &self,
        id: &str,
        lat: Option<f64>,
        lng: Option<f64>,
    ) -> RepoResult<DeliveryUser> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Delivery user {} not found", id)))?;

        let thing = parse_record_id(id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $id SET is_available = $available, lat = $lat, lng = $lng RETURN AFTER")
            .bind(("id", thing))
            .bind(("available", !existing.is_available))
            .bind(("lat", lat.unwrap_or(existing.lat)))
            .bind(("lng", lng.unwrap_or(existing.lng)))
            .await?;
        let updated: Option<DeliveryUser> = result.take(0)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Delivery user {} not found", id)))
    }

    /// Admin verification toggle
    pub async fn set_verified(&self, id: &str, verified: bool) -> RepoResult<DeliveryUser> {
        let thing = parse_record_id(id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $id SET verified = $verified RETURN AFTER")
            .bind(("id", thing))
            .bind(("verified", verified))
            .await?;
        let updated: Option<DeliveryUser> = result.take(0)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Delivery user {} not found", id)))
    }
}

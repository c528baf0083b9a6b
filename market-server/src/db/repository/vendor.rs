//! Vendor Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Vendor, VendorCreate, VendorUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct VendorRepository {
    base: BaseRepository,
}

impl VendorRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find vendor by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Vendor>> {
        let thing = parse_record_id(id)?;
        let vendor: Option<Vendor> = self.base.db().select(thing).await?;
        Ok(vendor)
    }

    /// Find vendor by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Vendor>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM vendor WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let vendors: Vec<Vendor> = result.take(0)?;
        Ok(vendors.into_iter().next())
    }

    /// Find vendor by email or phone (creation duplicate check)
    pub async fn find_by_email_or_phone(
        &self,
        email: &str,
        phone: &str,
    ) -> RepoResult<Option<Vendor>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM vendor WHERE email = $email OR phone = $phone LIMIT 1")
            .bind(("email", email.to_string()))
            .bind(("phone", phone.to_string()))
            .await?;
        let vendors: Vec<Vendor> = result.take(0)?;
        Ok(vendors.into_iter().next())
    }

    /// All vendors, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Vendor>> {
        let vendors: Vec<Vendor> = self
            .base
            .db()
            .query("SELECT * FROM vendor ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(vendors)
    }

    /// Vendors currently serving a service-area code, best rated first
    pub async fn find_available_by_pincode(&self, pincode: &str) -> RepoResult<Vec<Vendor>> {
        let vendors: Vec<Vendor> = self
            .base
            .db()
            .query(
                r#"SELECT * FROM vendor
                   WHERE pincode = $pincode AND service_available = true
                   ORDER BY rating DESC"#,
            )
            .bind(("pincode", pincode.to_string()))
            .await?
            .take(0)?;
        Ok(vendors)
    }

    /// Create a new vendor (admin surface)
    pub async fn create(&self, data: VendorCreate, hash_pass: &str) -> RepoResult<Vendor> {
        if self
            .find_by_email_or_phone(&data.email, &data.phone)
            .await?
            .is_some()
        {
            return Err(RepoError::Duplicate(
                "A vendor with this email or phone number already exists".to_string(),
            ));
        }

        let now = shared::util::now_millis();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE vendor SET
                    name = $name,
                    owner_name = $owner_name,
                    food_type = $food_type,
                    address = $address,
                    pincode = $pincode,
                    email = $email,
                    phone = $phone,
                    hash_pass = $hash_pass,
                    service_available = false,
                    rating = 0.0,
                    lat = 0.0,
                    lng = 0.0,
                    foods = [],
                    created_at = $now
                RETURN AFTER"#,
            )
            .bind(("name", data.name))
            .bind(("owner_name", data.owner_name))
            .bind(("food_type", data.food_type))
            .bind(("address", data.address))
            .bind(("pincode", data.pincode))
            .bind(("email", data.email))
            .bind(("phone", data.phone))
            .bind(("hash_pass", hash_pass.to_string()))
            .bind(("now", now))
            .await?;

        let created: Option<Vendor> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create vendor".to_string()))
    }

    /// Update profile fields, keeping existing values for anything unset
    pub async fn update_profile(&self, id: &str, data: VendorUpdate) -> RepoResult<Vendor> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Vendor {} not found", id)))?;

        let thing = parse_record_id(id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $id SET
                    name = $name,
                    phone = $phone,
                    address = $address,
                    food_type = $food_type
                RETURN AFTER"#,
            )
            .bind(("id", thing))
            .bind(("name", data.name.unwrap_or(existing.name)))
            .bind(("phone", data.phone.unwrap_or(existing.phone)))
            .bind(("address", data.address.or(existing.address)))
            .bind(("food_type", data.food_type.unwrap_or(existing.food_type)))
            .await?;
        let updated: Option<Vendor> = result.take(0)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Vendor {} not found", id)))
    }

    /// Flip service availability, optionally updating coordinates
    pub async fn toggle_service(
        &self,
        id: &str,
        lat: Option<f64>,
        lng: Option<f64>,
    ) -> RepoResult<Vendor> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Vendor {} not found", id)))?;

        let thing = parse_record_id(id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $id SET service_available = $available, lat = $lat, lng = $lng RETURN AFTER")
            .bind(("id", thing))
            .bind(("available", !existing.service_available))
            .bind(("lat", lat.unwrap_or(existing.lat)))
            .bind(("lng", lng.unwrap_or(existing.lng)))
            .await?;
        let updated: Option<Vendor> = result.take(0)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Vendor {} not found", id)))
    }

    /// Append a food reference to the vendor's catalog list
    pub async fn add_food(&self, id: &str, food_ref: &str) -> RepoResult<Vendor> {
        let thing = parse_record_id(id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $id SET foods += $food RETURN AFTER")
            .bind(("id", thing))
            .bind(("food", food_ref.to_string()))
            .await?;
        let updated: Option<Vendor> = result.take(0)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Vendor {} not found", id)))
    }
}

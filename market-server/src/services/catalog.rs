//! Catalog Service
//!
//! Read-side access to foods and vendors for the order pipeline. The batch
//! food resolution is all-or-nothing: one missing id fails the whole call,
//! so no partially priced order can ever be built from its result.

use crate::db::repository::{FoodRepository, VendorRepository};
use crate::db::models::{Food, Vendor};
use shared::{AppError, AppResult, ErrorCode};
use std::collections::HashMap;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct CatalogService {
    foods: FoodRepository,
    vendors: VendorRepository,
}

impl CatalogService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            foods: FoodRepository::new(db.clone()),
            vendors: VendorRepository::new(db),
        }
    }

    /// Resolve a single food, failing NotFound if absent
    pub async fn food(&self, food_id: &str) -> AppResult<Food> {
        self.foods.find_by_id(food_id).await?.ok_or_else(|| {
            AppError::with_message(ErrorCode::FoodNotFound, format!("Food {} not found", food_id))
        })
    }

    /// Resolve a batch of food ids, keyed by their "table:key" form.
    ///
    /// Fails with `FoodNotFound` listing every missing id if any id does
    /// not resolve.
    pub async fn resolve_foods(&self, food_ids: &[String]) -> AppResult<HashMap<String, Food>> {
        let mut unique: Vec<String> = food_ids.to_vec();
        unique.sort();
        unique.dedup();

        let found = self.foods.find_many(&unique).await?;
        let map: HashMap<String, Food> = found
            .into_iter()
            .filter_map(|f| {
                let key = f.id.as_ref()?.to_string();
                Some((key, f))
            })
            .collect();

        let missing: Vec<&String> = unique.iter().filter(|id| !map.contains_key(*id)).collect();
        if !missing.is_empty() {
            return Err(AppError::with_message(
                ErrorCode::FoodNotFound,
                format!("{} food item(s) could not be resolved", missing.len()),
            )
            .with_detail(
                "missing",
                serde_json::Value::from(
                    missing.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
                ),
            ));
        }

        Ok(map)
    }

    /// Resolve a vendor, failing NotFound if absent
    pub async fn vendor(&self, vendor_id: &str) -> AppResult<Vendor> {
        self.vendors
            .find_by_id(vendor_id)
            .await?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::VendorNotFound,
                    format!("Vendor {} not found", vendor_id),
                )
            })
    }
}

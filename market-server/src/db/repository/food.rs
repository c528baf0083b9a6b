//! Food Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Food, FoodCreate};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct FoodRepository {
    base: BaseRepository,
}

impl FoodRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find food by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Food>> {
        let thing = parse_record_id(id)?;
        let food: Option<Food> = self.base.db().select(thing).await?;
        Ok(food)
    }

    /// Batch lookup by id. Returns only the foods that exist; the caller
    /// decides whether a shorter result set is an error.
    pub async fn find_many(&self, ids: &[String]) -> RepoResult<Vec<Food>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let things: Vec<RecordId> = ids
            .iter()
            .map(|id| parse_record_id(id))
            .collect::<RepoResult<_>>()?;
        let foods: Vec<Food> = self
            .base
            .db()
            .query("SELECT * FROM food WHERE id IN $ids")
            .bind(("ids", things))
            .await?
            .take(0)?;
        Ok(foods)
    }

    /// All foods of one vendor
    pub async fn find_by_vendor(&self, vendor_ref: &str) -> RepoResult<Vec<Food>> {
        let foods: Vec<Food> = self
            .base
            .db()
            .query("SELECT * FROM food WHERE vendor = $vendor ORDER BY name")
            .bind(("vendor", vendor_ref.to_string()))
            .await?
            .take(0)?;
        Ok(foods)
    }

    /// All foods of a set of vendors
    pub async fn find_by_vendors(&self, vendor_refs: Vec<String>) -> RepoResult<Vec<Food>> {
        if vendor_refs.is_empty() {
            return Ok(vec![]);
        }
        let foods: Vec<Food> = self
            .base
            .db()
            .query("SELECT * FROM food WHERE vendor IN $vendors")
            .bind(("vendors", vendor_refs))
            .await?
            .take(0)?;
        Ok(foods)
    }

    /// Create a new food for a vendor
    pub async fn create(&self, vendor_ref: &str, data: FoodCreate) -> RepoResult<Food> {
        let now = shared::util::now_millis();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE food SET
                    vendor = $vendor,
                    name = $name,
                    description = $description,
                    category = $category,
                    food_type = $food_type,
                    price = $price,
                    ready_time = $ready_time,
                    rating = 0.0,
                    created_at = $now
                RETURN AFTER"#,
            )
            .bind(("vendor", vendor_ref.to_string()))
            .bind(("name", data.name))
            .bind(("description", data.description))
            .bind(("category", data.category))
            .bind(("food_type", data.food_type))
            .bind(("price", data.price))
            .bind(("ready_time", data.ready_time.unwrap_or(0)))
            .bind(("now", now))
            .await?;

        let created: Option<Food> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create food".to_string()))
    }
}

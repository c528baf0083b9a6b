//! Order Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Order, OrderCreate};
use shared::OrderStatus;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let thing = parse_record_id(id)?;
        let order: Option<Order> = self.base.db().select(thing).await?;
        Ok(order)
    }

    /// Batch lookup (customer order history), oldest first
    pub async fn find_many(&self, ids: &[String]) -> RepoResult<Vec<Order>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let things: Vec<RecordId> = ids
            .iter()
            .map(|id| parse_record_id(id))
            .collect::<RepoResult<_>>()?;
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM `order` WHERE id IN $ids ORDER BY created_at ASC")
            .bind(("ids", things))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// A vendor's orders that still need attention (everything not yet
    /// delivered), newest first
    pub async fn find_active_by_vendor(&self, vendor_ref: &str) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                r#"SELECT * FROM `order`
                   WHERE vendor = $vendor AND status != $delivered
                   ORDER BY created_at DESC"#,
            )
            .bind(("vendor", vendor_ref.to_string()))
            .bind(("delivered", OrderStatus::Delivered))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Find one order scoped to its vendor
    pub async fn find_by_vendor_and_id(
        &self,
        vendor_ref: &str,
        order_id: &str,
    ) -> RepoResult<Option<Order>> {
        let order = self.find_by_id(order_id).await?;
        Ok(order.filter(|o| o.vendor.to_string() == vendor_ref))
    }

    /// Persist a new order in WAITING state
    pub async fn create(&self, data: OrderCreate) -> RepoResult<Order> {
        let now = shared::util::now_millis();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE $id SET
                    order_number = $order_number,
                    vendor = $vendor,
                    items = $items,
                    total_amount = $total_amount,
                    paid_amount = $paid_amount,
                    status = $status,
                    remarks = '',
                    delivery_user = NONE,
                    ready_time = $ready_time,
                    order_date = $order_date,
                    created_at = $now
                RETURN AFTER"#,
            )
            .bind(("id", data.id))
            .bind(("order_number", data.order_number))
            .bind(("vendor", data.vendor.to_string()))
            .bind(("items", data.items))
            .bind(("total_amount", data.total_amount))
            .bind(("paid_amount", data.paid_amount))
            .bind(("status", OrderStatus::Waiting))
            .bind(("ready_time", data.ready_time))
            .bind(("order_date", data.order_date))
            .bind(("now", now))
            .await?;

        let created: Option<Order> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Vendor-side processing update: status, remarks and optionally the
    /// preparation window
    pub async fn update_processing(
        &self,
        id: &str,
        status: OrderStatus,
        remarks: &str,
        ready_time: Option<i32>,
    ) -> RepoResult<Order> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))?;

        let thing = parse_record_id(id)?;
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $id SET status = $status, remarks = $remarks, ready_time = $ready_time RETURN AFTER",
            )
            .bind(("id", thing))
            .bind(("status", status))
            .bind(("remarks", remarks.to_string()))
            .bind(("ready_time", ready_time.unwrap_or(existing.ready_time)))
            .await?;
        let updated: Option<Order> = result.take(0)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Link a delivery user to the order
    pub async fn assign_delivery_user(
        &self,
        id: &str,
        delivery_user_ref: &str,
    ) -> RepoResult<Order> {
        let thing = parse_record_id(id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $id SET delivery_user = $delivery_user RETURN AFTER")
            .bind(("id", thing))
            .bind(("delivery_user", delivery_user_ref.to_string()))
            .await?;
        let updated: Option<Order> = result.take(0)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }
}

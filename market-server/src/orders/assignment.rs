//! Delivery Assignment
//!
//! Matches an order to an available delivery user by service area. The
//! policy is first-available: riders are filtered by the vendor's pincode,
//! verification and availability, with no distance ranking. Assignment is
//! idempotent and re-runnable, so a failed attempt can be retried later
//! (admin reassignment endpoint) without touching the order otherwise.

use crate::db::models::Order;
use crate::db::repository::{DeliveryUserRepository, OrderRepository, VendorRepository};
use shared::{AppError, AppResult, ErrorCode};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct DeliveryAssigner {
    vendors: VendorRepository,
    delivery_users: DeliveryUserRepository,
    orders: OrderRepository,
}

impl DeliveryAssigner {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            vendors: VendorRepository::new(db.clone()),
            delivery_users: DeliveryUserRepository::new(db.clone()),
            orders: OrderRepository::new(db),
        }
    }

    /// Assign the first eligible delivery user in the vendor's service
    /// area to the order.
    ///
    /// Fails with `DeliveryUserUnavailable` when nobody matches; the order
    /// itself is left untouched in that case.
    pub async fn assign(&self, order_id: &str, vendor_ref: &str) -> AppResult<Order> {
        let vendor = self.vendors.find_by_id(vendor_ref).await?.ok_or_else(|| {
            AppError::with_message(
                ErrorCode::VendorNotFound,
                format!("Vendor {} not found", vendor_ref),
            )
        })?;

        let candidates = self.delivery_users.find_available(&vendor.pincode).await?;

        let Some(rider) = candidates.first() else {
            tracing::warn!(
                order = %order_id,
                pincode = %vendor.pincode,
                "No delivery user available for assignment"
            );
            return Err(AppError::new(ErrorCode::DeliveryUserUnavailable));
        };

        let rider_ref = rider
            .id
            .as_ref()
            .map(|id| id.to_string())
            .ok_or_else(|| AppError::internal("delivery user record missing id"))?;

        let order = self
            .orders
            .assign_delivery_user(order_id, &rider_ref)
            .await?;

        tracing::info!(
            order = %order_id,
            delivery_user = %rider_ref,
            pincode = %vendor.pincode,
            "Delivery user assigned"
        );
        Ok(order)
    }
}

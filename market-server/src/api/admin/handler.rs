//! Admin API Handlers
//!
//! Vendor provisioning, transaction inspection, delivery-user verification
//! and manual delivery reassignment.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{DeliveryUser, Order, Transaction, Vendor, VendorCreate, hash_password};
use crate::db::repository::{
    DeliveryUserRepository, OrderRepository, TransactionRepository, VendorRepository,
};
use crate::orders::DeliveryAssigner;
use crate::utils::validation::{
    MAX_NAME_LEN, validate_pincode, validate_required_text,
};
use shared::{AppError, AppResult, ErrorCode};

/// POST /api/admin/vendor
pub async fn create_vendor(
    State(state): State<ServerState>,
    Json(req): Json<VendorCreate>,
) -> AppResult<Json<Vendor>> {
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&req.owner_name, "owner_name", MAX_NAME_LEN)?;
    validate_pincode(&req.pincode)?;

    let hash = hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

    let vendor = VendorRepository::new(state.db.clone())
        .create(req, &hash)
        .await?;
    Ok(Json(vendor))
}

/// GET /api/admin/vendors
pub async fn list_vendors(State(state): State<ServerState>) -> AppResult<Json<Vec<Vendor>>> {
    let vendors = VendorRepository::new(state.db.clone()).find_all().await?;
    Ok(Json(vendors))
}

/// GET /api/admin/vendor/{id}
pub async fn get_vendor(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vendor>> {
    let vendor = VendorRepository::new(state.db.clone())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::VendorNotFound, format!("Vendor {} not found", id))
        })?;
    Ok(Json(vendor))
}

/// GET /api/admin/transactions
pub async fn list_transactions(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<Transaction>>> {
    let txns = TransactionRepository::new(state.db.clone())
        .find_all()
        .await?;
    Ok(Json(txns))
}

/// GET /api/admin/transaction/{id}
pub async fn get_transaction(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Transaction>> {
    let txn = TransactionRepository::new(state.db.clone())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::TransactionNotFound,
                format!("Transaction {} not found", id),
            )
        })?;
    Ok(Json(txn))
}

/// GET /api/admin/delivery/users
pub async fn list_delivery_users(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<DeliveryUser>>> {
    let users = DeliveryUserRepository::new(state.db.clone())
        .find_all()
        .await?;
    Ok(Json(users))
}

/// GET /api/admin/delivery/user/{id}
pub async fn get_delivery_user(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeliveryUser>> {
    let user = DeliveryUserRepository::new(state.db.clone())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::DeliveryUserNotFound,
                format!("Delivery user {} not found", id),
            )
        })?;
    Ok(Json(user))
}

/// PUT /api/admin/delivery-user/verify/{id} - admin verification
pub async fn verify_delivery_user(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeliveryUser>> {
    let user = DeliveryUserRepository::new(state.db.clone())
        .set_verified(&id, true)
        .await?;
    Ok(Json(user))
}

/// PUT /api/admin/order/{id}/assign - retry delivery assignment for an
/// order left without a delivery user
pub async fn reassign_order(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = OrderRepository::new(state.db.clone())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::OrderNotFound, format!("Order {} not found", id))
        })?;

    let assigner = DeliveryAssigner::new(state.db.clone());
    let order = assigner.assign(&id, &order.vendor.to_string()).await?;
    Ok(Json(order))
}

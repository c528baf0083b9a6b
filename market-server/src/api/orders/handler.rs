//! Customer Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::Order;
use crate::db::repository::{CustomerRepository, OrderRepository};
use crate::orders::{CreateOrderRequest, OrderEngine};
use shared::{AppError, AppResult, ErrorCode, UserRole};

/// POST /api/customer/create-order
///
/// Creates the order through the engine. When delivery assignment fails,
/// the order still exists (and shows up under /orders), but the call
/// reports the assignment failure.
pub async fn create_order(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<CreateOrderRequest>,
) -> AppResult<Json<Order>> {
    user.require_role(UserRole::Customer)?;

    let engine = OrderEngine::new(state.db.clone());
    let created = engine.create_order(&user.id, req).await?;

    if let Some(err) = created.assignment_error {
        return Err(err);
    }
    Ok(Json(created.order))
}

/// GET /api/customer/orders - order history, oldest first
pub async fn list_orders(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Order>>> {
    user.require_role(UserRole::Customer)?;

    let customers = CustomerRepository::new(state.db.clone());
    let customer = customers
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CustomerNotFound))?;

    let ids: Vec<String> = customer.orders.iter().map(|id| id.to_string()).collect();
    let orders = OrderRepository::new(state.db.clone()).find_many(&ids).await?;
    Ok(Json(orders))
}

/// GET /api/customer/order/{id}
pub async fn get_order(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    user.require_role(UserRole::Customer)?;

    let order = OrderRepository::new(state.db.clone())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::OrderNotFound, format!("Order {} not found", id))
        })?;
    Ok(Json(order))
}

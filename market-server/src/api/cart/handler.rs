//! Cart API Handlers

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::cart::CartManager;
use crate::core::ServerState;
use crate::db::models::CartLineItem;
use shared::{AppResult, UserRole};

/// Add-to-cart payload. `quantity` is a delta: positive adds, negative
/// removes, and a line whose quantity drops to zero disappears.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub food_id: String,
    pub quantity: i32,
}

/// GET /api/customer/cart
pub async fn get_cart(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<CartLineItem>>> {
    user.require_role(UserRole::Customer)?;

    let manager = CartManager::new(state.db.clone(), state.cart_locks.clone());
    let cart = manager.snapshot(&user.id).await?;
    Ok(Json(cart))
}

/// POST /api/customer/cart
pub async fn add_to_cart(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<AddToCartRequest>,
) -> AppResult<Json<Vec<CartLineItem>>> {
    user.require_role(UserRole::Customer)?;

    let manager = CartManager::new(state.db.clone(), state.cart_locks.clone());
    let cart = manager
        .add_or_update_item(&user.id, &req.food_id, req.quantity)
        .await?;
    Ok(Json(cart))
}

/// DELETE /api/customer/cart
pub async fn clear_cart(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<CartLineItem>>> {
    user.require_role(UserRole::Customer)?;

    let manager = CartManager::new(state.db.clone(), state.cart_locks.clone());
    manager.clear(&user.id).await?;
    Ok(Json(vec![]))
}

//! Vendor API Handlers
//!
//! Login, profile/service management, the food catalog, incoming orders
//! and offers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Food, FoodCreate, Offer, OfferCreate, OfferUpdate, Order, Vendor, VendorUpdate};
use crate::db::repository::{FoodRepository, OfferRepository, OrderRepository, VendorRepository};
use crate::orders::{OrderEngine, ProcessOrderRequest};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, validate_dto, validate_optional_text,
    validate_required_text,
};
use shared::{AppError, AppResult, ErrorCode, UserRole};

/// Login payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 20))]
    pub password: String,
}

/// Service toggle payload (coordinates optional)
#[derive(Debug, Default, Deserialize)]
pub struct ServiceToggleRequest {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

/// Account payload plus a freshly minted token
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub vendor: Vendor,
}

fn vendor_ref(user: &CurrentUser) -> String {
    user.id.clone()
}

/// POST /api/vendor/login
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    validate_dto(&req)?;

    let repo = VendorRepository::new(state.db.clone());
    let vendor = repo
        .find_by_email(&req.email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    let valid = vendor
        .verify_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
    if !valid {
        return Err(AppError::invalid_credentials());
    }

    let id = vendor
        .id
        .as_ref()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("vendor record missing id"))?;
    let token = state
        .get_jwt_service()
        .generate_token(&id, &vendor.email, UserRole::Vendor, true)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    Ok(Json(AuthResponse { token, vendor }))
}

/// GET /api/vendor/profile
pub async fn get_profile(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vendor>> {
    user.require_role(UserRole::Vendor)?;

    let vendor = VendorRepository::new(state.db.clone())
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::VendorNotFound))?;
    Ok(Json(vendor))
}

/// PATCH /api/vendor/profile
pub async fn update_profile(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<VendorUpdate>,
) -> AppResult<Json<Vendor>> {
    user.require_role(UserRole::Vendor)?;

    if let Some(ref name) = req.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(req.address.as_deref(), "address", MAX_ADDRESS_LEN)?;

    let vendor = VendorRepository::new(state.db.clone())
        .update_profile(&user.id, req)
        .await?;
    Ok(Json(vendor))
}

/// PATCH /api/vendor/service - flip availability, optionally move
pub async fn toggle_service(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<ServiceToggleRequest>,
) -> AppResult<Json<Vendor>> {
    user.require_role(UserRole::Vendor)?;

    let vendor = VendorRepository::new(state.db.clone())
        .toggle_service(&user.id, req.lat, req.lng)
        .await?;
    Ok(Json(vendor))
}

// =============================================================================
// Foods
// =============================================================================

/// POST /api/vendor/foods
pub async fn add_food(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<FoodCreate>,
) -> AppResult<Json<Food>> {
    user.require_role(UserRole::Vendor)?;

    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    crate::orders::money::line_amount(req.price, 1)?;

    let food = FoodRepository::new(state.db.clone())
        .create(&vendor_ref(&user), req)
        .await?;

    let food_key = food
        .id
        .as_ref()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("food record missing id"))?;
    VendorRepository::new(state.db.clone())
        .add_food(&user.id, &food_key)
        .await?;

    Ok(Json(food))
}

/// GET /api/vendor/foods
pub async fn list_foods(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Food>>> {
    user.require_role(UserRole::Vendor)?;

    let foods = FoodRepository::new(state.db.clone())
        .find_by_vendor(&vendor_ref(&user))
        .await?;
    Ok(Json(foods))
}

// =============================================================================
// Orders
// =============================================================================

/// GET /api/vendor/orders - everything not yet delivered
pub async fn current_orders(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Order>>> {
    user.require_role(UserRole::Vendor)?;

    let orders = OrderRepository::new(state.db.clone())
        .find_active_by_vendor(&vendor_ref(&user))
        .await?;
    Ok(Json(orders))
}

/// GET /api/vendor/order/{id}
pub async fn order_details(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    user.require_role(UserRole::Vendor)?;

    let order = OrderRepository::new(state.db.clone())
        .find_by_vendor_and_id(&vendor_ref(&user), &id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::OrderNotFound, format!("Order {} not found", id))
        })?;
    Ok(Json(order))
}

/// PUT /api/vendor/order/{id}/process - status transition + remarks
pub async fn process_order(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<ProcessOrderRequest>,
) -> AppResult<Json<Order>> {
    user.require_role(UserRole::Vendor)?;
    validate_optional_text(req.remarks.as_deref(), "remarks", MAX_NOTE_LEN)?;

    let engine = OrderEngine::new(state.db.clone());
    let order = engine.process_order(&vendor_ref(&user), &id, req).await?;
    Ok(Json(order))
}

// =============================================================================
// Offers
// =============================================================================

/// GET /api/vendor/offers - own offers plus marketplace-wide ones
pub async fn list_offers(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Offer>>> {
    user.require_role(UserRole::Vendor)?;

    let offers = OfferRepository::new(state.db.clone())
        .find_for_vendor(&vendor_ref(&user))
        .await?;
    Ok(Json(offers))
}

/// POST /api/vendor/offers
pub async fn add_offer(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<OfferCreate>,
) -> AppResult<Json<Offer>> {
    user.require_role(UserRole::Vendor)?;

    validate_required_text(&req.title, "title", MAX_NAME_LEN)?;

    let offer = OfferRepository::new(state.db.clone())
        .create(&vendor_ref(&user), req)
        .await?;
    Ok(Json(offer))
}

/// PUT /api/vendor/offer/{id}
pub async fn edit_offer(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<OfferUpdate>,
) -> AppResult<Json<Offer>> {
    user.require_role(UserRole::Vendor)?;

    let offer = OfferRepository::new(state.db.clone())
        .update_if_owned(&vendor_ref(&user), &id, req)
        .await?;
    Ok(Json(offer))
}

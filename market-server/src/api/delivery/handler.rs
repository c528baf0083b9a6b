//! Delivery User API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{DeliveryUser, DeliveryUserCreate, hash_password};
use crate::db::repository::DeliveryUserRepository;
use crate::utils::validation::{validate_dto, validate_pincode};
use shared::{AppError, AppResult, ErrorCode, UserRole};

/// Signup payload
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 20))]
    pub password: String,
    #[validate(length(min = 8, max = 14))]
    pub phone: String,
    #[validate(length(min = 6, max = 64))]
    pub address: String,
    pub pincode: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Login payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 20))]
    pub password: String,
}

/// Profile update payload
#[derive(Debug, Deserialize, Validate)]
pub struct ProfileUpdateRequest {
    #[validate(length(min = 3, max = 16))]
    pub first_name: String,
    #[validate(length(min = 3, max = 16))]
    pub last_name: String,
    #[validate(length(min = 6, max = 64))]
    pub address: String,
}

/// Availability toggle payload (coordinates optional)
#[derive(Debug, Default, Deserialize)]
pub struct StatusToggleRequest {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

/// Account payload plus a freshly minted token
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub delivery_user: DeliveryUser,
}

fn mint_token(state: &ServerState, user: &DeliveryUser) -> AppResult<String> {
    let id = user
        .id
        .as_ref()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("delivery user record missing id"))?;
    state
        .get_jwt_service()
        .generate_token(&id, &user.email, UserRole::Delivery, user.verified)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))
}

/// POST /api/delivery/signup
pub async fn signup(
    State(state): State<ServerState>,
    Json(req): Json<SignupRequest>,
) -> AppResult<Json<AuthResponse>> {
    validate_dto(&req)?;
    validate_pincode(&req.pincode)?;

    let repo = DeliveryUserRepository::new(state.db.clone());
    if repo
        .find_by_email_or_phone(&req.email, &req.phone)
        .await?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::AccountExists));
    }

    let hash = hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

    let delivery_user = repo
        .create(
            DeliveryUserCreate {
                email: req.email,
                phone: req.phone,
                address: req.address,
                pincode: req.pincode,
                first_name: req.first_name,
                last_name: req.last_name,
            },
            &hash,
        )
        .await?;

    let token = mint_token(&state, &delivery_user)?;
    Ok(Json(AuthResponse {
        token,
        delivery_user,
    }))
}

/// POST /api/delivery/login
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    validate_dto(&req)?;

    let repo = DeliveryUserRepository::new(state.db.clone());
    let delivery_user = repo
        .find_by_email(&req.email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    let valid = delivery_user
        .verify_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
    if !valid {
        return Err(AppError::invalid_credentials());
    }

    let token = mint_token(&state, &delivery_user)?;
    Ok(Json(AuthResponse {
        token,
        delivery_user,
    }))
}

/// GET /api/delivery/profile
pub async fn get_profile(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<DeliveryUser>> {
    user.require_role(UserRole::Delivery)?;

    let delivery_user = DeliveryUserRepository::new(state.db.clone())
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::DeliveryUserNotFound))?;
    Ok(Json(delivery_user))
}

/// PATCH /api/delivery/profile
pub async fn edit_profile(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<ProfileUpdateRequest>,
) -> AppResult<Json<DeliveryUser>> {
    user.require_role(UserRole::Delivery)?;
    validate_dto(&req)?;

    let delivery_user = DeliveryUserRepository::new(state.db.clone())
        .update_profile(&user.id, &req.first_name, &req.last_name, &req.address)
        .await?;
    Ok(Json(delivery_user))
}

/// PUT /api/delivery/change-status - flip availability, optionally move
pub async fn change_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<StatusToggleRequest>,
) -> AppResult<Json<DeliveryUser>> {
    user.require_role(UserRole::Delivery)?;

    let delivery_user = DeliveryUserRepository::new(state.db.clone())
        .toggle_availability(&user.id, req.lat, req.lng)
        .await?;
    Ok(Json(delivery_user))
}

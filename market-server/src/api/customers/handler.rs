//! Customer API Handlers
//!
//! Signup, login, OTP verification and profile management.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Customer, hash_password};
use crate::db::repository::CustomerRepository;
use crate::services::{generate_otp, otp_matches};
use crate::utils::validation::validate_dto;
use shared::{ApiResponse, AppError, AppResult, ErrorCode, UserRole};

/// Signup payload
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 20))]
    pub password: String,
    #[validate(length(min = 8, max = 14))]
    pub phone: String,
}

/// Login payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 20))]
    pub password: String,
}

/// OTP verification payload
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub otp: i32,
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

/// Account payload plus a freshly minted token
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub customer: Customer,
}

fn customer_ref(customer: &Customer) -> AppResult<String> {
    customer
        .id
        .as_ref()
        .map(|id| id.to_string())
        .ok_or_else(|| AppError::internal("customer record missing id"))
}

fn mint_token(state: &ServerState, customer: &Customer) -> AppResult<String> {
    state
        .get_jwt_service()
        .generate_token(
            &customer_ref(customer)?,
            &customer.email,
            UserRole::Customer,
            customer.verified,
        )
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))
}

/// POST /api/customer/signup
pub async fn signup(
    State(state): State<ServerState>,
    Json(req): Json<SignupRequest>,
) -> AppResult<Json<AuthResponse>> {
    validate_dto(&req)?;

    let repo = CustomerRepository::new(state.db.clone());
    if repo
        .find_by_email_or_phone(&req.email, &req.phone)
        .await?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::AccountExists));
    }

    let hash = hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

    let otp = generate_otp();
    let customer = repo
        .create(&req.email, &req.phone, &hash, otp.code, otp.expires_at)
        .await?;

    // Delivery is awaited inline; a sink failure fails the signup
    state.otp_notifier.send(otp.code, &customer.phone).await?;

    let token = mint_token(&state, &customer)?;
    Ok(Json(AuthResponse { token, customer }))
}

/// POST /api/customer/login
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    validate_dto(&req)?;

    let repo = CustomerRepository::new(state.db.clone());
    let customer = repo
        .find_by_email(&req.email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    let valid = customer
        .verify_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
    if !valid {
        return Err(AppError::invalid_credentials());
    }

    let token = mint_token(&state, &customer)?;
    Ok(Json(AuthResponse { token, customer }))
}

/// PATCH /api/customer/verify - OTP verification
pub async fn verify(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<VerifyRequest>,
) -> AppResult<Json<AuthResponse>> {
    user.require_role(UserRole::Customer)?;

    let repo = CustomerRepository::new(state.db.clone());
    let customer = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CustomerNotFound))?;

    if customer.verified || customer.otp.is_none() || customer.otp_expires_at.is_none() {
        return Err(AppError::new(ErrorCode::AlreadyVerified));
    }

    if !otp_matches(customer.otp, customer.otp_expires_at, req.otp) {
        return Err(AppError::new(ErrorCode::OtpInvalid));
    }

    let customer = repo.mark_verified(&user.id).await?;
    let token = mint_token(&state, &customer)?;
    Ok(Json(AuthResponse { token, customer }))
}

/// GET /api/customer/otp - request a fresh OTP
pub async fn request_otp(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<()>>> {
    user.require_role(UserRole::Customer)?;

    let repo = CustomerRepository::new(state.db.clone());
    let customer = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CustomerNotFound))?;

    if customer.verified {
        return Err(AppError::new(ErrorCode::AlreadyVerified));
    }

    let otp = generate_otp();
    repo.set_otp(&user.id, otp.code, otp.expires_at).await?;
    state.otp_notifier.send(otp.code, &customer.phone).await?;

    Ok(Json(ApiResponse::success_with_message(
        "OTP sent successfully to your registered phone number",
        (),
    )))
}

/// GET /api/customer/profile
pub async fn get_profile(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Customer>> {
    user.require_role(UserRole::Customer)?;

    let repo = CustomerRepository::new(state.db.clone());
    let customer = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CustomerNotFound))?;
    Ok(Json(customer))
}

/// PATCH /api/customer/profile
pub async fn edit_profile(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<ProfileUpdateRequest>,
) -> AppResult<Json<Customer>> {
    user.require_role(UserRole::Customer)?;
    validate_dto(&req)?;

    let repo = CustomerRepository::new(state.db.clone());
    let customer = repo
        .update_profile(&user.id, &req.first_name, &req.last_name, &req.address)
        .await?;
    Ok(Json(customer))
}

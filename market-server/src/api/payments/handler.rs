//! Payment API Handlers
//!
//! Opening transactions and checking offers, on the customer surface.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Offer, Transaction};
use crate::payments::{OpenPaymentRequest, TransactionLedger};
use crate::pricing::OfferEvaluator;
use shared::{ApiResponse, AppResult, UserRole};

/// POST /api/customer/payment - open a transaction for the given amount
pub async fn open_payment(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<OpenPaymentRequest>,
) -> AppResult<Json<Transaction>> {
    user.require_role(UserRole::Customer)?;

    let ledger = TransactionLedger::new(state.db.clone());
    let txn = ledger
        .open(&user.id, req, state.payment_gateway.as_ref())
        .await?;
    Ok(Json(txn))
}

/// GET /api/customer/offer/verify/{id} - check an offer before paying
pub async fn verify_offer(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Offer>>> {
    user.require_role(UserRole::Customer)?;

    let evaluator = OfferEvaluator::new(state.db.clone());
    let offer = evaluator.verify_offer(&id).await?;
    Ok(Json(ApiResponse::success_with_message("Offer is valid", offer)))
}

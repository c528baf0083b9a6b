//! Payment API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/customer", payment_routes())
}

fn payment_routes() -> Router<ServerState> {
    Router::new()
        .route("/payment", post(handler::open_payment))
        .route("/offer/verify/{id}", get(handler::verify_offer))
}

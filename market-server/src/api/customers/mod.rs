//! Customer API module

mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/customer", customer_routes())
}

fn customer_routes() -> Router<ServerState> {
    Router::new()
        .route("/signup", post(handler::signup))
        .route("/login", post(handler::login))
        .route("/verify", patch(handler::verify))
        .route("/otp", get(handler::request_otp))
        .route(
            "/profile",
            get(handler::get_profile).patch(handler::edit_profile),
        )
}

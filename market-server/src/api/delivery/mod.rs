//! Delivery user API module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/delivery", delivery_routes())
}

fn delivery_routes() -> Router<ServerState> {
    Router::new()
        .route("/signup", post(handler::signup))
        .route("/login", post(handler::login))
        .route(
            "/profile",
            get(handler::get_profile).patch(handler::edit_profile),
        )
        .route("/change-status", put(handler::change_status))
}

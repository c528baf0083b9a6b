//! Admin API module
//!
//! Tokenless surface; see `auth::middleware::is_public_api_route`.

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin", admin_routes())
}

fn admin_routes() -> Router<ServerState> {
    Router::new()
        .route("/vendor", post(handler::create_vendor))
        .route("/vendor/{id}", get(handler::get_vendor))
        .route("/vendors", get(handler::list_vendors))
        .route("/transactions", get(handler::list_transactions))
        .route("/transaction/{id}", get(handler::get_transaction))
        .route("/delivery/users", get(handler::list_delivery_users))
        .route("/delivery/user/{id}", get(handler::get_delivery_user))
        .route(
            "/delivery-user/verify/{id}",
            put(handler::verify_delivery_user),
        )
        .route("/order/{id}/assign", put(handler::reassign_order))
}

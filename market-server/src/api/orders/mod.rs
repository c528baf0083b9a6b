//! Customer order API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/customer", order_routes())
}

fn order_routes() -> Router<ServerState> {
    Router::new()
        .route("/create-order", post(handler::create_order))
        .route("/orders", get(handler::list_orders))
        .route("/order/{id}", get(handler::get_order))
}

//! Cart API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/customer", cart_routes())
}

fn cart_routes() -> Router<ServerState> {
    Router::new().route(
        "/cart",
        get(handler::get_cart)
            .post(handler::add_to_cart)
            .delete(handler::clear_cart),
    )
}

//! Vendor API module

mod handler;

use axum::{
    Router,
    routing::{get, patch, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/vendor", vendor_routes())
}

fn vendor_routes() -> Router<ServerState> {
    Router::new()
        .route("/login", post(handler::login))
        .route(
            "/profile",
            get(handler::get_profile).patch(handler::update_profile),
        )
        .route("/service", patch(handler::toggle_service))
        .route("/foods", post(handler::add_food).get(handler::list_foods))
        .route("/orders", get(handler::current_orders))
        .route("/order/{id}", get(handler::order_details))
        .route("/order/{id}/process", put(handler::process_order))
        .route("/offers", get(handler::list_offers).post(handler::add_offer))
        .route("/offer/{id}", put(handler::edit_offer))
}

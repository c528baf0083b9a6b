//! Shopping API module (anonymous browsing)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/shopping", shopping_routes())
}

fn shopping_routes() -> Router<ServerState> {
    Router::new()
        .route("/top-restaurants/{pincode}", get(handler::top_restaurants))
        .route(
            "/foods-in-under-thirty-min/{pincode}",
            get(handler::foods_in_under_thirty_min),
        )
        .route("/search/{pincode}", get(handler::search_foods))
        .route("/offers/{pincode}", get(handler::offers))
        .route("/restaurant/{id}", get(handler::restaurant_by_id))
        .route("/{pincode}", get(handler::availability))
}

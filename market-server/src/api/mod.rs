//! API routing
//!
//! One module per surface:
//!
//! - [`customers`] - signup, login, OTP, profile
//! - [`cart`] - the customer's cart
//! - [`payments`] - opening transactions, offer checks
//! - [`orders`] - order creation and history (customer side)
//! - [`shopping`] - anonymous catalog browsing
//! - [`vendors`] - vendor login, foods, incoming orders, offers
//! - [`delivery`] - delivery-user accounts and availability
//! - [`admin`] - provisioning, transactions, verification, reassignment
//! - [`health`] - liveness

pub mod admin;
pub mod cart;
pub mod customers;
pub mod delivery;
pub mod health;
pub mod orders;
pub mod payments;
pub mod shopping;
pub mod vendors;

use axum::Router;
use axum::middleware::from_fn_with_state;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

/// Assemble the full application router with auth, tracing and CORS
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(customers::router())
        .merge(cart::router())
        .merge(payments::router())
        .merge(orders::router())
        .merge(shopping::router())
        .merge(vendors::router())
        .merge(delivery::router())
        .merge(admin::router())
        .layer(from_fn_with_state(state.clone(), require_auth))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

//! Market Server - food-delivery marketplace backend
//!
//! # Architecture overview
//!
//! A multi-role REST backend (admin, vendor, customer, delivery user) over
//! an embedded document database. The core is the order pipeline: cart →
//! payment transaction → order → delivery assignment.
//!
//! # Module structure
//!
//! ```text
//! market-server/src/
//! ├── core/          # config, state, server bootstrap
//! ├── auth/          # JWT tokens, extractor, middleware
//! ├── db/            # SurrealDB models and repositories
//! ├── cart/          # per-customer cart manager
//! ├── payments/      # transaction ledger + gateway collaborator
//! ├── pricing/       # offer evaluation
//! ├── orders/        # order engine, transitions, delivery assignment
//! ├── services/      # catalog reads, OTP notification
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # validation, logging
//! ```

pub mod api;
pub mod auth;
pub mod cart;
pub mod core;
pub mod db;
pub mod orders;
pub mod payments;
pub mod pricing;
pub mod services;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use cart::CartManager;
pub use core::{Config, Server, ServerState};
pub use orders::{DeliveryAssigner, OrderEngine};
pub use payments::TransactionLedger;
pub use pricing::OfferEvaluator;

// Re-export unified error types from shared
pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env (if present) and initialize logging
pub fn setup_environment() {
    dotenv::dotenv().ok();
    init_logger();
}

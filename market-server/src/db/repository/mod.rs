//! Repository Module
//!
//! Per-entity CRUD over SurrealDB tables, plus the atomic conditional
//! updates the order pipeline depends on (transaction claim, cart
//! compare-and-swap).

pub mod customer;
pub mod delivery_user;
pub mod food;
pub mod offer;
pub mod order;
pub mod transaction;
pub mod vendor;

// Re-exports
pub use customer::CustomerRepository;
pub use delivery_user::DeliveryUserRepository;
pub use food::FoodRepository;
pub use offer::OfferRepository;
pub use order::OrderRepository;
pub use transaction::TransactionRepository;
pub use vendor::VendorRepository;

use shared::{AppError, ErrorCode};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Parse a "table:key" id string, rejecting malformed input
pub fn parse_record_id(id: &str) -> RepoResult<surrealdb::RecordId> {
    id.parse()
        .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

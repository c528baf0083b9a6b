//! Shared types for the tiffin marketplace backend.
//!
//! Everything a client of `market-server` needs to speak its API lives
//! here: the unified error codes and response envelope, the domain enums
//! (order / transaction status, payment method, promo types, user roles),
//! and small id/time utilities.

pub mod error;
pub mod types;
pub mod util;

// Re-export the common surface
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use types::{
    OfferScope, OrderStatus, PaymentMethod, PromoType, TransactionStatus, UserRole,
};

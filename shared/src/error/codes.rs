//! Unified error codes for the marketplace backend
//!
//! Error codes are shared between the server and its clients and are
//! organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Cart errors
//! - 4xxx: Order errors
//! - 5xxx: Payment / offer errors
//! - 6xxx: Catalog errors
//! - 7xxx: Account errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient
/// serialization and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 6,
    /// Value out of range
    ValueOutOfRange = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,

    // ==================== 3xxx: Cart ====================
    /// Cart is empty
    CartEmpty = 3001,
    /// Concurrent cart update conflict (retries exhausted)
    CartConflict = 3002,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Requested order status transition is not allowed
    InvalidStatusTransition = 4002,
    /// Order items belong to more than one vendor
    VendorMismatch = 4003,
    /// No delivery user currently available for the order's service area
    DeliveryUserUnavailable = 4004,

    // ==================== 5xxx: Payment ====================
    /// Transaction not found
    TransactionNotFound = 5001,
    /// Transaction already completed (not OPEN)
    TransactionAlreadyClosed = 5002,
    /// Offer not found
    OfferNotFound = 5003,
    /// Offer is not active
    OfferInactive = 5004,
    /// Payment gateway declined the payment
    PaymentDeclined = 5005,

    // ==================== 6xxx: Catalog ====================
    /// Food not found
    FoodNotFound = 6001,
    /// Vendor not found
    VendorNotFound = 6002,
    /// No vendor serves the requested area
    NoServiceInArea = 6003,

    // ==================== 7xxx: Account ====================
    /// Customer not found
    CustomerNotFound = 7001,
    /// Delivery user not found
    DeliveryUserNotFound = 7002,
    /// Account is already verified
    AlreadyVerified = 7003,
    /// OTP is invalid or expired
    OtpInvalid = 7004,
    /// An account with this email or phone already exists
    AccountExists = 7005,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
    /// Notification delivery failed
    NotificationFailed = 9004,
}

impl ErrorCode {
    /// Get the numeric value of this error code
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::RequiredField => "Required field missing",
            Self::ValueOutOfRange => "Value out of range",

            Self::NotAuthenticated => "Please login first",
            Self::InvalidCredentials => "Invalid email or password",
            Self::TokenExpired => "Token expired",
            Self::TokenInvalid => "Invalid token",

            Self::PermissionDenied => "Permission denied",
            Self::RoleRequired => "Role required for this operation",

            Self::CartEmpty => "Cart is empty",
            Self::CartConflict => "Cart was modified concurrently",

            Self::OrderNotFound => "Order not found",
            Self::InvalidStatusTransition => "Order status transition not allowed",
            Self::VendorMismatch => "Order items must belong to a single vendor",
            Self::DeliveryUserUnavailable => "No delivery user currently available",

            Self::TransactionNotFound => "Transaction not found",
            Self::TransactionAlreadyClosed => "Transaction already completed",
            Self::OfferNotFound => "Offer not found",
            Self::OfferInactive => "Offer is not active",
            Self::PaymentDeclined => "Payment was declined",

            Self::FoodNotFound => "Food not found",
            Self::VendorNotFound => "Vendor not found",
            Self::NoServiceInArea => "No service available in your area currently",

            Self::CustomerNotFound => "Customer not found",
            Self::DeliveryUserNotFound => "Delivery user not found",
            Self::AlreadyVerified => "Account already verified",
            Self::OtpInvalid => "Invalid OTP",
            Self::AccountExists => "An account with this email or phone already exists",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::ConfigError => "Configuration error",
            Self::NotificationFailed => "Failed to deliver notification",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code as u16
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            6 => Self::RequiredField,
            7 => Self::ValueOutOfRange,

            1001 => Self::NotAuthenticated,
            1002 => Self::InvalidCredentials,
            1003 => Self::TokenExpired,
            1004 => Self::TokenInvalid,

            2001 => Self::PermissionDenied,
            2002 => Self::RoleRequired,

            3001 => Self::CartEmpty,
            3002 => Self::CartConflict,

            4001 => Self::OrderNotFound,
            4002 => Self::InvalidStatusTransition,
            4003 => Self::VendorMismatch,
            4004 => Self::DeliveryUserUnavailable,

            5001 => Self::TransactionNotFound,
            5002 => Self::TransactionAlreadyClosed,
            5003 => Self::OfferNotFound,
            5004 => Self::OfferInactive,
            5005 => Self::PaymentDeclined,

            6001 => Self::FoodNotFound,
            6002 => Self::VendorNotFound,
            6003 => Self::NoServiceInArea,

            7001 => Self::CustomerNotFound,
            7002 => Self::DeliveryUserNotFound,
            7003 => Self::AlreadyVerified,
            7004 => Self::OtpInvalid,
            7005 => Self::AccountExists,

            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::ConfigError,
            9004 => Self::NotificationFailed,

            _ => return Err(format!("unknown error code: {}", value)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for code in [
            ErrorCode::Success,
            ErrorCode::NotFound,
            ErrorCode::TransactionAlreadyClosed,
            ErrorCode::DeliveryUserUnavailable,
            ErrorCode::DatabaseError,
        ] {
            let raw: u16 = code.into();
            assert_eq!(ErrorCode::try_from(raw).unwrap(), code);
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert!(ErrorCode::try_from(12345u16).is_err());
    }
}

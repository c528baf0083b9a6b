//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::OrderNotFound
            | Self::TransactionNotFound
            | Self::OfferNotFound
            | Self::FoodNotFound
            | Self::VendorNotFound
            | Self::NoServiceInArea
            | Self::CustomerNotFound
            | Self::DeliveryUserNotFound
            | Self::DeliveryUserUnavailable => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::AccountExists
            | Self::TransactionAlreadyClosed
            | Self::CartConflict => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied | Self::RoleRequired => StatusCode::FORBIDDEN,

            // 402 Payment Required
            Self::PaymentDeclined => StatusCode::PAYMENT_REQUIRED,

            // 422 Unprocessable Entity (state violations)
            Self::CartEmpty
            | Self::InvalidStatusTransition
            | Self::VendorMismatch
            | Self::OfferInactive
            | Self::AlreadyVerified => StatusCode::UNPROCESSABLE_ENTITY,

            // 500 Internal Server Error
            Self::InternalError
            | Self::DatabaseError
            | Self::ConfigError
            | Self::NotificationFailed => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        assert_eq!(ErrorCode::NotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::FoodNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::DeliveryUserUnavailable.http_status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_conflict_status() {
        assert_eq!(
            ErrorCode::TransactionAlreadyClosed.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(ErrorCode::AccountExists.http_status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_unauthorized_status() {
        assert_eq!(
            ErrorCode::NotAuthenticated.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::InvalidCredentials.http_status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_state_violation_status() {
        assert_eq!(
            ErrorCode::InvalidStatusTransition.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ErrorCode::CartEmpty.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_validation_default_status() {
        assert_eq!(
            ErrorCode::ValidationFailed.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ErrorCode::OtpInvalid.http_status(), StatusCode::BAD_REQUEST);
    }
}

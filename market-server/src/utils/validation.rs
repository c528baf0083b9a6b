//! Input validation helpers
//!
//! Centralized text length constants and validation functions. Limits
//! mirror what the DTO-level `validator` derives enforce, for the places
//! where a value arrives outside a derived DTO.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: vendor, food, offer titles
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions, remarks
pub const MAX_NOTE_LEN: usize = 500;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;
pub const MIN_PASSWORD_LEN: usize = 8;

/// Phone numbers
pub const MAX_PHONE_LEN: usize = 14;
pub const MIN_PHONE_LEN: usize = 8;

/// Street addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Service-area codes (postal pincode)
pub const MAX_PINCODE_LEN: usize = 6;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate an optional string's length when present.
pub fn validate_optional_text(
    value: Option<&str>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Run a `validator`-derived DTO and fold field errors into an AppError.
pub fn validate_dto<T: validator::Validate>(dto: &T) -> Result<(), AppError> {
    dto.validate().map_err(|e| {
        AppError::validation("Input validation errors")
            .with_detail("errors", serde_json::to_value(&e).unwrap_or_default())
    })
}

/// Validate a service-area code: non-empty, digits only, bounded length.
pub fn validate_pincode(value: &str) -> Result<(), AppError> {
    if value.is_empty() || value.len() > MAX_PINCODE_LEN {
        return Err(AppError::validation(format!(
            "pincode must be 1-{MAX_PINCODE_LEN} characters"
        )));
    }
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::validation("pincode must contain only digits"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Pasta", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("  ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(201), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_pincode() {
        assert!(validate_pincode("560001").is_ok());
        assert!(validate_pincode("").is_err());
        assert!(validate_pincode("56000a").is_err());
        assert!(validate_pincode("5600011").is_err());
    }
}

//! JWT token service
//!
//! Token generation, validation and the authenticated-user context.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use shared::UserRole;
use thiserror::Error;

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Signing secret (at least 32 bytes)
    pub secret: String,
    /// Token lifetime in minutes
    pub expiration_minutes: i64,
    /// Token issuer
    pub issuer: String,
    /// Token audience
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: load_jwt_secret(),
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440), // 24 hours
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "market-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "market-clients".to_string()),
        }
    }
}

/// Load the JWT secret from the environment.
///
/// In debug builds a missing/short secret falls back to a generated
/// temporary key; release builds refuse to start without one.
fn load_jwt_secret() -> String {
    match std::env::var("JWT_SECRET") {
        Ok(secret) if secret.len() >= 32 => secret,
        _ => {
            #[cfg(debug_assertions)]
            {
                tracing::warn!("JWT_SECRET not set or too short; generating a temporary key");
                generate_secret()
            }
            #[cfg(not(debug_assertions))]
            {
                panic!("JWT_SECRET must be set (>= 32 characters) in production");
            }
        }
    }
}

/// Generate a random printable signing secret (development only)
#[cfg(debug_assertions)]
fn generate_secret() -> String {
    use rand::Rng;
    const CHARS: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*-_=+";
    let mut rng = rand::thread_rng();
    (0..64)
        .map(|_| CHARS[rng.gen_range(0..CHARS.len())] as char)
        .collect()
}

/// Claims stored in a token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id (subject), "table:key" form
    pub sub: String,
    /// Account email
    pub email: String,
    /// Actor role: admin | vendor | customer | delivery
    pub role: String,
    /// Whether the account passed OTP/admin verification
    pub verified: bool,
    /// Expiry timestamp (seconds)
    pub exp: i64,
    /// Issued-at timestamp (seconds)
    pub iat: i64,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
}

/// JWT errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

/// JWT token service
#[derive(Debug, Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new() -> Self {
        Self::with_config(JwtConfig::default())
    }

    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Generate a token for an authenticated account
    pub fn generate_token(
        &self,
        user_id: &str,
        email: &str,
        role: UserRole,
        verified: bool,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role: role.as_str().to_string(),
            verified,
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Validate and decode a token
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidToken => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::InvalidToken(format!("Token validation failed: {}", e)),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Extract the token from an Authorization header value
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new()
    }
}

/// Authenticated user context, parsed from JWT claims
///
/// Created by the auth middleware/extractor and passed explicitly into
/// every handler that needs the caller's identity.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Account id ("table:key" form)
    pub id: String,
    /// Account email
    pub email: String,
    /// Actor role
    pub role: UserRole,
    /// Whether the account is verified
    pub verified: bool,
}

impl TryFrom<Claims> for CurrentUser {
    type Error = String;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let role = UserRole::parse(&claims.role)
            .ok_or_else(|| format!("unknown role in token: {}", claims.role))?;
        Ok(Self {
            id: claims.sub,
            email: claims.email,
            role,
            verified: claims.verified,
        })
    }
}

impl CurrentUser {
    /// Require a specific role, failing with a permission error otherwise
    pub fn require_role(&self, role: UserRole) -> Result<(), shared::AppError> {
        if self.role == role {
            Ok(())
        } else {
            Err(shared::AppError::with_message(
                shared::ErrorCode::RoleRequired,
                format!("{} role required", role),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> JwtService {
        JwtService::with_config(JwtConfig {
            secret: "test-secret-test-secret-test-secret!".to_string(),
            expiration_minutes: 60,
            issuer: "market-server".to_string(),
            audience: "market-clients".to_string(),
        })
    }

    #[test]
    fn test_token_roundtrip() {
        let service = test_service();
        let token = service
            .generate_token("customer:abc", "jane@example.com", UserRole::Customer, true)
            .expect("generate");

        let claims = service.validate_token(&token).expect("validate");
        assert_eq!(claims.sub, "customer:abc");
        assert_eq!(claims.email, "jane@example.com");
        assert_eq!(claims.role, "customer");
        assert!(claims.verified);
    }

    #[test]
    fn test_tampered_token_rejected() {
        let service = test_service();
        let token = service
            .generate_token("vendor:v1", "shop@example.com", UserRole::Vendor, true)
            .expect("generate");

        let mut tampered = token.clone();
        tampered.push('x');
        assert!(service.validate_token(&tampered).is_err());
    }

    #[test]
    fn test_current_user_from_claims() {
        let service = test_service();
        let token = service
            .generate_token("delivery:d1", "rider@example.com", UserRole::Delivery, false)
            .expect("generate");
        let claims = service.validate_token(&token).expect("validate");

        let user = CurrentUser::try_from(claims).expect("convert");
        assert_eq!(user.role, UserRole::Delivery);
        assert!(!user.verified);
        assert!(user.require_role(UserRole::Delivery).is_ok());
        assert!(user.require_role(UserRole::Admin).is_err());
    }
}

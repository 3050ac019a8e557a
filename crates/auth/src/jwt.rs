//! # JWT Token Management
//!
//! JWT token generation and validation for API authentication. Tokens are
//! HS256-signed and carry the account id, email and role; expiry is the only
//! invalidation mechanism.

use std::time::{Duration, SystemTime};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::JwtConfig;

/// Errors produced while creating or verifying a token.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,

    /// Account email
    pub email: String,

    /// Account role (`ADMIN`, `MANAGER` or `CUSTOMER`)
    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: u64,

    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

/// Creates a new JWT access token
///
/// # Errors
///
/// Returns an error if the system clock is unavailable or token encoding
/// fails.
pub fn create_token(config: &JwtConfig, account_id: &str, email: &str, role: &str) -> Result<String, TokenError> {
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map_err(|e| TokenError::Invalid(format!("Failed to get current time: {}", e)))?;

    let issued_at = now.as_secs();
    let expiration = now + Duration::from_secs(config.expiration_seconds);

    let claims = Claims {
        sub:   account_id.to_string(),
        email: email.to_string(),
        role:  role.to_string(),
        iat:   issued_at,
        exp:   expiration.as_secs(),
    };

    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| TokenError::Invalid(format!("Failed to encode token: {}", e)))?;

    Ok(token)
}

/// Validates a JWT token and returns the claims
///
/// # Errors
///
/// `Expired` when the token's `exp` has passed, `InvalidSignature` when the
/// signature does not match the configured secret, `Invalid` for anything
/// else (malformed token, wrong algorithm).
pub fn verify_token(config: &JwtConfig, token: &str) -> Result<Claims, TokenError> {
    let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

    let mut validation = Validation::default();
    validation.validate_exp = true;

    let data = jsonwebtoken::decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::Invalid(e.to_string()),
        }
    })?;

    Ok(data.claims)
}

/// Extracts the Bearer token from the Authorization header
///
/// Returns the token string if present, or None if missing/invalid.
pub fn extract_bearer_token(auth_header: &str) -> Option<String> {
    if !auth_header.starts_with("Bearer ") {
        return None;
    }

    let token = auth_header.trim_start_matches("Bearer ").trim();

    if token.is_empty() {
        return None;
    }

    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JwtConfig;

    fn test_config() -> JwtConfig {
        JwtConfig::new("test-secret-key-that-is-at-least-32-bytes-long")
    }

    #[test]
    fn test_create_and_verify_token() {
        let config = test_config();

        let token = create_token(
            &config,
            "3b1f8a60-9f5e-4f9a-a2cd-6f1f0a1b2c3d",
            "admin@cardealers.com",
            "ADMIN",
        )
        .expect("Failed to create token");

        assert!(!token.is_empty());

        let claims = verify_token(&config, &token).expect("Failed to verify token");

        assert_eq!(claims.sub, "3b1f8a60-9f5e-4f9a-a2cd-6f1f0a1b2c3d");
        assert_eq!(claims.email, "admin@cardealers.com");
        assert_eq!(claims.role, "ADMIN");
        assert_eq!(claims.exp - claims.iat, config.expiration_seconds);
    }

    #[test]
    fn test_wrong_secret_fails_verification() {
        let config = test_config();
        let token = create_token(&config, "id", "a@b.com", "MANAGER").unwrap();

        let other = JwtConfig::new("a-completely-different-secret-value-here");
        assert!(matches!(
            verify_token(&other, &token),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // jsonwebtoken applies a default 60s leeway, so back-date well past it.
        let config = test_config();
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap()
            .as_secs();

        let claims = Claims {
            sub:   "id".to_string(),
            email: "a@b.com".to_string(),
            role:  "CUSTOMER".to_string(),
            iat:   now - 7200,
            exp:   now - 3600,
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            verify_token(&config, &token),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_extract_bearer_token() {
        let token = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.test-token";
        let auth_header = format!("Bearer {}", token);

        let extracted = extract_bearer_token(&auth_header).expect("Failed to extract token");

        assert_eq!(extracted, token);
    }

    #[test]
    fn test_extract_bearer_token_invalid_format() {
        assert!(extract_bearer_token("Basic abc123").is_none());
        assert!(extract_bearer_token("Bearer").is_none());
        assert!(extract_bearer_token("").is_none());
    }
}

//! # Authentication Middleware
//!
//! JWT authentication middleware for protecting API endpoints, plus the
//! role allow-list gate layered on top of it.

use auth::jwt::{extract_bearer_token, verify_token, TokenError};
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use entity::UserRole;
use error::{AppError, Result};
use uuid::Uuid;

use crate::AppState;

/// Identity extracted from a verified JWT token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Account ID
    pub id:    Uuid,
    /// Account email
    pub email: String,
    /// Account role
    pub role:  UserRole,
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Verifies the JWT token
/// 3. Adds the authenticated identity to request extensions
/// 4. Rejects requests with invalid/missing tokens as 401
pub async fn authenticate(State(state): State<AppState>, mut request: Request, next: Next) -> Result<Response> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::unauthorized("No token provided"))?
        .to_str()
        .map_err(|_| AppError::unauthorized("Invalid authorization header encoding"))?;

    let token =
        extract_bearer_token(auth_header).ok_or_else(|| AppError::unauthorized("Invalid authorization header"))?;

    let claims = verify_token(&state.jwt_config, &token).map_err(|e| {
        match e {
            TokenError::Expired => AppError::unauthorized("Token has expired"),
            TokenError::InvalidSignature => AppError::unauthorized("Invalid token signature"),
            TokenError::Invalid(_) => AppError::unauthorized("Invalid token"),
        }
    })?;

    // A token whose claims do not form a valid identity is treated the same
    // as a malformed token.
    let id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::unauthorized("Invalid token"))?;
    let role: UserRole = claims
        .role
        .parse()
        .map_err(|_| AppError::unauthorized("Invalid token"))?;

    request.extensions_mut().insert(AuthenticatedUser {
        id,
        email: claims.email,
        role,
    });

    Ok(next.run(request).await)
}

/// Role authorization gate.
///
/// Must run after [`authenticate`]; a missing identity is rejected as 401
/// rather than panicking on route misconfiguration. A role outside the
/// allow-list is rejected as 403.
pub async fn authorize(allowed: &'static [UserRole], request: Request, next: Next) -> Result<Response> {
    let user = request
        .extensions()
        .get::<AuthenticatedUser>()
        .ok_or_else(|| AppError::unauthorized("Authentication required"))?;

    if !allowed.contains(&user.role) {
        return Err(AppError::forbidden("Access denied: insufficient permissions"));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use auth::jwt::extract_bearer_token;

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(
            extract_bearer_token("Bearer abc123"),
            Some("abc123".to_string())
        );
        assert_eq!(
            extract_bearer_token("Bearer   abc123   "),
            Some("abc123".to_string())
        );
        assert!(extract_bearer_token("Basic abc123").is_none());
        assert!(extract_bearer_token("Bearer").is_none());
        assert!(extract_bearer_token("").is_none());
    }
}

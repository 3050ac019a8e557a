//! Dealership Auth Primitives
//!
//! Password hashing (Argon2id) and JWT token issuance/verification. These are
//! the leaf building blocks consumed by the server's auth service and
//! middleware.

pub mod jwt;
pub mod password;

pub use secrecy;

/// Token expiry default: two hours.
pub const DEFAULT_TOKEN_EXPIRATION_SECONDS: u64 = 2 * 60 * 60;

/// JWT signing configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC signing secret.
    pub secret: String,
    /// Token lifetime in seconds; expiry is the only invalidation mechanism.
    pub expiration_seconds: u64,
}

impl JwtConfig {
    /// Creates a config with the default two-hour expiry.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiration_seconds: DEFAULT_TOKEN_EXPIRATION_SECONDS,
        }
    }

    /// Overrides the token lifetime.
    #[must_use]
    pub fn with_expiration(mut self, seconds: u64) -> Self {
        self.expiration_seconds = seconds;
        self
    }
}

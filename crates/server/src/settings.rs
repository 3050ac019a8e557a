//! # Server Settings
//!
//! Environment-based configuration for the API server. All variables carry
//! the `DEALERSHIP_` prefix except `RUST_LOG`.

use auth::{JwtConfig, DEFAULT_TOKEN_EXPIRATION_SECONDS};
use error::{AppError, Result};

/// Resolved server configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Address to bind to
    pub host:                   String,
    /// Port to bind to
    pub port:                   u16,
    /// Database connection string
    pub database_url:           String,
    /// JWT signing secret
    pub jwt_secret:             String,
    /// Token lifetime in seconds
    pub jwt_expiration_seconds: u64,
    /// Email of the seeded administrator account
    pub admin_email:            String,
    /// Initial password of the seeded administrator account
    pub admin_password:         String,
    /// Log level (debug, info, warn, error)
    pub log_level:              String,
    /// Log format (json, pretty, compact)
    pub log_format:             String,
}

impl Settings {
    /// Loads settings from the environment.
    ///
    /// # Errors
    ///
    /// Fails when `DEALERSHIP_DATABASE_URL` or `DEALERSHIP_JWT_SECRET` are
    /// missing, or when a numeric variable does not parse.
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var("DEALERSHIP_DATABASE_URL")
            .map_err(|_| AppError::config("DEALERSHIP_DATABASE_URL is not set"))?;
        let jwt_secret = std::env::var("DEALERSHIP_JWT_SECRET")
            .map_err(|_| AppError::config("DEALERSHIP_JWT_SECRET is not set"))?;

        let port = match std::env::var("DEALERSHIP_PORT") {
            Ok(raw) => {
                raw.parse::<u16>()
                    .map_err(|_| AppError::config(format!("DEALERSHIP_PORT is not a valid port: {}", raw)))?
            },
            Err(_) => 3000,
        };

        let jwt_expiration_seconds = match std::env::var("DEALERSHIP_JWT_EXPIRATION_SECONDS") {
            Ok(raw) => {
                raw.parse::<u64>().map_err(|_| {
                    AppError::config(format!(
                        "DEALERSHIP_JWT_EXPIRATION_SECONDS is not a valid duration: {}",
                        raw
                    ))
                })?
            },
            Err(_) => DEFAULT_TOKEN_EXPIRATION_SECONDS,
        };

        Ok(Self {
            host: std::env::var("DEALERSHIP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            database_url,
            jwt_secret,
            jwt_expiration_seconds,
            admin_email: std::env::var("DEALERSHIP_ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@cardealers.com".to_string()),
            admin_password: std::env::var("DEALERSHIP_ADMIN_PASSWORD").unwrap_or_else(|_| "Password1@".to_string()),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_format: std::env::var("DEALERSHIP_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
        })
    }

    /// Socket address string for the listener.
    #[must_use]
    pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

    /// JWT configuration derived from these settings.
    #[must_use]
    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig::new(self.jwt_secret.clone()).with_expiration(self.jwt_expiration_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_settings() -> Settings {
        Settings {
            host:                   "127.0.0.1".to_string(),
            port:                   3000,
            database_url:           "sqlite::memory:".to_string(),
            jwt_secret:             "secret".to_string(),
            jwt_expiration_seconds: 7200,
            admin_email:            "admin@cardealers.com".to_string(),
            admin_password:         "Password1@".to_string(),
            log_level:              "info".to_string(),
            log_format:             "pretty".to_string(),
        }
    }

    #[test]
    fn test_address_formatting() {
        let settings = base_settings();
        assert_eq!(settings.address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_jwt_config_carries_expiration() {
        let mut settings = base_settings();
        settings.jwt_expiration_seconds = 60;
        let config = settings.jwt_config();
        assert_eq!(config.expiration_seconds, 60);
        assert_eq!(config.secret, "secret");
    }
}

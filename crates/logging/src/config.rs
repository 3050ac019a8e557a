//! # Logging Configuration
//!
//! Configuration for the logging subsystem.
//! Supports environment variables and programmatic configuration.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

/// Logging configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct LoggingConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format (json, pretty, compact)
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String { "info".to_string() }

fn default_format() -> String { "json".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level:  default_level(),
            format: default_format(),
        }
    }
}

impl LoggingConfig {
    /// Create configuration from environment variables, falling back to the
    /// supplied values. `RUST_LOG` wins over everything for the level.
    pub fn from_env(level: &str, format: &str) -> Self {
        Self {
            level:  std::env::var("RUST_LOG")
                .ok()
                .unwrap_or_else(|| level.to_string()),
            format: std::env::var("DEALERSHIP_LOG_FORMAT")
                .ok()
                .unwrap_or_else(|| format.to_string()),
        }
    }

    /// Build the tracing subscriber from this configuration.
    pub fn build(&self) -> Box<dyn tracing::Subscriber + Send + Sync> {
        let filter = EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new("info"));

        match self.format.as_str() {
            "pretty" => Box::new(Registry::default().with(filter).with(fmt::layer().pretty())),
            "compact" => Box::new(Registry::default().with(filter).with(fmt::layer().compact())),
            _ => Box::new(Registry::default().with(filter).with(fmt::layer().json())),
        }
    }
}

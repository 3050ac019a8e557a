//! # Data Transfer Objects
//!
//! Request and response types with their validation schemas. Validation runs
//! at the handler boundary, before any business logic; update schemas mirror
//! the create schemas with every field optional.

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

pub mod auth;
pub mod cars;
pub mod categories;
pub mod purchases;

/// Vehicle identification numbers are 17 characters, excluding I, O and Q.
pub static VIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-HJ-NPR-Z0-9]{17}$").unwrap_or_else(|_| unreachable!("VIN pattern is a valid regex"))
});

/// Character-class password rule. Lookaheads are not available here, so the
/// classes are checked one by one.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| !c.is_ascii_alphanumeric());

    if password.len() >= 8 && has_lower && has_upper && has_digit && has_special {
        Ok(())
    }
    else {
        Err(ValidationError::new("password_strength").with_message(
            "Password must be at least 8 characters and contain an uppercase letter, a lowercase letter, a number \
             and a special character"
                .into(),
        ))
    }
}

/// Image lists carry absolute HTTP(S) URLs only.
pub fn validate_url_list(urls: &Vec<String>) -> Result<(), ValidationError> {
    for url in urls {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ValidationError::new("url").with_message("Image entries must be valid URLs".into()));
        }
    }
    Ok(())
}

//! Password hashing and verification using Argon2id.
//!
//! Hashes are stored in PHC string format. The cost parameters are fixed at
//! the crate defaults; verification derives them from the stored string, so
//! old hashes keep verifying if the defaults ever change.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString},
    Argon2,
};
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;
use thiserror::Error;

/// Errors that can occur during password operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Hashing failed: {0}")]
    HashingFailed(String),

    #[error("Verification failed: password does not match")]
    VerificationFailed,

    #[error("Invalid hash format")]
    InvalidHashFormat,
}

/// Hashes a password with Argon2id and a fresh random salt.
///
/// # Errors
///
/// Returns an error if the underlying hash computation fails.
pub fn hash_password(password: &SecretString) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verifies a candidate password against a stored PHC hash string.
///
/// The comparison of the derived output is constant-time.
///
/// # Errors
///
/// `InvalidHashFormat` when the stored value is not a parseable PHC string,
/// `VerificationFailed` when the password does not match.
pub fn verify_password(password: &SecretString, stored: &str) -> Result<(), PasswordError> {
    let parsed = PasswordHash::new(stored).map_err(|_| PasswordError::InvalidHashFormat)?;
    let expected = parsed.hash.ok_or(PasswordError::InvalidHashFormat)?;

    let salt = parsed.salt.ok_or(PasswordError::InvalidHashFormat)?;
    let candidate = Argon2::default()
        .hash_password(password.expose_secret().as_bytes(), salt)
        .map_err(|_| PasswordError::VerificationFailed)?;
    let candidate_hash = candidate.hash.ok_or(PasswordError::VerificationFailed)?;

    if candidate_hash.as_bytes().ct_eq(expected.as_bytes()).into() {
        Ok(())
    }
    else {
        Err(PasswordError::VerificationFailed)
    }
}

/// Returns true when a value already looks like an Argon2 PHC hash.
///
/// The account stores use this to refuse writing anything else to a password
/// column; plaintext never reaches persistence.
pub fn is_hashed(value: &str) -> bool { value.starts_with("$argon2") }

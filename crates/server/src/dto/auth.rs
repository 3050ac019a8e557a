//! # Authentication Data Transfer Objects
//!
//! Request and response types for registration, login, profile and
//! password-change endpoints.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::validate_password_strength;

/// Request body for login, shared by all three account kinds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Postal address of a customer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct AddressInput {
    #[validate(length(min = 1, message = "Street is required"))]
    pub street: String,

    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,

    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,

    #[validate(length(min = 1, message = "Zip code is required"))]
    pub zip_code: String,

    #[validate(length(min = 1, message = "Country is required"))]
    pub country: String,
}

/// Request body for customer self-registration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct RegisterCustomerRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,

    #[validate(length(min = 1, max = 50, message = "First name must be between 1 and 50 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50, message = "Last name must be between 1 and 50 characters"))]
    pub last_name: String,

    #[validate(length(min = 7, max = 20, message = "Phone must be between 7 and 20 characters"))]
    pub phone: String,

    #[validate(nested)]
    pub address: AddressInput,

    #[validate(custom(function = "validate_adult"))]
    pub date_of_birth: NaiveDate,

    #[validate(length(min = 1, max = 32, message = "License number is required"))]
    pub license_number: String,
}

/// Request body for manager registration (admin only).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct RegisterManagerRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,

    #[validate(length(min = 1, max = 50, message = "First name must be between 1 and 50 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50, message = "Last name must be between 1 and 50 characters"))]
    pub last_name: String,

    #[validate(length(min = 7, max = 20, message = "Phone must be between 7 and 20 characters"))]
    pub phone: String,
}

/// Request body for password change.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[validate(custom(function = "validate_password_strength"))]
    pub new_password: String,

    #[validate(must_match(other = "new_password", message = "Password confirmation does not match"))]
    pub confirm_password: String,
}

/// Response payload carrying a password-stripped account projection and a
/// bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub user:  serde_json::Value,
    pub token: String,
}

/// Registration requires the customer to be at least 18 years old.
pub fn validate_adult(date_of_birth: &NaiveDate) -> Result<(), ValidationError> {
    let today = Utc::now().date_naive();
    let age = today.years_since(*date_of_birth).unwrap_or(0);
    if age >= 18 {
        Ok(())
    }
    else {
        Err(ValidationError::new("minimum_age").with_message("You must be at least 18 years old to register".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer_request() -> RegisterCustomerRequest {
        RegisterCustomerRequest {
            email:          "jane@example.com".to_string(),
            password:       "Password1@".to_string(),
            first_name:     "Jane".to_string(),
            last_name:      "Doe".to_string(),
            phone:          "+15550100".to_string(),
            address:        AddressInput {
                street:   "1 Main St".to_string(),
                city:     "Springfield".to_string(),
                state:    "IL".to_string(),
                zip_code: "62701".to_string(),
                country:  "USA".to_string(),
            },
            date_of_birth:  NaiveDate::from_ymd_opt(1990, 6, 1).unwrap(),
            license_number: "DL-12345678".to_string(),
        }
    }

    #[test]
    fn test_register_customer_valid() {
        assert!(customer_request().validate().is_ok());
    }

    #[test]
    fn test_register_customer_rejects_minor() {
        let mut req = customer_request();
        req.date_of_birth = Utc::now().date_naive();
        let err = req.validate().unwrap_err();
        assert!(err.errors().contains_key("date_of_birth"));
    }

    #[test]
    fn test_register_customer_rejects_weak_password() {
        let mut req = customer_request();
        req.password = "password".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_customer_nested_address_errors() {
        let mut req = customer_request();
        req.address.city = String::new();
        let err = req.validate().unwrap_err();
        assert!(err.errors().contains_key("address"));
    }

    #[test]
    fn test_change_password_confirmation_must_match() {
        let req = ChangePasswordRequest {
            current_password: "Password1@".to_string(),
            new_password:     "NewPassword1@".to_string(),
            confirm_password: "Different1@".to_string(),
        };
        let err = req.validate().unwrap_err();
        assert!(err.errors().contains_key("confirm_password"));
    }

    #[test]
    fn test_login_requires_valid_email() {
        let req = LoginRequest {
            email:    "not-an-email".to_string(),
            password: "x".to_string(),
        };
        assert!(req.validate().is_err());
    }
}

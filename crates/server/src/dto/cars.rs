//! # Car Data Transfer Objects
//!
//! Request, query and response types for the inventory endpoints.

use chrono::{Datelike, Utc};
use entity::CarStatus;
use error::Pagination;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::{validate_url_list, VIN_RE};

/// Request body for car creation.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct CreateCarRequest {
    #[validate(length(min = 1, max = 50, message = "Make is required"))]
    pub make: String,

    #[validate(length(min = 1, max = 50, message = "Model name is required"))]
    pub model_name: String,

    #[validate(custom(function = "validate_year"))]
    pub year: i32,

    #[validate(range(min = 0.0, message = "Price must be a positive number"))]
    pub price: f64,

    #[validate(range(min = 0, message = "Mileage must be a positive number"))]
    pub mileage: i32,

    #[validate(length(min = 1, max = 30, message = "Color is required"))]
    pub color: String,

    pub category_id: Uuid,

    #[serde(default)]
    pub status: Option<CarStatus>,

    #[serde(default)]
    pub features: Vec<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_url_list"))]
    pub images: Vec<String>,

    #[validate(regex(path = *VIN_RE, message = "VIN must be 17 characters (digits and capital letters, excluding I, O and Q)"))]
    pub vin: String,
}

/// Request body for partial car updates. Unspecified fields preserve the
/// stored value.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Validate)]
pub struct UpdateCarRequest {
    #[validate(length(min = 1, max = 50, message = "Make is required"))]
    pub make: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Model name is required"))]
    pub model_name: Option<String>,

    #[validate(custom(function = "validate_year"))]
    pub year: Option<i32>,

    #[validate(range(min = 0.0, message = "Price must be a positive number"))]
    pub price: Option<f64>,

    #[validate(range(min = 0, message = "Mileage must be a positive number"))]
    pub mileage: Option<i32>,

    #[validate(length(min = 1, max = 30, message = "Color is required"))]
    pub color: Option<String>,

    pub category_id: Option<Uuid>,

    pub status: Option<CarStatus>,

    pub features: Option<Vec<String>>,

    #[validate(custom(function = "validate_url_list"))]
    pub images: Option<Vec<String>>,

    #[validate(regex(path = *VIN_RE, message = "VIN must be 17 characters (digits and capital letters, excluding I, O and Q)"))]
    pub vin: Option<String>,
}

/// Query parameters for the car listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CarQuery {
    /// Case-insensitive substring match across make, model name and VIN.
    pub search: Option<String>,

    /// Exact category filter.
    pub category: Option<Uuid>,

    /// Exact status filter; unknown values are ignored.
    pub status: Option<String>,

    pub min_price: Option<f64>,
    pub max_price: Option<f64>,

    /// Whitelisted sort field (price, year, mileage, created_at).
    pub sort_by: Option<String>,

    /// `asc` or `desc` (default).
    pub sort_order: Option<String>,

    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 { 1 }

fn default_limit() -> u64 { 10 }

impl Default for CarQuery {
    fn default() -> Self {
        Self {
            search:     None,
            category:   None,
            status:     None,
            min_price:  None,
            max_price:  None,
            sort_by:    None,
            sort_order: None,
            page:       default_page(),
            limit:      default_limit(),
        }
    }
}

/// Paged car listing.
#[derive(Debug, Clone, Serialize)]
pub struct CarListResponse {
    pub cars:       Vec<entity::cars::Model>,
    pub pagination: Pagination,
}

/// Model years run from 1900 through next year's models.
pub fn validate_year(year: i32) -> Result<(), ValidationError> {
    let max = Utc::now().year() + 1;
    if (1900..=max).contains(&year) {
        Ok(())
    }
    else {
        Err(ValidationError::new("year_range")
            .with_message(format!("Year must be between 1900 and {}", max).into()))
    }
}

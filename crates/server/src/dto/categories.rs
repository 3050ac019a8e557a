//! # Category Data Transfer Objects

use serde::Deserialize;
use validator::Validate;

/// Request body for category creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 500, message = "Description must be between 1 and 500 characters"))]
    pub description: String,
}

/// Request body for partial category updates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 500, message = "Description must be between 1 and 500 characters"))]
    pub description: Option<String>,
}

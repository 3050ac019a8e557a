//! Dealership Error Infrastructure
//!
//! Error types and the fixed API response envelope shared by every crate.

pub mod response;

pub use response::{ApiResponse, FieldError, Pagination};

/// Convenience type alias for Result with AppError.
pub type Result<T, E = AppError> = std::result::Result<T, E>;

/// Main application error type.
///
/// Every failure a request can produce maps to one of these variants; the
/// handler boundary converts them to the fixed JSON envelope. Write endpoints
/// downgrade `NotFound` to `BadRequest` via [`AppError::into_write_error`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("NotFound: {message}")]
    NotFound { message: String },

    #[error("BadRequest: {message}")]
    BadRequest { message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Conflict: {message}")]
    Conflict {
        /// The field whose uniqueness constraint was violated.
        field:   String,
        message: String,
    },

    #[error("Validation failed")]
    Validation { errors: Vec<FieldError> },

    #[error("Internal: {message}")]
    Internal { message: String },

    #[error("Database: {message}")]
    Database { message: String },

    #[error("Config: {message}")]
    Config { message: String },
}

impl AppError {
    /// Create a not found error.
    #[inline]
    pub fn not_found(message: impl ToString) -> Self {
        Self::NotFound {
            message: message.to_string(),
        }
    }

    /// Create a bad request error.
    #[inline]
    pub fn bad_request(message: impl ToString) -> Self {
        Self::BadRequest {
            message: message.to_string(),
        }
    }

    /// Create an unauthorized error.
    #[inline]
    pub fn unauthorized(message: impl ToString) -> Self {
        Self::Unauthorized {
            message: message.to_string(),
        }
    }

    /// Create a forbidden error.
    #[inline]
    pub fn forbidden(message: impl ToString) -> Self {
        Self::Forbidden {
            message: message.to_string(),
        }
    }

    /// Create a duplicate-key conflict naming the violated field.
    #[inline]
    pub fn conflict(field: impl ToString, message: impl ToString) -> Self {
        Self::Conflict {
            field:   field.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a structured validation error.
    #[inline]
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation {
            errors,
        }
    }

    /// Create an internal error.
    #[inline]
    pub fn internal(message: impl ToString) -> Self {
        Self::Internal {
            message: message.to_string(),
        }
    }

    /// Create a database error.
    #[inline]
    pub fn database(message: impl ToString) -> Self {
        Self::Database {
            message: message.to_string(),
        }
    }

    /// Create a config error.
    #[inline]
    pub fn config(message: impl ToString) -> Self {
        Self::Config {
            message: message.to_string(),
        }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> http::StatusCode {
        match self {
            AppError::NotFound { .. } => http::StatusCode::NOT_FOUND,
            AppError::BadRequest { .. } => http::StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => http::StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => http::StatusCode::FORBIDDEN,
            AppError::Conflict { .. } => http::StatusCode::BAD_REQUEST,
            AppError::Validation { .. } => http::StatusCode::BAD_REQUEST,
            AppError::Internal { .. } => http::StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Database { .. } => http::StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::NotFound { message }
            | AppError::BadRequest { message }
            | AppError::Unauthorized { message }
            | AppError::Forbidden { message }
            | AppError::Conflict { message, .. }
            | AppError::Internal { message }
            | AppError::Database { message }
            | AppError::Config { message } => message.clone(),
            AppError::Validation { .. } => "Validation failed".to_string(),
        }
    }

    /// Downgrade NotFound to BadRequest for write endpoints, which respond
    /// 400 to absent referenced entities by this system's convention.
    pub fn into_write_error(self) -> Self {
        match self {
            AppError::NotFound { message } => AppError::BadRequest { message },
            other => other,
        }
    }
}

/// Convert anyhow errors to AppError.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal {
            message: err.to_string(),
        }
    }
}

/// Convert Sea-ORM database errors to AppError.
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database {
            message: err.to_string(),
        }
    }
}

/// Convert validator errors into the structured field-error form.
///
/// Nested struct errors (e.g. the customer address) are flattened into
/// dotted paths such as `address.city`.
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut errors = Vec::new();
        flatten_validation_errors("", &err, &mut errors);
        Self::Validation {
            errors,
        }
    }
}

fn flatten_validation_errors(prefix: &str, err: &validator::ValidationErrors, out: &mut Vec<FieldError>) {
    for (field, kind) in err.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        }
        else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            validator::ValidationErrorsKind::Field(field_errors) => {
                for fe in field_errors {
                    let message = fe
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", path));
                    out.push(FieldError {
                        path:    path.clone(),
                        message,
                    });
                }
            },
            validator::ValidationErrorsKind::Struct(nested) => {
                flatten_validation_errors(&path, nested, out);
            },
            validator::ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    flatten_validation_errors(&format!("{}[{}]", path, index), nested, out);
                }
            },
        }
    }
}

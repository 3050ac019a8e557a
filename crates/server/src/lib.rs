//! # Dealership API Server
//!
//! Axum-based HTTP API server for the car dealership backend.
//!
//! ## Modules
//!
//! - [`dto`]: Request/response data transfer objects with validation schemas
//! - [`middleware`]: HTTP middleware (authentication, role authorization)
//! - [`router`]: API route configuration
//! - [`services`]: Domain services orchestrating entity CRUD
//! - [`settings`]: Environment-based server configuration

use auth::JwtConfig;
use sea_orm::DbConn;

pub mod dto;
pub mod middleware;
pub mod router;
pub mod services;
pub mod settings;

pub use router::create_app_router;
pub use settings::Settings;

/// Application state shared across request handlers.
///
/// Every service owns a handle to the connection pool, injected once at
/// startup. There is no ambient global state.
#[derive(Clone)]
pub struct AppState {
    /// JWT configuration
    pub jwt_config: JwtConfig,
    /// Authentication and account management
    pub auth:       services::auth::AuthService,
    /// Vehicle inventory
    pub cars:       services::cars::CarService,
    /// Vehicle categories
    pub categories: services::categories::CategoryService,
    /// Sales records
    pub purchases:  services::purchases::PurchaseService,
    /// Read-only account listings
    pub users:      services::users::UserService,
}

impl AppState {
    /// Wires up all services around a single connection pool.
    #[must_use]
    pub fn new(db: DbConn, jwt_config: JwtConfig) -> Self {
        Self {
            auth: services::auth::AuthService::new(db.clone(), jwt_config.clone()),
            cars: services::cars::CarService::new(db.clone()),
            categories: services::categories::CategoryService::new(db.clone()),
            purchases: services::purchases::PurchaseService::new(db.clone()),
            users: services::users::UserService::new(db),
            jwt_config,
        }
    }
}

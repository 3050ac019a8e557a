//! # Common Test Utilities
//!
//! In-memory database setup, app construction and request helpers shared by
//! the integration tests.

use auth::JwtConfig;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use serde_json::{json, Value};
use server::{create_app_router, AppState};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test-secret-key-that-is-at-least-32-bytes-long";
pub const ADMIN_EMAIL: &str = "admin@cardealers.com";
pub const ADMIN_PASSWORD: &str = "Password1@";

/// Fresh application state backed by an in-memory database with all
/// migrations applied. The pool is pinned to one connection so every query
/// sees the same in-memory database.
pub async fn test_state() -> AppState {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);

    let db = Database::connect(options)
        .await
        .expect("Failed to connect to test database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");

    AppState::new(db, JwtConfig::new(TEST_JWT_SECRET))
}

/// Router plus its state, with the administrator account seeded.
pub async fn test_app() -> (Router, AppState) {
    let state = test_state().await;
    state
        .auth
        .ensure_admin(ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .expect("Failed to seed admin");
    (create_app_router(state.clone()), state)
}

/// Sends one request and returns (status, parsed JSON body). Non-JSON bodies
/// come back as `Value::Null`.
pub async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => {
            builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("Failed to build request")
        },
        None => builder.body(Body::empty()).expect("Failed to build request"),
    };

    let response = app.clone().oneshot(request).await.expect("Request failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

pub fn customer_payload(email: &str, license_number: &str) -> Value {
    json!({
        "email": email,
        "password": "Password1@",
        "first_name": "Jane",
        "last_name": "Doe",
        "phone": "+15550100",
        "address": {
            "street": "1 Main St",
            "city": "Springfield",
            "state": "IL",
            "zip_code": "62701",
            "country": "USA"
        },
        "date_of_birth": "1990-06-01",
        "license_number": license_number
    })
}

pub fn manager_payload(email: &str) -> Value {
    json!({
        "email": email,
        "password": "Password1@",
        "first_name": "Mark",
        "last_name": "Vale",
        "phone": "+15550101"
    })
}

pub fn car_payload(vin: &str, category_id: Uuid, price: f64) -> Value {
    json!({
        "make": "Toyota",
        "model_name": "Corolla",
        "year": 2022,
        "price": price,
        "mileage": 12000,
        "color": "Blue",
        "category_id": category_id,
        "features": ["Bluetooth"],
        "images": ["https://cdn.example.com/corolla.jpg"],
        "vin": vin
    })
}

/// Logs the seeded administrator in and returns its bearer token.
pub async fn admin_token(app: &Router) -> String {
    let (status, body) = send_json(
        app,
        Method::POST,
        "/api/auth/admin/login",
        None,
        Some(json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "admin login failed: {}", body);
    body["data"]["token"]
        .as_str()
        .expect("missing admin token")
        .to_string()
}

/// Registers a customer and returns its bearer token.
pub async fn customer_token(app: &Router, email: &str, license_number: &str) -> String {
    let (status, body) = send_json(
        app,
        Method::POST,
        "/api/auth/register/customer",
        None,
        Some(customer_payload(email, license_number)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "customer registration failed: {}", body);
    body["data"]["token"]
        .as_str()
        .expect("missing customer token")
        .to_string()
}

/// Creates a category through the API and returns its id.
pub async fn create_category(app: &Router, token: &str, name: &str) -> Uuid {
    let (status, body) = send_json(
        app,
        Method::POST,
        "/api/categories",
        Some(token),
        Some(json!({"name": name, "description": "Test category"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "category creation failed: {}", body);
    body["data"]["id"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .expect("missing category id")
}

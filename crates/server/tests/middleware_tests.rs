//! Authentication and role-tier enforcement across the route groups.

mod common;

use auth::{jwt::create_token, JwtConfig};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use tower::ServiceExt;
use uuid::Uuid;

use crate::common::{admin_token, customer_token, manager_payload, send_json, test_app};

async fn manager_token(app: &axum::Router) -> String {
    let admin = admin_token(app).await;
    let (status, body) = send_json(
        app,
        Method::POST,
        "/api/auth/register/manager",
        Some(&admin),
        Some(manager_payload("mark@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "manager registration failed: {}", body);
    body["data"]["token"]
        .as_str()
        .expect("missing manager token")
        .to_string()
}

#[tokio::test]
async fn test_health_is_public() {
    let (app, _state) = test_app().await;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let (app, _state) = test_app().await;

    let (status, body) = send_json(&app, Method::GET, "/api/cars", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "No token provided");
}

#[tokio::test]
async fn test_malformed_authorization_header() {
    let (app, _state) = test_app().await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/cars")
        .header(header::AUTHORIZATION, "Basic abc123")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let (app, _state) = test_app().await;

    let (status, body) = send_json(&app, Method::GET, "/api/cars", Some("not.a.jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token");
}

#[tokio::test]
async fn test_token_signed_with_wrong_secret() {
    let (app, _state) = test_app().await;

    let forged = create_token(
        &JwtConfig::new("some-other-secret-that-is-long-enough!!"),
        &Uuid::new_v4().to_string(),
        "intruder@example.com",
        "ADMIN",
    )
    .unwrap();

    let (status, body) = send_json(&app, Method::GET, "/api/cars", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token signature");
}

#[tokio::test]
async fn test_valid_token_for_deleted_account_still_maps_to_profile_miss() {
    let (app, state) = test_app().await;

    // A structurally valid token whose subject was never registered.
    let ghost = create_token(
        &state.jwt_config,
        &Uuid::new_v4().to_string(),
        "ghost@example.com",
        "CUSTOMER",
    )
    .unwrap();

    let (status, body) = send_json(&app, Method::GET, "/api/auth/profile", Some(&ghost), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn test_user_directory_role_tiers() {
    let (app, _state) = test_app().await;
    let admin = admin_token(&app).await;
    let manager = manager_token(&app).await;
    let customer = customer_token(&app, "jane@example.com", "DL-1001").await;

    // Customer directory is staff-only.
    let (status, _body) = send_json(&app, Method::GET, "/api/users/customers", Some(&customer), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send_json(&app, Method::GET, "/api/users/customers", Some(&manager), None).await;
    assert_eq!(status, StatusCode::OK);
    let customers = body["data"].as_array().expect("expected customer list");
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0]["email"], "jane@example.com");
    assert!(customers[0]["password_hash"].is_null());

    // Manager directory is admin-only.
    let (status, _body) = send_json(&app, Method::GET, "/api/users/managers", Some(&manager), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send_json(&app, Method::GET, "/api/users/managers", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let managers = body["data"].as_array().expect("expected manager list");
    assert_eq!(managers.len(), 1);
    assert_eq!(managers[0]["email"], "mark@example.com");
    assert!(managers[0]["password_hash"].is_null());
}

#[tokio::test]
async fn test_user_directory_lookup_by_id() {
    let (app, _state) = test_app().await;
    let admin = admin_token(&app).await;
    customer_token(&app, "jane@example.com", "DL-1001").await;

    let (_status, body) = send_json(&app, Method::GET, "/api/users/customers", Some(&admin), None).await;
    let customer_id = body["data"][0]["id"].as_str().expect("missing customer id").to_string();

    let (status, body) = send_json(
        &app,
        Method::GET,
        &format!("/api/users/customers/{}", customer_id),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "jane@example.com");

    let (status, body) = send_json(
        &app,
        Method::GET,
        &format!("/api/users/customers/{}", Uuid::new_v4()),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Customer not found");

    let (status, body) = send_json(
        &app,
        Method::GET,
        &format!("/api/users/managers/{}", Uuid::new_v4()),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Manager not found");
}

//! Purchase flow: availability, price matching and role boundaries.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::{admin_token, car_payload, create_category, customer_token, send_json, test_app};

/// Seeds a category and one available car, returning the car id.
async fn seed_car(app: &axum::Router, admin: &str, price: f64) -> String {
    let category_id = create_category(app, admin, "Sedans").await;
    let (status, body) = send_json(
        app,
        Method::POST,
        "/api/cars",
        Some(admin),
        Some(car_payload("1HGBH41JXMN109186", category_id, price)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "car creation failed: {}", body);
    body["data"]["id"].as_str().expect("missing car id").to_string()
}

fn purchase_payload(car_id: &str, price: f64) -> Value {
    json!({
        "car_id": car_id,
        "purchase_price": price,
        "payment_method": "CASH"
    })
}

#[tokio::test]
async fn test_purchase_marks_car_sold() {
    let (app, _state) = test_app().await;
    let admin = admin_token(&app).await;
    let customer = customer_token(&app, "jane@example.com", "DL-1001").await;
    let car_id = seed_car(&app, &admin, 24999.0).await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/purchases",
        Some(&customer),
        Some(purchase_payload(&car_id, 24999.0)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Purchase completed successfully");
    assert_eq!(body["data"]["payment_method"], "CASH");
    assert_eq!(body["data"]["car"]["vin"], "1HGBH41JXMN109186");
    assert_eq!(body["data"]["customer"]["email"], "jane@example.com");

    let (status, body) = send_json(&app, Method::GET, &format!("/api/cars/{}", car_id), Some(&customer), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "SOLD");
}

#[tokio::test]
async fn test_purchase_sold_car_rejected() {
    let (app, _state) = test_app().await;
    let admin = admin_token(&app).await;
    let customer = customer_token(&app, "jane@example.com", "DL-1001").await;
    let car_id = seed_car(&app, &admin, 24999.0).await;

    let (status, _body) = send_json(
        &app,
        Method::POST,
        "/api/purchases",
        Some(&customer),
        Some(purchase_payload(&car_id, 24999.0)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let rival = customer_token(&app, "john@example.com", "DL-1002").await;
    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/purchases",
        Some(&rival),
        Some(purchase_payload(&car_id, 24999.0)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Car is not available for purchase");
}

#[tokio::test]
async fn test_purchase_price_mismatch_rejected() {
    let (app, _state) = test_app().await;
    let admin = admin_token(&app).await;
    let customer = customer_token(&app, "jane@example.com", "DL-1001").await;
    let car_id = seed_car(&app, &admin, 24999.0).await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/purchases",
        Some(&customer),
        Some(purchase_payload(&car_id, 19999.0)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Purchase price does not match car price");

    // The failed attempt must not consume the car.
    let (status, body) = send_json(&app, Method::GET, &format!("/api/cars/{}", car_id), Some(&customer), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "AVAILABLE");
}

#[tokio::test]
async fn test_purchase_unknown_car_rejected() {
    let (app, _state) = test_app().await;
    let customer = customer_token(&app, "jane@example.com", "DL-1001").await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/purchases",
        Some(&customer),
        Some(purchase_payload(&Uuid::new_v4().to_string(), 24999.0)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Car not found");
}

#[tokio::test]
async fn test_my_purchases_lists_own_history() {
    let (app, _state) = test_app().await;
    let admin = admin_token(&app).await;
    let customer = customer_token(&app, "jane@example.com", "DL-1001").await;
    let car_id = seed_car(&app, &admin, 24999.0).await;

    let (status, _body) = send_json(
        &app,
        Method::POST,
        "/api/purchases",
        Some(&customer),
        Some(purchase_payload(&car_id, 24999.0)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send_json(&app, Method::GET, "/api/purchases/my-purchases", Some(&customer), None).await;
    assert_eq!(status, StatusCode::OK);
    let purchases = body["data"].as_array().expect("expected purchase list");
    assert_eq!(purchases.len(), 1);
    assert_eq!(purchases[0]["car"]["make"], "Toyota");

    // Another customer sees an empty history.
    let rival = customer_token(&app, "john@example.com", "DL-1002").await;
    let (status, body) = send_json(&app, Method::GET, "/api/purchases/my-purchases", Some(&rival), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_staff_list_and_get_purchases() {
    let (app, _state) = test_app().await;
    let admin = admin_token(&app).await;
    let customer = customer_token(&app, "jane@example.com", "DL-1001").await;
    let car_id = seed_car(&app, &admin, 24999.0).await;

    let (_status, body) = send_json(
        &app,
        Method::POST,
        "/api/purchases",
        Some(&customer),
        Some(purchase_payload(&car_id, 24999.0)),
    )
    .await;
    let purchase_id = body["data"]["id"].as_str().expect("missing purchase id").to_string();

    let (status, body) = send_json(&app, Method::GET, "/api/purchases", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    let (status, body) = send_json(
        &app,
        Method::GET,
        &format!("/api/purchases/{}", purchase_id),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["customer"]["email"], "jane@example.com");

    let (status, body) = send_json(
        &app,
        Method::GET,
        &format!("/api/purchases/{}", Uuid::new_v4()),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Purchase not found");
}

#[tokio::test]
async fn test_purchase_role_boundaries() {
    let (app, _state) = test_app().await;
    let admin = admin_token(&app).await;
    let customer = customer_token(&app, "jane@example.com", "DL-1001").await;
    let car_id = seed_car(&app, &admin, 24999.0).await;

    // Staff do not buy cars.
    let (status, _body) = send_json(
        &app,
        Method::POST,
        "/api/purchases",
        Some(&admin),
        Some(purchase_payload(&car_id, 24999.0)),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Customers do not browse the full sales ledger.
    let (status, _body) = send_json(&app, Method::GET, "/api/purchases", Some(&customer), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

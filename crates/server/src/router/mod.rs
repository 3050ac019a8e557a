//! # API Router Configuration
//!
//! Binds HTTP method + path + middleware chain to handlers. Every route
//! declares its role allow-list explicitly; there is no implicit hierarchy
//! between roles.

use axum::{
    extract::{Extension, Path, Query, State as AxumState},
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json,
    Router,
};
use entity::UserRole;
use error::{ApiResponse, AppError, Result};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto,
    middleware::auth::{authenticate, authorize, AuthenticatedUser},
    AppState,
};

const ADMIN_ONLY: &[UserRole] = &[UserRole::Admin];
const STAFF: &[UserRole] = &[UserRole::Admin, UserRole::Manager];
const CUSTOMER_ONLY: &[UserRole] = &[UserRole::Customer];

/// Creates the API router with all routes
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/auth/register/customer", post(register_customer))
        .route("/api/auth/login/customer", post(login_customer))
        .route("/api/auth/login/manager", post(login_manager))
        .route("/api/auth/admin/login", post(admin_login));

    // Any authenticated role.
    let authenticated_routes = Router::new()
        .route("/api/auth/profile", get(get_profile))
        .route("/api/auth/change-password", post(change_password))
        .route("/api/cars", get(list_cars))
        .route("/api/cars/{id}", get(get_car))
        .route("/api/cars/category/{category_id}", get(get_cars_by_category))
        .route("/api/categories", get(list_categories))
        .route("/api/categories/{id}", get(get_category))
        .layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let staff_routes = Router::new()
        .route("/api/cars", post(create_car))
        .route("/api/cars/{id}", put(update_car).delete(delete_car))
        .route("/api/categories", post(create_category))
        .route(
            "/api/categories/{id}",
            put(update_category).delete(delete_category),
        )
        .route("/api/purchases", get(list_purchases))
        .route("/api/purchases/{id}", get(get_purchase))
        .route("/api/users/customers", get(list_customers))
        .route("/api/users/customers/{id}", get(get_customer))
        .layer(middleware::from_fn(|req, next| authorize(STAFF, req, next)))
        .layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let admin_routes = Router::new()
        .route("/api/auth/register/manager", post(register_manager))
        .route("/api/users/managers", get(list_managers))
        .route("/api/users/managers/{id}", get(get_manager))
        .layer(middleware::from_fn(|req, next| authorize(ADMIN_ONLY, req, next)))
        .layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let customer_routes = Router::new()
        .route("/api/purchases", post(create_purchase))
        .route("/api/purchases/my-purchases", get(my_purchases))
        .layer(middleware::from_fn(|req, next| authorize(CUSTOMER_ONLY, req, next)))
        .layer(middleware::from_fn_with_state(state.clone(), authenticate));

    public_routes
        .merge(authenticated_routes)
        .merge(staff_routes)
        .merge(admin_routes)
        .merge(customer_routes)
        .with_state(state)
}

/// Creates the health check router
pub fn create_health_router() -> Router { Router::new().route("/health", get(|| async { "OK" })) }

/// Creates the main application router
pub fn create_app_router(state: AppState) -> Router {
    Router::new()
        .merge(create_health_router())
        .merge(create_router(state))
}

// ---- auth ----

async fn register_customer(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<dto::auth::RegisterCustomerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<dto::auth::AuthResponse>>)> {
    req.validate()?;
    let response = state.auth.register_customer(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Customer registered successfully", response)),
    ))
}

async fn register_manager(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<dto::auth::RegisterManagerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<dto::auth::AuthResponse>>)> {
    req.validate()?;
    let response = state.auth.register_manager(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Manager registered successfully", response)),
    ))
}

async fn login_customer(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<dto::auth::LoginRequest>,
) -> Result<Json<ApiResponse<dto::auth::AuthResponse>>> {
    req.validate()?;
    let response = state.auth.login(UserRole::Customer, req).await?;
    Ok(Json(ApiResponse::ok("Login successful", response)))
}

async fn login_manager(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<dto::auth::LoginRequest>,
) -> Result<Json<ApiResponse<dto::auth::AuthResponse>>> {
    req.validate()?;
    let response = state.auth.login(UserRole::Manager, req).await?;
    Ok(Json(ApiResponse::ok("Login successful", response)))
}

async fn admin_login(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<dto::auth::LoginRequest>,
) -> Result<Json<ApiResponse<dto::auth::AuthResponse>>> {
    req.validate()?;
    let response = state.auth.login(UserRole::Admin, req).await?;
    Ok(Json(ApiResponse::ok("Login successful", response)))
}

async fn get_profile(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<serde_json::Value>>> {
    let profile = state.auth.profile(user.id, user.role).await?;
    Ok(Json(ApiResponse::ok("Profile retrieved successfully", profile)))
}

async fn change_password(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(req): Json<dto::auth::ChangePasswordRequest>,
) -> Result<Json<ApiResponse<()>>> {
    req.validate()?;
    state
        .auth
        .change_password(user.id, user.role, req)
        .await
        .map_err(AppError::into_write_error)?;
    Ok(Json(ApiResponse::message("Password changed successfully")))
}

// ---- cars ----

async fn list_cars(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<dto::cars::CarQuery>,
) -> Result<Json<ApiResponse<dto::cars::CarListResponse>>> {
    let listing = state.cars.get_cars(query).await?;
    Ok(Json(ApiResponse::ok("Cars retrieved successfully", listing)))
}

async fn get_car(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<entity::cars::Model>>> {
    let car = state.cars.get_car(id).await?;
    Ok(Json(ApiResponse::ok("Car retrieved successfully", car)))
}

async fn get_cars_by_category(
    AxumState(state): AxumState<AppState>,
    Path(category_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<entity::cars::Model>>>> {
    let cars = state.cars.get_cars_by_category(category_id).await?;
    Ok(Json(ApiResponse::ok("Cars retrieved successfully", cars)))
}

async fn create_car(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(req): Json<dto::cars::CreateCarRequest>,
) -> Result<(StatusCode, Json<ApiResponse<entity::cars::Model>>)> {
    req.validate()?;
    let car = state.cars.create_car(req, user.id, user.role).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Car created successfully", car)),
    ))
}

async fn update_car(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<dto::cars::UpdateCarRequest>,
) -> Result<Json<ApiResponse<entity::cars::Model>>> {
    req.validate()?;
    let car = state
        .cars
        .update_car(id, req)
        .await
        .map_err(AppError::into_write_error)?;
    Ok(Json(ApiResponse::ok("Car updated successfully", car)))
}

async fn delete_car(AxumState(state): AxumState<AppState>, Path(id): Path<Uuid>) -> Result<Json<ApiResponse<()>>> {
    state
        .cars
        .delete_car(id)
        .await
        .map_err(AppError::into_write_error)?;
    Ok(Json(ApiResponse::message("Car deleted successfully")))
}

// ---- categories ----

async fn list_categories(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<ApiResponse<Vec<entity::categories::Model>>>> {
    let categories = state.categories.get_categories().await?;
    Ok(Json(ApiResponse::ok(
        "Categories retrieved successfully",
        categories,
    )))
}

async fn get_category(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<entity::categories::Model>>> {
    let category = state.categories.get_category(id).await?;
    Ok(Json(ApiResponse::ok("Category retrieved successfully", category)))
}

async fn create_category(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<dto::categories::CreateCategoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<entity::categories::Model>>)> {
    req.validate()?;
    let category = state.categories.create_category(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Category created successfully", category)),
    ))
}

async fn update_category(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<dto::categories::UpdateCategoryRequest>,
) -> Result<Json<ApiResponse<entity::categories::Model>>> {
    req.validate()?;
    let category = state
        .categories
        .update_category(id, req)
        .await
        .map_err(AppError::into_write_error)?;
    Ok(Json(ApiResponse::ok("Category updated successfully", category)))
}

async fn delete_category(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    state
        .categories
        .delete_category(id)
        .await
        .map_err(AppError::into_write_error)?;
    Ok(Json(ApiResponse::message("Category deleted successfully")))
}

// ---- purchases ----

async fn create_purchase(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(req): Json<dto::purchases::CreatePurchaseRequest>,
) -> Result<(StatusCode, Json<ApiResponse<dto::purchases::PurchaseDetail>>)> {
    req.validate()?;
    let purchase = state.purchases.create_purchase(user.id, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Purchase completed successfully", purchase)),
    ))
}

async fn my_purchases(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<dto::purchases::PurchaseDetail>>>> {
    let purchases = state.purchases.get_customer_purchases(user.id).await?;
    Ok(Json(ApiResponse::ok(
        "Purchases retrieved successfully",
        purchases,
    )))
}

async fn list_purchases(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<ApiResponse<Vec<dto::purchases::PurchaseDetail>>>> {
    let purchases = state.purchases.get_all_purchases().await?;
    Ok(Json(ApiResponse::ok(
        "Purchases retrieved successfully",
        purchases,
    )))
}

async fn get_purchase(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<dto::purchases::PurchaseDetail>>> {
    let purchase = state.purchases.get_purchase(id).await?;
    Ok(Json(ApiResponse::ok("Purchase retrieved successfully", purchase)))
}

// ---- users ----

async fn list_customers(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<ApiResponse<Vec<serde_json::Value>>>> {
    let customers = state.users.get_customers().await?;
    Ok(Json(ApiResponse::ok(
        "Customers retrieved successfully",
        customers,
    )))
}

async fn get_customer(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<serde_json::Value>>> {
    let customer = state.users.get_customer(id).await?;
    Ok(Json(ApiResponse::ok("Customer retrieved successfully", customer)))
}

async fn list_managers(AxumState(state): AxumState<AppState>) -> Result<Json<ApiResponse<Vec<serde_json::Value>>>> {
    let managers = state.users.get_managers().await?;
    Ok(Json(ApiResponse::ok("Managers retrieved successfully", managers)))
}

async fn get_manager(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<serde_json::Value>>> {
    let manager = state.users.get_manager(id).await?;
    Ok(Json(ApiResponse::ok("Manager retrieved successfully", manager)))
}

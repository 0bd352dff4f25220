//! End-to-end flow over the HTTP router backed by an in-memory SQLite database.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use serde_json::{json, Value};
use tower::ServiceExt;

use car_rental::application::UserService;
use car_rental::config::{AdminConfig, BookingConfig};
use car_rental::domain::RepositoryProvider;
use car_rental::infrastructure::crypto::jwt::{JwtConfig, TOKEN_ISSUER};
use car_rental::infrastructure::database::migrator::Migrator;
use car_rental::{create_api_router, init_database, ApiDependencies, DatabaseConfig, SeaOrmRepositoryProvider};

fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-secret".into(),
        expiration_hours: 2,
        issuer: TOKEN_ISSUER.into(),
    }
}

async fn setup() -> (Router, DatabaseConnection) {
    let db = init_database(&DatabaseConfig::sqlite_memory())
        .await
        .expect("connect");
    Migrator::up(&db, None).await.expect("migrate");

    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
    UserService::new(repos.clone(), jwt_config())
        .ensure_default_admin(&AdminConfig::default())
        .await
        .expect("seed admin");

    let router = create_api_router(ApiDependencies {
        repos,
        jwt_config: jwt_config(),
        booking: BookingConfig::default(),
        db: Some(db.clone()),
        metrics_handle: PrometheusBuilder::new().build_recorder().handle(),
    });
    (router, db)
}

async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let req = match body {
        Some(body) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => req.body(Body::empty()),
    }
    .unwrap();

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = call(
        app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({"username": username, "password": password})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_pings_database() {
    let (app, _db) = setup().await;
    let (status, body) = call(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"]["status"], "ok");
}

#[tokio::test]
async fn rent_pay_review_and_bill() {
    let (app, _db) = setup().await;
    let admin = AdminConfig::default();
    let admin_token = login(&app, &admin.username, &admin.password).await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/vehicles",
        Some(&admin_token),
        Some(json!({
            "name": "Toyota Vios",
            "brand": "Toyota",
            "type": "Sedan",
            "license_plate": "30H-246.80",
            "location_id": 1,
            "price_per_day": 650000,
            "price_per_month": 15000000,
            "price_per_year": 150000000
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let vehicle_id = body["data"]["id"].as_i64().unwrap();

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({
            "username": "hoa",
            "email": "hoa@example.com",
            "full_name": "Trần Thị Hoa",
            "password": "hoa-password"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let user_token = login(&app, "hoa@example.com", "hoa-password").await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/rentals",
        Some(&user_token),
        Some(json!({
            "vehicle_id": vehicle_id,
            "tier": "yearly",
            "start_time": "2024-02-29T08:00:00Z",
            "pickup_city": "Đà Nẵng"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let rental = body["data"]["rental"].clone();
    assert_eq!(rental["end_time"], "2025-02-28T08:00:00Z");
    assert_eq!(rental["total_price"], 150_000_000);
    assert_eq!(rental["pickup_location"], "Đà Nẵng");
    assert_eq!(body["data"]["payment"]["amount"], 150_000_000);
    assert_eq!(body["data"]["payment"]["payment_method"], "Credit Card");
    let rental_id = rental["id"].as_i64().unwrap();

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/reviews",
        Some(&user_token),
        Some(json!({"rental_id": rental_id, "rating": 5, "comment": "Xe mới, rất sạch sẽ"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["data"]["vehicle_id"], vehicle_id);

    let (_, body) = call(
        &app,
        Method::GET,
        &format!("/api/v1/reviews?vehicle_id={}", vehicle_id),
        None,
        None,
    )
    .await;
    assert_eq!(body["data"]["total"], 1);

    let (status, body) = call(&app, Method::GET, "/api/v1/billings", Some(&user_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["rental"]["id"], rental_id);
    assert_eq!(items[0]["payment"]["status"], "pending");

    // admin confirms the payment
    let payment_id = items[0]["payment"]["id"].as_i64().unwrap();
    let (status, body) = call(
        &app,
        Method::PUT,
        &format!("/api/v1/payments/{}", payment_id),
        Some(&admin_token),
        Some(json!({"status": "paid"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "paid");
}

#[tokio::test]
async fn deleting_a_rental_removes_its_payments() {
    let (app, _db) = setup().await;
    let admin = AdminConfig::default();
    let token = login(&app, &admin.username, &admin.password).await;

    let (_, body) = call(
        &app,
        Method::POST,
        "/api/v1/vehicles",
        Some(&token),
        Some(json!({
            "name": "Kia Morning",
            "brand": "Kia",
            "type": "Hatchback",
            "license_plate": "29A-111.22",
            "location_id": 2,
            "price_per_day": 400000
        })),
    )
    .await;
    let vehicle_id = body["data"]["id"].as_i64().unwrap();

    let (_, body) = call(
        &app,
        Method::POST,
        "/api/v1/rentals",
        Some(&token),
        Some(json!({"vehicle_id": vehicle_id})),
    )
    .await;
    let rental_id = body["data"]["rental"]["id"].as_i64().unwrap();

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/rentals",
        Some(&token),
        Some(json!({"vehicle_id": vehicle_id, "tier": "monthly"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);

    let (status, _) = call(
        &app,
        Method::DELETE,
        &format!("/api/v1/rentals/{}", rental_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = call(
        &app,
        Method::GET,
        &format!("/api/v1/payments?rental_id={}", rental_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["data"]["total"], 0);
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let (app, _db) = setup().await;
    let body = json!({
        "username": "duc",
        "email": "duc@example.com",
        "full_name": "Lê Minh Đức",
        "password": "duc-password"
    });
    let (status, _) = call(&app, Method::POST, "/api/v1/auth/register", None, Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = call(&app, Method::POST, "/api/v1/auth/register", None, Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn admin_booking_for_missing_user_is_404() {
    let (app, _db) = setup().await;
    let admin = AdminConfig::default();
    let token = login(&app, &admin.username, &admin.password).await;

    let (_, body) = call(
        &app,
        Method::POST,
        "/api/v1/vehicles",
        Some(&token),
        Some(json!({
            "name": "Mazda CX-5",
            "brand": "Mazda",
            "type": "SUV",
            "license_plate": "43A-987.65",
            "location_id": 3,
            "price_per_day": 900000
        })),
    )
    .await;
    let vehicle_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/rentals",
        Some(&token),
        Some(json!({"vehicle_id": vehicle_id, "user_id": 9999})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND, "{}", body);
    assert_eq!(body["success"], false);

    let (_, body) = call(&app, Method::GET, "/api/v1/payments", Some(&token), None).await;
    assert_eq!(body["data"]["total"], 0);

    // a vehicle with rental history stays in the fleet
    let (status, _) = call(
        &app,
        Method::POST,
        "/api/v1/rentals",
        Some(&token),
        Some(json!({"vehicle_id": vehicle_id})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = call(
        &app,
        Method::DELETE,
        &format!("/api/v1/vehicles/{}", vehicle_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

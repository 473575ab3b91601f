//! Helpers shared by the integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use employee_api::{AppState, Config, create_router};
use http::{Request, Response};
use http_body_util::BodyExt;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

pub fn test_config() -> Config {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("DATABASE_HOST", "127.0.0.1"),
        ("DATABASE_PORT", "5432"),
        ("DATABASE_USER", "postgres"),
        ("DATABASE_PASSWORD", "postgres"),
        ("DATABASE_NAME", "employees_test"),
        ("DEBUG", "false"),
    ]);
    Config::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap()
}

/// Router over a pool that never connects; only for paths that
/// are answered before a connection is checked out
pub fn lazy_app() -> Router {
    let config = test_config();
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(200))
        .connect_lazy_with(config.connect_options());
    create_router(AppState::from_pool(pool, config))
}

/// Router over a live pool (from `#[sqlx::test]`)
pub fn app(pool: PgPool) -> Router {
    create_router(AppState::from_pool(pool, test_config()))
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn employee_json(email: &str) -> serde_json::Value {
    serde_json::json!({
        "first_name": "Ana",
        "last_name": "Ruiz",
        "email": email,
        "position": "Dev",
        "department": "Eng",
        "salary": 50000,
        "hire_date": "2024-01-01T00:00:00"
    })
}

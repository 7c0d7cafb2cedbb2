#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;

use recipebook::router::init_router;
use recipebook::state::AppState;
use recipebook_auth::TokenVerifier;
use recipebook_auth::jwt::{now, sign_token};
use recipebook_config::{AuthConfig, CorsConfig};

pub const TEST_SECRET: &str = "test";

pub const COOK: &str = "cook@example.com";
pub const OTHER_COOK: &str = "other@example.com";

/// Every permission a regular user gets.
pub const USER_PERMISSIONS: &[&str] = &[
    "add:recipe",
    "update:recipe",
    "delete:recipe",
    "add:menu",
    "update:menu",
    "delete:menu",
];

pub fn test_state(pool: PgPool) -> AppState {
    let verifier = TokenVerifier::new(AuthConfig::test_mode(TEST_SECRET)).unwrap();
    let cors = CorsConfig {
        allowed_origins: vec![],
    };
    AppState::new(pool, verifier, cors)
}

pub fn setup_test_app(pool: PgPool) -> Router {
    init_router(test_state(pool))
}

/// App whose pool never connects; enough for requests rejected before any
/// query runs.
pub fn setup_offline_app() -> Router {
    let pool = recipebook_db::lazy_pool("postgres://localhost/recipebook").unwrap();
    setup_test_app(pool)
}

pub fn token(email: &str, permissions: &[&str]) -> String {
    sign_token(
        &json!({
            "sub": format!("auth0|{email}"),
            "user-email": email,
            "permissions": permissions,
            "iat": now(),
            "exp": now() + 3600,
        }),
        TEST_SECRET.as_bytes(),
        None,
    )
    .unwrap()
}

pub fn user_token(email: &str) -> String {
    token(email, USER_PERMISSIONS)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}

pub async fn create_recipe(app: &Router, token: &str, name: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/recipe",
        Some(token),
        Some(json!({
            "name": name,
            "servings": 2,
            "ingredients": [{"name": "Flour", "amount": 200}],
            "preparation": "Mix and bake.",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["id"].as_i64().unwrap()
}

pub async fn create_menu(app: &Router, token: &str, name: &str, recipe_ids: &[i64]) -> i64 {
    let dishes: Vec<Value> = recipe_ids
        .iter()
        .map(|id| json!({"recipe_id": id}))
        .collect();
    let (status, body) = send(
        app,
        Method::POST,
        "/menu",
        Some(token),
        Some(json!({"name": name, "dishes": dishes})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["id"].as_i64().unwrap()
}

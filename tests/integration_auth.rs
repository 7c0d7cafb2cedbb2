mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

use common::{COOK, TEST_SECRET, send, setup_offline_app, token, user_token};
use recipebook_auth::jwt::{now, sign_token};

fn recipe_body() -> serde_json::Value {
    json!({
        "name": "Test",
        "servings": 1,
        "ingredients": [{"name": "slice of bread", "amount": 1}],
    })
}

async fn post_with_header(value: &str) -> (StatusCode, serde_json::Value) {
    let app = setup_offline_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/recipe")
        .header(header::AUTHORIZATION, value)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(recipe_body().to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_index_banner() {
    let app = setup_offline_app();
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"This is the base URL of the recipe service API.");
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let app = setup_offline_app();
    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/recipe"].is_object());
    assert!(body["paths"]["/recipe/{id}"]["patch"].is_object());
    assert!(body["paths"]["/menu/{id}"]["delete"].is_object());
    assert!(body["components"]["securitySchemes"]["bearer_auth"].is_object());
}

#[tokio::test]
async fn test_missing_authorization_header() {
    let app = setup_offline_app();
    let (status, body) = send(&app, Method::POST, "/recipe", None, Some(recipe_body())).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], 401);
    assert_eq!(body["code"], "authorization_header_missing");
    assert_eq!(body["message"], "Authorization header is expected.");
}

#[tokio::test]
async fn test_malformed_authorization_header() {
    let (status, body) = post_with_header("Basic abc").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "invalid_header");
    assert_eq!(body["message"], "Authorization header must start with \"Bearer\".");

    let (status, body) = post_with_header("Bearer").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token not found.");

    let (status, body) = post_with_header("Bearer a b").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Authorization header must be bearer token.");
}

#[tokio::test]
async fn test_expired_token() {
    let app = setup_offline_app();
    let expired = sign_token(
        &json!({
            "user-email": COOK,
            "permissions": ["add:recipe"],
            "exp": now() - 3600,
        }),
        TEST_SECRET.as_bytes(),
        None,
    )
    .unwrap();

    let (status, body) = send(&app, Method::POST, "/recipe", Some(&expired), Some(recipe_body())).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "token_expired");
}

#[tokio::test]
async fn test_token_signed_with_other_secret() {
    let app = setup_offline_app();
    let forged = sign_token(
        &json!({"user-email": COOK, "permissions": ["add:recipe"]}),
        b"not-the-secret",
        None,
    )
    .unwrap();

    let (status, body) = send(&app, Method::POST, "/recipe", Some(&forged), Some(recipe_body())).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "invalid_signature");
}

#[tokio::test]
async fn test_undecodable_token() {
    let app = setup_offline_app();
    let (status, body) = send(&app, Method::DELETE, "/menu/1", Some("garbage"), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], 400);
    assert_eq!(body["code"], "invalid_token");
}

#[tokio::test]
async fn test_token_without_permissions_claim() {
    let app = setup_offline_app();
    let no_rbac = sign_token(&json!({"user-email": COOK}), TEST_SECRET.as_bytes(), None).unwrap();

    let (status, body) = send(&app, Method::POST, "/recipe", Some(&no_rbac), Some(recipe_body())).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["message"], "Permissions missing in token");
}

#[tokio::test]
async fn test_token_lacking_required_permission() {
    let app = setup_offline_app();
    let reader = token(COOK, &["add:menu"]);

    let (status, body) = send(&app, Method::POST, "/recipe", Some(&reader), Some(recipe_body())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "forbidden");
    assert_eq!(body["message"], "User does not have permission add:recipe");

    let (status, _) = send(&app, Method::PATCH, "/menu/1", Some(&reader), Some(json!({}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_permission_checked_before_body() {
    let app = setup_offline_app();
    let reader = token(COOK, &[]);

    let (status, body) = send(&app, Method::POST, "/menu", Some(&reader), Some(json!([]))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "User does not have permission add:menu");
}

#[tokio::test]
async fn test_body_validation_messages() {
    let app = setup_offline_app();
    let cook = user_token(COOK);

    let cases = [
        (json!({"servings": 1, "ingredients": []}), "Field 'name' is missing"),
        (json!({"name": 5, "servings": 1, "ingredients": []}), "Field 'name' is not a string"),
        (json!({"name": "Soup", "servings": "2", "ingredients": []}), "Field 'servings' is not an integer"),
        (json!({"name": "Soup", "servings": 2}), "Field 'ingredients' is missing"),
        (
            json!({"name": "Soup", "servings": 2, "ingredients": [{"name": "Salt", "amount": "a pinch"}]}),
            "Field 'amount' is not numerical in ingredient 0",
        ),
        (
            json!({"name": "Soup", "servings": 0, "ingredients": []}),
            "Field 'servings' must be at least 1",
        ),
        (json!([1, 2]), "Request body must be a JSON object"),
    ];

    for (body, message) in cases {
        let (status, response) = send(&app, Method::POST, "/recipe", Some(&cook), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{message}");
        assert_eq!(response["message"], message);
    }
}

#[tokio::test]
async fn test_update_body_validation() {
    let app = setup_offline_app();
    let cook = user_token(COOK);

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/menu/1",
        Some(&cook),
        Some(json!({"dishes": [{"recipe_id": 1}, {"recipe": 2}]})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Field 'recipe_id' is missing in dish 1");
}

#[tokio::test]
async fn test_page_below_one_is_rejected() {
    let app = setup_offline_app();
    let (status, body) = send(&app, Method::GET, "/recipe?page=0", None, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Page set beyond end of list");
}

#[tokio::test]
async fn test_non_integer_id_is_not_found() {
    let app = setup_offline_app();

    let (status, body) = send(&app, Method::GET, "/menu/abc", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], 404);
    assert_eq!(body["message"], "Menu abc not found");

    let cook = user_token(COOK);
    let (status, body) = send(&app, Method::DELETE, "/recipe/abc", Some(&cook), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Recipe abc not found");

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/recipe/1.5",
        Some(&cook),
        Some(json!({"name": "Soup"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Recipe 1.5 not found");
}

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use sqlx::PgPool;

use common::{
    COOK, OTHER_COOK, create_menu, create_recipe, send, setup_test_app, token, user_token,
};

#[sqlx::test(migrations = "./migrations")]
async fn test_create_then_get_round_trip(pool: PgPool) {
    let app = setup_test_app(pool);
    let cook = user_token(COOK);

    let (status, body) = send(
        &app,
        Method::POST,
        "/recipe",
        Some(&cook),
        Some(json!({
            "name": "Test",
            "servings": 1,
            "ingredients": [
                {"name": "slice of bread", "amount": 1},
                {"name": "butter", "amount": 0.5},
            ],
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let id = body["id"].as_i64().unwrap();
    assert_eq!(body["msg"], format!("Added recipe with id {id}"));

    let (status, body) = send(&app, Method::GET, &format!("/recipe/{id}"), None, None).await;

    assert_eq!(status, StatusCode::OK);
    let recipe = &body["recipe"];
    assert_eq!(recipe["name"], "Test");
    assert_eq!(recipe["username"], COOK);
    assert_eq!(recipe["servings"], 1);
    assert_eq!(recipe["preparation"], "");
    assert_eq!(recipe["ingredients"][0]["name"], "slice of bread");
    assert_eq!(recipe["ingredients"][0]["amount"].as_f64(), Some(1.0));
    assert_eq!(recipe["ingredients"][1]["name"], "butter");
    assert_eq!(recipe["ingredients"][1]["amount"].as_f64(), Some(0.5));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_unknown_recipe(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, body) = send(&app, Method::GET, "/recipe/4242", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], 404);
    assert_eq!(body["message"], "Recipe 4242 not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_pagination_bounds(pool: PgPool) {
    let app = setup_test_app(pool);
    let cook = user_token(COOK);

    let (status, body) = send(&app, Method::GET, "/recipe", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["total_pages"], 0);
    assert_eq!(body["recipes"], json!([]));

    let (status, _) = send(&app, Method::GET, "/recipe?page=2", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Created out of order; listed by name.
    for n in (0..11).rev() {
        create_recipe(&app, &cook, &format!("Recipe {n:02}")).await;
    }

    let (status, body) = send(&app, Method::GET, "/recipe?page=1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_pages"], 2);
    let names: Vec<&str> = body["recipes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 10);
    assert_eq!(names[0], "Recipe 00");
    assert_eq!(names[9], "Recipe 09");

    let (status, body) = send(&app, Method::GET, "/recipe?page=2", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 2);
    assert_eq!(body["recipes"].as_array().unwrap().len(), 1);
    assert_eq!(body["recipes"][0]["name"], "Recipe 10");
    assert!(body["recipes"][0].get("servings").is_none());

    let (status, body) = send(&app, Method::GET, "/recipe?page=3", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Page set beyond end of list");

    let (status, body) = send(&app, Method::GET, "/recipe?page=abc", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_replaces_ingredients(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let cook = user_token(COOK);
    let id = create_recipe(&app, &cook, "Bread").await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/recipe/{id}"),
        Some(&cook),
        Some(json!({
            "servings": 4,
            "ingredients": [{"name": "Rye", "amount": 300}, {"name": "Water", "amount": 0.25}],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["msg"], format!("Updated recipe with id {id}"));

    let (_, body) = send(&app, Method::GET, &format!("/recipe/{id}"), None, None).await;
    let recipe = &body["recipe"];
    assert_eq!(recipe["name"], "Bread");
    assert_eq!(recipe["servings"], 4);
    assert_eq!(recipe["preparation"], "Mix and bake.");
    let ingredients = recipe["ingredients"].as_array().unwrap();
    assert_eq!(ingredients.len(), 2);
    assert_eq!(ingredients[0]["name"], "Rye");
    assert_eq!(ingredients[1]["name"], "Water");

    let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ingredients WHERE recipe_id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_without_ingredients_keeps_them(pool: PgPool) {
    let app = setup_test_app(pool);
    let cook = user_token(COOK);
    let id = create_recipe(&app, &cook, "Bread").await;

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/recipe/{id}"),
        Some(&cook),
        Some(json!({"name": "Sourdough", "preparation": "Wait a day."})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, &format!("/recipe/{id}"), None, None).await;
    assert_eq!(body["recipe"]["name"], "Sourdough");
    assert_eq!(body["recipe"]["preparation"], "Wait a day.");
    assert_eq!(body["recipe"]["ingredients"][0]["name"], "Flour");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_unknown_recipe(pool: PgPool) {
    let app = setup_test_app(pool);
    let cook = user_token(COOK);

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/recipe/99",
        Some(&cook),
        Some(json!({"name": "Nothing"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Recipe 99 not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_only_owner_or_elevated_may_update(pool: PgPool) {
    let app = setup_test_app(pool);
    let owner = user_token(COOK);
    let other = user_token(OTHER_COOK);
    let id = create_recipe(&app, &owner, "Bread").await;
    let uri = format!("/recipe/{id}");

    let (status, body) = send(&app, Method::PATCH, &uri, Some(&other), Some(json!({"name": "Mine"}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "forbidden");
    assert_eq!(body["message"], "Cannot update recipes of other users");

    let admin = token(OTHER_COOK, &["update:recipe", "update:any-recipe"]);
    let (status, _) = send(&app, Method::PATCH, &uri, Some(&admin), Some(json!({"name": "Edited"}))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(body["recipe"]["name"], "Edited");
    assert_eq!(body["recipe"]["username"], COOK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_removes_ingredients(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let cook = user_token(COOK);
    let id = create_recipe(&app, &cook, "Bread").await;
    let uri = format!("/recipe/{id}");

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&user_token(OTHER_COOK)), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&cook), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], format!("Recipe {id} deleted"));

    let (status, _) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ingredients WHERE recipe_id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(orphans, 0);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&cook), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_recipe_used_in_menu_cannot_be_deleted(pool: PgPool) {
    let app = setup_test_app(pool);
    let cook = user_token(COOK);
    let id = create_recipe(&app, &cook, "Bread").await;
    create_menu(&app, &cook, "Breakfast", &[id]).await;
    let uri = format!("/recipe/{id}");

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&cook), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], format!("Cannot delete recipe {id} because it is used in menus"));

    // Holds for every caller, elevated or not.
    let admin = token(OTHER_COOK, &["delete:recipe", "delete:any-recipe"]);
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let other = user_token(OTHER_COOK);
    let (status, body) = send(&app, Method::DELETE, &uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], format!("Cannot delete recipe {id} because it is used in menus"));

    let (status, _) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
}

use anyhow::anyhow;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;

use recipebook_core::errors::ErrorResponse;
use recipebook_core::{AppError, PaginationParams};
use recipebook_models::MutationResponse;
use recipebook_models::recipes::{
    CreateRecipeDto, RecipeListResponse, RecipeResponse, UpdateRecipeDto,
};

use crate::middleware::auth::{RequireAddRecipe, RequireDeleteRecipe, RequireUpdateRecipe};
use crate::modules::recipes::service::RecipeService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/recipe",
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of recipes ordered by name", body = RecipeListResponse),
        (status = 400, description = "Page set beyond end of list", body = ErrorResponse)
    ),
    tag = "Recipes"
)]
#[instrument(skip(state))]
pub async fn get_recipes(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<RecipeListResponse>, AppError> {
    let recipes = RecipeService::list_recipes(&state.db, params.page()).await?;
    Ok(Json(recipes))
}

#[utoipa::path(
    get,
    path = "/recipe/{id}",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe with ingredients", body = RecipeResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    tag = "Recipes"
)]
#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<RecipeResponse>, AppError> {
    let id = parse_recipe_id(&raw_id)?;
    let recipe = RecipeService::get_recipe(&state.db, id).await?;
    Ok(Json(RecipeResponse::new(recipe)))
}

#[utoipa::path(
    post,
    path = "/recipe",
    request_body = CreateRecipeDto,
    responses(
        (status = 200, description = "Recipe created", body = MutationResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Requires add:recipe permission", body = ErrorResponse)
    ),
    tag = "Recipes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user), fields(username = %user.username()))]
pub async fn create_recipe(
    State(state): State<AppState>,
    RequireAddRecipe(user): RequireAddRecipe,
    ValidatedJson(dto): ValidatedJson<CreateRecipeDto>,
) -> Result<Json<MutationResponse>, AppError> {
    let id = RecipeService::create_recipe(&state.db, user.username(), dto).await?;
    Ok(Json(MutationResponse::new(format!("Added recipe with id {id}"), id)))
}

#[utoipa::path(
    patch,
    path = "/recipe/{id}",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    request_body = UpdateRecipeDto,
    responses(
        (status = 200, description = "Recipe updated", body = MutationResponse),
        (status = 400, description = "Invalid field", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Requires update:recipe and ownership, or update:any-recipe", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    tag = "Recipes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user), fields(username = %user.username()))]
pub async fn update_recipe(
    State(state): State<AppState>,
    RequireUpdateRecipe(user): RequireUpdateRecipe,
    Path(raw_id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateRecipeDto>,
) -> Result<Json<MutationResponse>, AppError> {
    let id = parse_recipe_id(&raw_id)?;
    RecipeService::update_recipe(&state.db, user.claims(), id, dto).await?;
    Ok(Json(MutationResponse::new(format!("Updated recipe with id {id}"), id)))
}

#[utoipa::path(
    delete,
    path = "/recipe/{id}",
    params(
        ("id" = i64, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe deleted", body = MutationResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Recipe used in menus, or requires delete:recipe and ownership (or delete:any-recipe)", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    tag = "Recipes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user), fields(username = %user.username()))]
pub async fn delete_recipe(
    State(state): State<AppState>,
    RequireDeleteRecipe(user): RequireDeleteRecipe,
    Path(raw_id): Path<String>,
) -> Result<Json<MutationResponse>, AppError> {
    let id = parse_recipe_id(&raw_id)?;
    RecipeService::delete_recipe(&state.db, user.claims(), id).await?;
    Ok(Json(MutationResponse::new(format!("Recipe {id} deleted"), id)))
}

/// Anything but an integer id is an unknown recipe.
fn parse_recipe_id(raw_id: &str) -> Result<i64, AppError> {
    raw_id
        .parse()
        .map_err(|_| AppError::not_found(anyhow!("Recipe {raw_id} not found")))
}

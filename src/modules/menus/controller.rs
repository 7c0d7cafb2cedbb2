use anyhow::anyhow;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;

use recipebook_core::errors::ErrorResponse;
use recipebook_core::{AppError, PaginationParams};
use recipebook_models::MutationResponse;
use recipebook_models::menus::{CreateMenuDto, MenuListResponse, MenuResponse, UpdateMenuDto};

use crate::middleware::auth::{RequireAddMenu, RequireDeleteMenu, RequireUpdateMenu};
use crate::modules::menus::service::MenuService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/menu",
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of menus ordered by name", body = MenuListResponse),
        (status = 400, description = "Page set beyond end of list", body = ErrorResponse)
    ),
    tag = "Menus"
)]
#[instrument(skip(state))]
pub async fn get_menus(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<MenuListResponse>, AppError> {
    let menus = MenuService::list_menus(&state.db, params.page()).await?;
    Ok(Json(menus))
}

#[utoipa::path(
    get,
    path = "/menu/{id}",
    params(
        ("id" = i64, Path, description = "Menu ID")
    ),
    responses(
        (status = 200, description = "Menu with its dishes", body = MenuResponse),
        (status = 404, description = "Menu not found", body = ErrorResponse)
    ),
    tag = "Menus"
)]
#[instrument(skip(state))]
pub async fn get_menu(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MenuResponse>, AppError> {
    let id = parse_menu_id(&raw_id)?;
    let menu = MenuService::get_menu(&state.db, id).await?;
    Ok(Json(MenuResponse::new(menu)))
}

#[utoipa::path(
    post,
    path = "/menu",
    request_body = CreateMenuDto,
    responses(
        (status = 200, description = "Menu created", body = MutationResponse),
        (status = 400, description = "Missing field or unknown dish recipe", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Requires add:menu permission", body = ErrorResponse)
    ),
    tag = "Menus",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user), fields(username = %user.username()))]
pub async fn create_menu(
    State(state): State<AppState>,
    RequireAddMenu(user): RequireAddMenu,
    ValidatedJson(dto): ValidatedJson<CreateMenuDto>,
) -> Result<Json<MutationResponse>, AppError> {
    let id = MenuService::create_menu(&state.db, user.username(), dto).await?;
    Ok(Json(MutationResponse::new(format!("Added menu with id {id}"), id)))
}

#[utoipa::path(
    patch,
    path = "/menu/{id}",
    params(
        ("id" = i64, Path, description = "Menu ID")
    ),
    request_body = UpdateMenuDto,
    responses(
        (status = 200, description = "Menu updated", body = MutationResponse),
        (status = 400, description = "Invalid field or unknown dish recipe", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Requires update:menu and ownership, or update:any-menu", body = ErrorResponse),
        (status = 404, description = "Menu not found", body = ErrorResponse)
    ),
    tag = "Menus",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user), fields(username = %user.username()))]
pub async fn update_menu(
    State(state): State<AppState>,
    RequireUpdateMenu(user): RequireUpdateMenu,
    Path(raw_id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateMenuDto>,
) -> Result<Json<MutationResponse>, AppError> {
    let id = parse_menu_id(&raw_id)?;
    MenuService::update_menu(&state.db, user.claims(), id, dto).await?;
    Ok(Json(MutationResponse::new(format!("Updated menu with id {id}"), id)))
}

#[utoipa::path(
    delete,
    path = "/menu/{id}",
    params(
        ("id" = i64, Path, description = "Menu ID")
    ),
    responses(
        (status = 200, description = "Menu deleted", body = MutationResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Requires delete:menu and ownership, or delete:any-menu", body = ErrorResponse),
        (status = 404, description = "Menu not found", body = ErrorResponse)
    ),
    tag = "Menus",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, user), fields(username = %user.username()))]
pub async fn delete_menu(
    State(state): State<AppState>,
    RequireDeleteMenu(user): RequireDeleteMenu,
    Path(raw_id): Path<String>,
) -> Result<Json<MutationResponse>, AppError> {
    let id = parse_menu_id(&raw_id)?;
    MenuService::delete_menu(&state.db, user.claims(), id).await?;
    Ok(Json(MutationResponse::new(format!("Menu {id} deleted"), id)))
}

/// Anything but an integer id is an unknown menu.
fn parse_menu_id(raw_id: &str) -> Result<i64, AppError> {
    raw_id
        .parse()
        .map_err(|_| AppError::not_found(anyhow!("Menu {raw_id} not found")))
}

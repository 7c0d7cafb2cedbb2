use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use recipebook_core::PaginationParams;
use recipebook_core::errors::ErrorResponse;
use recipebook_models::menus::{
    CreateMenuDto, DishDto, MenuDetail, MenuListResponse, MenuResponse, MenuSummary,
    UpdateMenuDto,
};
use recipebook_models::recipes::{
    CreateRecipeDto, Ingredient, IngredientDto, RecipeDetail, RecipeListResponse, RecipeResponse,
    RecipeSummary, UpdateRecipeDto,
};
use recipebook_models::MutationResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::recipes::controller::get_recipes,
        crate::modules::recipes::controller::get_recipe,
        crate::modules::recipes::controller::create_recipe,
        crate::modules::recipes::controller::update_recipe,
        crate::modules::recipes::controller::delete_recipe,
        crate::modules::menus::controller::get_menus,
        crate::modules::menus::controller::get_menu,
        crate::modules::menus::controller::create_menu,
        crate::modules::menus::controller::update_menu,
        crate::modules::menus::controller::delete_menu,
    ),
    components(
        schemas(
            ErrorResponse,
            MutationResponse,
            PaginationParams,
            Ingredient,
            IngredientDto,
            RecipeSummary,
            RecipeDetail,
            RecipeListResponse,
            RecipeResponse,
            CreateRecipeDto,
            UpdateRecipeDto,
            DishDto,
            MenuSummary,
            MenuDetail,
            MenuListResponse,
            MenuResponse,
            CreateMenuDto,
            UpdateMenuDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Recipes", description = "Recipes and their ingredients"),
        (name = "Menus", description = "Menus composed of existing recipes")
    ),
    info(
        title = "Recipebook API",
        version = "0.1.0",
        description = "Recipes and menus with per-owner access control. Reads are public; writes require a bearer token carrying the matching permission.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

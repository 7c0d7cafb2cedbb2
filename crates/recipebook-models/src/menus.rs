//! Menu domain models, views and DTOs.
//!
//! A menu references existing recipes as its dishes without owning them.

use recipebook_core::{AppError, PageMeta};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::recipes::RecipeSummary;
use crate::schema::{
    FromJsonObject, JsonObject, entry, integer, invalid, list, optional_string, required, string,
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Menu {
    pub id: i64,
    pub username: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MenuSummary {
    pub id: i64,
    pub name: String,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MenuDetail {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub number_of_dishes: usize,
    pub dishes: Vec<RecipeSummary>,
}

impl MenuDetail {
    pub fn new(menu: Menu, dishes: Vec<RecipeSummary>) -> Self {
        Self {
            id: menu.id,
            name: menu.name,
            username: menu.username,
            number_of_dishes: dishes.len(),
            dishes,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MenuListResponse {
    pub success: bool,
    pub page: i64,
    pub total_pages: i64,
    pub menus: Vec<MenuSummary>,
}

impl MenuListResponse {
    pub fn new(meta: PageMeta, menus: Vec<MenuSummary>) -> Self {
        Self {
            success: true,
            page: meta.page,
            total_pages: meta.total_pages,
            menus,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MenuResponse {
    pub success: bool,
    pub menu: MenuDetail,
}

impl MenuResponse {
    pub fn new(menu: MenuDetail) -> Self {
        Self {
            success: true,
            menu,
        }
    }
}

/// A dish entry referencing an existing recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
pub struct DishDto {
    pub recipe_id: i64,
}

#[derive(Debug, Clone, Validate, ToSchema)]
pub struct CreateMenuDto {
    #[validate(length(min = 1, max = 128, message = "Field 'name' must be between 1 and 128 characters"))]
    pub name: String,
    pub dishes: Vec<DishDto>,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Validate, ToSchema)]
pub struct UpdateMenuDto {
    #[validate(length(min = 1, max = 128, message = "Field 'name' must be between 1 and 128 characters"))]
    pub name: Option<String>,
    /// Replaces the whole dish list when present
    pub dishes: Option<Vec<DishDto>>,
}

impl FromJsonObject for CreateMenuDto {
    fn from_json_object(body: &JsonObject) -> Result<Self, AppError> {
        let name = string(required(body, "name")?, "name")?;
        let dishes = parse_dishes(required(body, "dishes")?)?;

        Ok(Self { name, dishes })
    }
}

impl FromJsonObject for UpdateMenuDto {
    fn from_json_object(body: &JsonObject) -> Result<Self, AppError> {
        Ok(Self {
            name: optional_string(body, "name")?,
            dishes: body.get("dishes").map(parse_dishes).transpose()?,
        })
    }
}

fn parse_dishes(value: &Value) -> Result<Vec<DishDto>, AppError> {
    list(value, "dishes")?
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let recipe_id = entry(item, "dishes", idx)?
                .get("recipe_id")
                .ok_or_else(|| invalid(format!("Field 'recipe_id' is missing in dish {idx}")))?;
            let recipe_id = integer(recipe_id, "recipe_id").map_err(|_| {
                invalid(format!("Field 'recipe_id' is not an integer in dish {idx}"))
            })?;

            Ok(DishDto { recipe_id })
        })
        .collect()
}

//! Recipe domain models, views and DTOs.
//!
//! A recipe exclusively owns an ordered list of ingredients. The list view
//! shows only `{id, name, username}`; the detail view adds servings,
//! ingredients in their stored order, and the preparation text.

use recipebook_core::{AppError, PageMeta};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::schema::{
    FromJsonObject, JsonObject, entry, integer, invalid, list, optional_string, required, string,
};

const NAME_MAX_CHARS: usize = 128;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Recipe {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub servings: i32,
    pub preparation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Ingredient {
    #[schema(example = "slice of bread")]
    pub name: String,
    #[schema(example = 1.0)]
    pub amount: f64,
}

/// Short view used by the list endpoint and as a menu's dish entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RecipeSummary {
    pub id: i64,
    pub name: String,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecipeDetail {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub servings: i32,
    pub ingredients: Vec<Ingredient>,
    pub preparation: String,
}

impl RecipeDetail {
    pub fn new(recipe: Recipe, ingredients: Vec<Ingredient>) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name,
            username: recipe.username,
            servings: recipe.servings,
            ingredients,
            preparation: recipe.preparation,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecipeListResponse {
    pub success: bool,
    pub page: i64,
    pub total_pages: i64,
    pub recipes: Vec<RecipeSummary>,
}

impl RecipeListResponse {
    pub fn new(meta: PageMeta, recipes: Vec<RecipeSummary>) -> Self {
        Self {
            success: true,
            page: meta.page,
            total_pages: meta.total_pages,
            recipes,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub success: bool,
    pub recipe: RecipeDetail,
}

impl RecipeResponse {
    pub fn new(recipe: RecipeDetail) -> Self {
        Self {
            success: true,
            recipe,
        }
    }
}

#[derive(Debug, Clone, PartialEq, ToSchema)]
pub struct IngredientDto {
    pub name: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Validate, ToSchema)]
pub struct CreateRecipeDto {
    #[validate(length(min = 1, max = 128, message = "Field 'name' must be between 1 and 128 characters"))]
    pub name: String,
    #[validate(range(min = 1, message = "Field 'servings' must be at least 1"))]
    pub servings: i32,
    pub ingredients: Vec<IngredientDto>,
    /// Defaults to an empty string
    pub preparation: String,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Validate, ToSchema)]
pub struct UpdateRecipeDto {
    #[validate(length(min = 1, max = 128, message = "Field 'name' must be between 1 and 128 characters"))]
    pub name: Option<String>,
    #[validate(range(min = 1, message = "Field 'servings' must be at least 1"))]
    pub servings: Option<i32>,
    /// Replaces the whole ingredient list when present
    pub ingredients: Option<Vec<IngredientDto>>,
    pub preparation: Option<String>,
}

impl FromJsonObject for CreateRecipeDto {
    fn from_json_object(body: &JsonObject) -> Result<Self, AppError> {
        let name = string(required(body, "name")?, "name")?;
        let servings = parse_servings(required(body, "servings")?)?;
        let ingredients = parse_ingredients(required(body, "ingredients")?)?;
        let preparation = optional_string(body, "preparation")?.unwrap_or_default();

        Ok(Self {
            name,
            servings,
            ingredients,
            preparation,
        })
    }
}

impl FromJsonObject for UpdateRecipeDto {
    fn from_json_object(body: &JsonObject) -> Result<Self, AppError> {
        Ok(Self {
            name: optional_string(body, "name")?,
            servings: body.get("servings").map(parse_servings).transpose()?,
            ingredients: body.get("ingredients").map(parse_ingredients).transpose()?,
            preparation: optional_string(body, "preparation")?,
        })
    }
}

fn parse_servings(value: &Value) -> Result<i32, AppError> {
    i32::try_from(integer(value, "servings")?)
        .map_err(|_| invalid("Field 'servings' is out of range".to_string()))
}

fn parse_ingredients(value: &Value) -> Result<Vec<IngredientDto>, AppError> {
    list(value, "ingredients")?
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let item = entry(item, "ingredients", idx)?;

            let amount = item
                .get("amount")
                .ok_or_else(|| invalid(format!("Field 'amount' is missing in ingredient {idx}")))?;
            let name = item
                .get("name")
                .ok_or_else(|| invalid(format!("Field 'name' is missing in ingredient {idx}")))?;

            // Numbers only: booleans and numeric strings are rejected.
            let amount = match amount {
                Value::Number(n) => n.as_f64(),
                _ => None,
            }
            .ok_or_else(|| invalid(format!("Field 'amount' is not numerical in ingredient {idx}")))?;

            let name = name
                .as_str()
                .ok_or_else(|| invalid(format!("Field 'name' is not a string in ingredient {idx}")))?;
            let chars = name.chars().count();
            if chars == 0 || chars > NAME_MAX_CHARS {
                return Err(invalid(format!(
                    "Field 'name' in ingredient {idx} must be between 1 and {NAME_MAX_CHARS} characters"
                )));
            }

            Ok(IngredientDto {
                name: name.to_string(),
                amount,
            })
        })
        .collect()
}

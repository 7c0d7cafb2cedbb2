//! # Recipebook Models
//!
//! Domain models, JSON views and request DTOs for the Recipebook API.
//!
//! # Modules
//!
//! - [`recipes`]: Recipes, their ordered ingredients and recipe DTOs
//! - [`menus`]: Menus, their dishes and menu DTOs
//! - [`schema`]: The typed parsing step that turns a raw JSON object into a DTO
//! - [`responses`]: Success envelopes shared by both resources
//!
//! Request bodies are parsed in two stages. [`schema::FromJsonObject`] checks
//! field presence and JSON types and reports the offending field (and list
//! index) by name; the resulting DTO is then checked with `validator` rules.
//!
//! # Example
//!
//! ```ignore
//! use recipebook_models::schema::FromJsonObject;
//! use recipebook_models::recipes::CreateRecipeDto;
//! use validator::Validate;
//!
//! let dto = CreateRecipeDto::from_json_object(&body)?;
//! dto.validate()?;
//! ```

pub mod menus;
pub mod recipes;
pub mod responses;
pub mod schema;

// Re-export commonly used types at crate root for convenience
pub use menus::{
    CreateMenuDto, DishDto, Menu, MenuDetail, MenuListResponse, MenuResponse, MenuSummary,
    UpdateMenuDto,
};
pub use recipes::{
    CreateRecipeDto, Ingredient, IngredientDto, Recipe, RecipeDetail, RecipeListResponse,
    RecipeResponse, RecipeSummary, UpdateRecipeDto,
};
pub use responses::MutationResponse;
pub use schema::FromJsonObject;

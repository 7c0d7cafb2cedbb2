//! Permission constants for the Recipebook API.
//!
//! Permissions are opaque strings granted by the identity provider in the
//! `permissions` claim of an access token. The `*-any-*` variants are elevated
//! permissions that bypass the ownership check on another user's resource.
//!
//! # Example
//!
//! ```ignore
//! use recipebook_core::permissions;
//!
//! check_permission(permissions::ADD_RECIPE, &claims)?;
//! ensure_owner_or(&claims, &recipe.username, permissions::UPDATE_ANY_RECIPE)?;
//! ```

// =============================================================================
// Recipe permissions
// =============================================================================

/// Permission to create recipes
pub const ADD_RECIPE: &str = "add:recipe";
/// Permission to update one's own recipes
pub const UPDATE_RECIPE: &str = "update:recipe";
/// Permission to update recipes of any user
pub const UPDATE_ANY_RECIPE: &str = "update:any-recipe";
/// Permission to delete one's own recipes
pub const DELETE_RECIPE: &str = "delete:recipe";
/// Permission to delete recipes of any user
pub const DELETE_ANY_RECIPE: &str = "delete:any-recipe";

// =============================================================================
// Menu permissions
// =============================================================================

/// Permission to create menus
pub const ADD_MENU: &str = "add:menu";
/// Permission to update one's own menus
pub const UPDATE_MENU: &str = "update:menu";
/// Permission to update menus of any user
pub const UPDATE_ANY_MENU: &str = "update:any-menu";
/// Permission to delete one's own menus
pub const DELETE_MENU: &str = "delete:menu";
/// Permission to delete menus of any user
pub const DELETE_ANY_MENU: &str = "delete:any-menu";

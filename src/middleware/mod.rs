//! Request extractors for authentication and authorization.
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. [`auth::AuthUser`] verifies the token through the shared `TokenVerifier`
//! 3. A permission extractor checks the required permission string
//! 4. The handler runs; ownership is decided by the service once the target
//!    record is loaded
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::RequireUpdateRecipe;
//!
//! async fn update_recipe(
//!     State(state): State<AppState>,
//!     RequireUpdateRecipe(user): RequireUpdateRecipe,
//!     Path(id): Path<i64>,
//! ) -> Result<Json<MutationResponse>, AppError> {
//!     // Only executes if the token grants "update:recipe"
//! }
//! ```

pub mod auth;

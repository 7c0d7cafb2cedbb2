use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use recipebook_auth::{AuthError, Claims};
use recipebook_core::AppError;
use recipebook_core::permissions;

use crate::state::AppState;

/// Extractor that verifies the bearer token and provides the caller's claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// The caller identity recorded as owner of created resources.
    pub fn username(&self) -> &str {
        self.0.owner()
    }

    pub fn claims(&self) -> &Claims {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .map(|value| {
                value.to_str().map_err(|_| {
                    AuthError::MalformedCredential("Authorization header must be bearer token.")
                })
            })
            .transpose()?;

        let claims = state.verifier.verify_header(header).await?;

        Ok(AuthUser(claims))
    }
}

/// Creates an extractor that authenticates the caller and then requires one
/// permission string in the token's `permissions` claim.
#[macro_export]
macro_rules! require_permission {
    ($name:ident, $permission:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = $crate::recipebook_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user = <$crate::middleware::auth::AuthUser as axum::extract::FromRequestParts<
                    $crate::state::AppState,
                >>::from_request_parts(parts, state)
                .await?;

                $crate::recipebook_auth::check_permission($permission, auth_user.claims())?;

                Ok($name(auth_user))
            }
        }
    };
}

// Recipe permissions
require_permission!(RequireAddRecipe, permissions::ADD_RECIPE);
require_permission!(RequireUpdateRecipe, permissions::UPDATE_RECIPE);
require_permission!(RequireDeleteRecipe, permissions::DELETE_RECIPE);

// Menu permissions
require_permission!(RequireAddMenu, permissions::ADD_MENU);
require_permission!(RequireUpdateMenu, permissions::UPDATE_MENU);
require_permission!(RequireDeleteMenu, permissions::DELETE_MENU);

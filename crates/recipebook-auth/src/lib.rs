//! # Recipebook Auth
//!
//! Bearer token verification and access checks for the Recipebook API.
//!
//! This crate provides:
//!
//! - [`claims`]: The decoded claim set of an access token
//! - [`error`]: The authentication/authorization error taxonomy
//! - [`verifier`]: Bearer header parsing and token verification
//! - [`jwks`]: Signing key discovery with a per-key-id cache
//! - [`guards`]: Permission checks and the ownership guard
//!
//! # Verification Modes
//!
//! - **Normal**: the signing key named by the token's `kid` is fetched from the
//!   identity provider's JWKS endpoint, then signature, audience and expiry are
//!   validated.
//! - **Test**: tokens are verified with a fixed HS256 shared secret. Both modes
//!   produce the same [`Claims`].
//!
//! # Example
//!
//! ```ignore
//! use recipebook_auth::{TokenVerifier, check_permission, ensure_owner_or};
//! use recipebook_config::AuthConfig;
//!
//! let verifier = TokenVerifier::new(AuthConfig::from_env())?;
//!
//! let claims = verifier.verify_header(Some("Bearer eyJ...")).await?;
//! check_permission("update:recipe", &claims)?;
//! ensure_owner_or(&claims, &recipe.username, "update:any-recipe", "Cannot update recipes of other users")?;
//! ```

pub mod claims;
pub mod error;
pub mod guards;
pub mod jwks;
#[cfg(any(test, feature = "test-utils"))]
pub mod jwt;
pub mod verifier;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use error::{AuthError, VerifierConfigError};
pub use guards::{check_permission, ensure_owner_or};
pub use jwks::JwksFetcher;
pub use verifier::TokenVerifier;

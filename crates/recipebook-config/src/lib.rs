//! # Recipebook Config
//!
//! Configuration types for the Recipebook API.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`auth`]: Identity provider and token verification configuration
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: Listen address configuration
//!
//! # Example
//!
//! ```ignore
//! use recipebook_config::{AuthConfig, CorsConfig, ServerConfig};
//!
//! // Load all configs from environment
//! let auth_config = AuthConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod auth;
pub mod cors;
pub mod server;

// Re-export commonly used types at crate root
pub use auth::AuthConfig;
pub use cors::CorsConfig;
pub use server::ServerConfig;

//! Token verification configuration.
//!
//! Tokens are issued by an Auth0-style identity provider. In normal mode the
//! signing keys are discovered from the provider's JWKS endpoint; in test mode
//! (`TEST=true`) every token is verified with a fixed HS256 shared secret, so
//! tests and local development need no network access.
//!
//! # Environment Variables
//!
//! - `AUTH0_DOMAIN`: identity provider domain, e.g. `example.eu.auth0.com`
//! - `AUTH0_ALGORITHMS`: comma separated list of accepted algorithms (default `RS256`)
//! - `AUTH0_API_AUDIENCE`: expected `aud` claim
//! - `AUTH0_JWKS_URL`: optional override of the key-set URL
//! - `TEST`: `true` switches to shared-secret verification
//! - `TEST_JWT_SECRET`: shared secret used in test mode (default `test`)

use std::env;

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub domain: String,
    pub algorithms: Vec<String>,
    pub audience: Option<String>,
    pub jwks_url: Option<String>,
    pub test_mode: bool,
    pub test_secret: String,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            domain: env::var("AUTH0_DOMAIN").unwrap_or_default(),
            algorithms: split_list(
                &env::var("AUTH0_ALGORITHMS").unwrap_or_else(|_| "RS256".to_string()),
            ),
            audience: env::var("AUTH0_API_AUDIENCE")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            jwks_url: env::var("AUTH0_JWKS_URL")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            test_mode: env::var("TEST").map(|v| v == "true").unwrap_or(false),
            test_secret: env::var("TEST_JWT_SECRET").unwrap_or_else(|_| "test".to_string()),
        }
    }

    /// Configuration for deterministic verification with a shared secret.
    pub fn test_mode(secret: &str) -> Self {
        Self {
            domain: String::new(),
            algorithms: vec!["HS256".to_string()],
            audience: None,
            jwks_url: None,
            test_mode: true,
            test_secret: secret.to_string(),
        }
    }

    /// URL of the provider's JSON Web Key Set.
    pub fn jwks_url(&self) -> String {
        match &self.jwks_url {
            Some(url) => url.clone(),
            None => format!("https://{}/.well-known/jwks.json", self.domain),
        }
    }
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

//! Signing key discovery from a JSON Web Key Set.
//!
//! Keys are cached by key id. A lookup that misses the cache refetches the
//! whole key set once, which also picks up rotated keys; a key id still
//! unknown after the refresh is reported as an undecodable token.

use std::collections::HashMap;

use jsonwebtoken::DecodingKey;
use jsonwebtoken::jwk::JwkSet;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use crate::error::AuthError;

pub struct JwksFetcher {
    url: String,
    client: reqwest::Client,
    keys: RwLock<HashMap<String, DecodingKey>>,
}

impl JwksFetcher {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
            keys: RwLock::new(HashMap::new()),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the decoding key published under `kid`.
    pub async fn key(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        if let Some(key) = self.keys.read().await.get(kid) {
            return Ok(key.clone());
        }

        self.refresh().await?;

        self.keys
            .read()
            .await
            .get(kid)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }

    /// Number of keys currently cached.
    pub async fn cached_keys(&self) -> usize {
        self.keys.read().await.len()
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn refresh(&self) -> Result<(), AuthError> {
        let set: JwkSet = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(AuthError::KeySetUnavailable)?
            .json()
            .await
            .map_err(AuthError::KeySetUnavailable)?;

        let mut keys = HashMap::with_capacity(set.keys.len());
        for jwk in &set.keys {
            let Some(kid) = jwk.common.key_id.as_ref() else {
                continue;
            };
            match DecodingKey::from_jwk(jwk) {
                Ok(key) => {
                    keys.insert(kid.clone(), key);
                }
                Err(e) => warn!(kid = %kid, error = %e, "skipping unusable signing key"),
            }
        }

        debug!(count = keys.len(), "signing keys refreshed");
        *self.keys.write().await = keys;

        Ok(())
    }
}

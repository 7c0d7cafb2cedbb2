//! Bearer header parsing and token verification.

use std::str::FromStr;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use tracing::{debug, info};

use recipebook_config::AuthConfig;

use crate::claims::Claims;
use crate::error::{AuthError, VerifierConfigError};
use crate::jwks::JwksFetcher;

enum Mode {
    SharedSecret(DecodingKey),
    KeySet {
        jwks: JwksFetcher,
        algorithms: Vec<Algorithm>,
        audience: String,
    },
}

/// Verifies bearer tokens and yields their [`Claims`].
///
/// Built once at startup and shared through application state.
pub struct TokenVerifier {
    mode: Mode,
}

impl TokenVerifier {
    /// Builds a verifier from configuration.
    ///
    /// Fails when `AUTH0_ALGORITHMS` names an algorithm jsonwebtoken does not
    /// know, or when key-set mode has no expected audience.
    pub fn new(config: AuthConfig) -> Result<Self, VerifierConfigError> {
        if config.test_mode {
            info!("token verification running in test mode (shared secret)");
            return Ok(Self {
                mode: Mode::SharedSecret(DecodingKey::from_secret(config.test_secret.as_bytes())),
            });
        }

        let algorithms = config
            .algorithms
            .iter()
            .map(|name| Algorithm::from_str(name))
            .collect::<Result<Vec<_>, _>>()?;
        let audience = config.audience.clone().ok_or(VerifierConfigError::MissingAudience)?;

        let jwks = JwksFetcher::new(config.jwks_url());
        info!(jwks_url = %jwks.url(), ?algorithms, %audience, "token verification using key set");

        Ok(Self {
            mode: Mode::KeySet {
                jwks,
                algorithms,
                audience,
            },
        })
    }

    /// Extracts the token from an `Authorization` header and verifies it.
    pub async fn verify_header(&self, header: Option<&str>) -> Result<Claims, AuthError> {
        let token = bearer_token(header)?;
        self.verify(token).await
    }

    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = match &self.mode {
            Mode::SharedSecret(key) => {
                let mut validation = Validation::new(Algorithm::HS256);
                validation.validate_aud = false;
                validation.required_spec_claims.clear();
                decode::<Claims>(token, key, &validation)
            }
            Mode::KeySet {
                jwks,
                algorithms,
                audience,
            } => {
                let header = decode_header(token).map_err(|_| AuthError::InvalidToken)?;
                if !algorithms.contains(&header.alg) {
                    debug!(alg = ?header.alg, "token signed with unaccepted algorithm");
                    return Err(AuthError::InvalidToken);
                }
                let kid = header.kid.ok_or(AuthError::InvalidToken)?;
                let key = jwks.key(&kid).await?;

                let mut validation = Validation::new(header.alg);
                validation.set_audience(&[audience]);
                validation.required_spec_claims.insert("aud".to_string());
                decode::<Claims>(token, &key, &validation)
            }
        };

        data.map(|data| data.claims).map_err(|e| {
            debug!(error = %e, "token rejected");
            classify(e.kind())
        })
    }
}

/// Splits `Bearer <token>` and returns the token.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingCredential)?;
    let parts: Vec<&str> = header.split_whitespace().collect();

    match parts.as_slice() {
        [] => Err(AuthError::MissingCredential),
        [scheme, ..] if !scheme.eq_ignore_ascii_case("bearer") => Err(
            AuthError::MalformedCredential("Authorization header must start with \"Bearer\"."),
        ),
        [_] => Err(AuthError::MalformedCredential("Token not found.")),
        [_, token] => Ok(*token),
        _ => Err(AuthError::MalformedCredential(
            "Authorization header must be bearer token.",
        )),
    }
}

fn classify(kind: &ErrorKind) -> AuthError {
    match kind {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidAudience
        | ErrorKind::InvalidIssuer
        | ErrorKind::ImmatureSignature
        | ErrorKind::MissingRequiredClaim(_) => AuthError::InvalidClaim,
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::InvalidToken,
    }
}

//! Authentication and authorization errors.
//!
//! Each variant carries a fixed HTTP status and a machine-readable code that
//! is included in the failure envelope:
//!
//! | Variant | Status | Code |
//! |---------|--------|------|
//! | `MissingCredential` | 401 | `authorization_header_missing` |
//! | `MalformedCredential` | 401 | `invalid_header` |
//! | `TokenExpired` | 401 | `token_expired` |
//! | `InvalidClaim` | 401 | `invalid_claim` |
//! | `InvalidSignature` | 401 | `invalid_signature` |
//! | `InvalidToken` | 400 | `invalid_token` |
//! | `KeySetUnavailable` | 500 | `key_set_unavailable` |
//! | `PermissionsMissing` | 403 | `unauthorized` |
//! | `PermissionDenied` | 403 | `forbidden` |
//! | `OwnershipViolation` | 403 | `forbidden` |

use axum::http::StatusCode;
use thiserror::Error;

use recipebook_core::AppError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authorization header is expected.")]
    MissingCredential,

    #[error("{0}")]
    MalformedCredential(&'static str),

    #[error("Token expired.")]
    TokenExpired,

    #[error("There is an issue with the claims of the token.")]
    InvalidClaim,

    #[error("The signature does not match.")]
    InvalidSignature,

    #[error("Cannot decode token.")]
    InvalidToken,

    #[error("Cannot fetch token signing keys")]
    KeySetUnavailable(#[source] reqwest::Error),

    #[error("Permissions missing in token")]
    PermissionsMissing,

    #[error("User does not have permission {0}")]
    PermissionDenied(String),

    #[error("{0}")]
    OwnershipViolation(String),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MissingCredential
            | AuthError::MalformedCredential(_)
            | AuthError::TokenExpired
            | AuthError::InvalidClaim
            | AuthError::InvalidSignature => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken => StatusCode::BAD_REQUEST,
            AuthError::KeySetUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::PermissionsMissing
            | AuthError::PermissionDenied(_)
            | AuthError::OwnershipViolation(_) => StatusCode::FORBIDDEN,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "authorization_header_missing",
            AuthError::MalformedCredential(_) => "invalid_header",
            AuthError::TokenExpired => "token_expired",
            AuthError::InvalidClaim => "invalid_claim",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::InvalidToken => "invalid_token",
            AuthError::KeySetUnavailable(_) => "key_set_unavailable",
            AuthError::PermissionsMissing => "unauthorized",
            AuthError::PermissionDenied(_) | AuthError::OwnershipViolation(_) => "forbidden",
        }
    }
}

/// Token verification settings rejected at startup.
#[derive(Debug, Error)]
pub enum VerifierConfigError {
    #[error("Unknown signing algorithm in AUTH0_ALGORITHMS")]
    UnknownAlgorithm(#[from] jsonwebtoken::errors::Error),

    #[error("AUTH0_API_AUDIENCE must be set unless TEST=true")]
    MissingAudience,
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let status = err.status();
        let code = err.code();
        AppError::new(status, err).with_code(code)
    }
}

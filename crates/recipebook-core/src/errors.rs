//! Application error type and the failure envelope.
//!
//! Every user-facing failure is an [`AppError`] carrying an HTTP status, an
//! optional machine-readable code and a message. Handlers return it with `?`;
//! it is rendered once, at the response boundary, as
//!
//! ```json
//! { "success": false, "error": 404, "message": "Recipe 7 not found" }
//! ```
//!
//! Server errors are logged with their full cause chain but only the outermost
//! context message reaches the client.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;
use validator::ValidationErrors;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub code: Option<&'static str>,
    pub error: Error,
}

/// Body of every failed response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            code: None,
            error: err.into(),
        }
    }

    /// Attaches a machine-readable code (e.g. `token_expired`) to the error.
    #[must_use]
    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNAUTHORIZED, err)
    }

    pub fn forbidden<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::FORBIDDEN, err)
    }

    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }

    /// The message shown to the client. For server errors this is only the
    /// outermost context, so driver and I/O details stay in the logs.
    pub fn message(&self) -> String {
        self.error.to_string()
    }

    pub fn to_body(&self) -> ErrorResponse {
        ErrorResponse {
            success: false,
            error: self.status.as_u16(),
            message: self.message(),
            code: self.code.map(str::to_string),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status.as_u16(), self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = ?self.error, "{:#}", self.error);
        }

        let body = self.to_body();
        let mut value = json!({
            "success": body.success,
            "error": body.error,
            "message": body.message,
        });
        if let Some(code) = body.code {
            value["code"] = json!(code);
        }

        (self.status, Json(value)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::internal(err)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::internal(Error::new(err).context("Database error"))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::bad_request(anyhow::anyhow!("{}", format_validation_errors(&errors)))
    }
}

/// Joins field-level validation failures into a single message.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("Field '{}' is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

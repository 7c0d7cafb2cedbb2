use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde_json::Value;
use validator::Validate;

use recipebook_core::AppError;
use recipebook_models::FromJsonObject;

/// Extracts a JSON object body, parses it field by field into `T` and runs
/// the `validator` rules on the result.
///
/// Every failure is a 400 naming the offending field, so handlers only ever
/// see a fully typed and validated DTO.
#[derive(Debug, Clone, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: FromJsonObject + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::MissingJsonContentType(_) => AppError::bad_request(anyhow!(
                    "Missing 'Content-Type: application/json' header"
                )),
                _ => AppError::bad_request(anyhow!("Invalid request body")),
            })?;

        let Value::Object(body) = value else {
            return Err(AppError::bad_request(anyhow!(
                "Request body must be a JSON object"
            )));
        };

        let dto = T::from_json_object(&body)?;
        dto.validate()?;

        Ok(ValidatedJson(dto))
    }
}

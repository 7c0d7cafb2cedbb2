use serde::Serialize;
use utoipa::ToSchema;

/// Body returned by create, update and delete operations.
#[derive(Debug, Serialize, ToSchema)]
pub struct MutationResponse {
    pub success: bool,
    #[schema(example = "Added recipe with id 1")]
    pub msg: String,
    pub id: i64,
}

impl MutationResponse {
    pub fn new(msg: impl Into<String>, id: i64) -> Self {
        Self {
            success: true,
            msg: msg.into(),
            id,
        }
    }
}

use serde::Serialize;
use utoipa::ToSchema;

/// Standard error body for JSON API failures.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServerErrorResponse {
    /// Human-readable description of the failure
    error: String,
}

impl ServerErrorResponse {
    pub fn new(error: String) -> Self {
        Self { error }
    }
}

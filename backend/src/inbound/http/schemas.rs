//! utoipa mirrors of the domain error types.
//!
//! `domain` stays free of OpenAPI derives; these shapes are registered in
//! their place under the domain type names.

use utoipa::ToSchema;

/// Failure category carried in the `code` field.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    #[schema(rename = "not_found")]
    NotFound,
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Body of every non-2xx user API response.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(dead_code, reason = "documentation-only mirror of domain::Error")]
pub struct ErrorSchema {
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Redacted to a generic text for `internal_error`.
    #[schema(example = "user 1 not found")]
    message: String,
    /// Matches the `trace-id` response header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Extra context such as the rejected field.
    details: Option<serde_json::Value>,
}

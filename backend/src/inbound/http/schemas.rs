//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`; the
//! wrappers here mirror their wire shape for documentation only.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// Malformed body, query, or login fields.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Missing, invalid, or expired credentials.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The access policy refused the action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// Absent, or outside the caller's visibility.
    #[schema(rename = "not_found")]
    NotFound,
    /// One or more field violations; see `details.violations`.
    #[schema(rename = "validation_failed")]
    ValidationFailed,
    /// The backing store is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Violation`].
#[derive(ToSchema)]
#[schema(as = Violation)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ViolationSchema {
    /// Request field the violation refers to.
    #[schema(example = "email")]
    field: String,
    #[schema(example = "This value is already used.")]
    message: String,
    /// Stable violation category, e.g. `too_short` or `not_unique`.
    #[schema(example = "not_unique")]
    code: String,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    code: ErrorCodeSchema,
    #[schema(example = "Access Denied.")]
    message: String,
    /// Correlates with the `trace-id` response header.
    #[schema(example = "7d0c3a4e-8f0b-4a43-9d1c-2b0f6c1d9e10")]
    trace_id: Option<String>,
    /// Extra context; validation failures carry `{"violations": [...]}`.
    details: Option<serde_json::Value>,
}

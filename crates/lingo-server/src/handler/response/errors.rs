use std::borrow::Cow;
use std::collections::HashMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Tracing target for error responses.
const TRACING_TARGET: &str = "lingo_server::handler::response";

/// Validation error details for field-specific errors.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorDetail {
    /// Field name that failed validation
    pub field: String,
    /// Error code for the validation failure
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Additional parameters related to the validation error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<HashMap<String, serde_json::Value>>,
}

/// HTTP error document.
///
/// Serialized as `{name, message, detail?, validation?}`. The `message` is
/// the generic text of the error kind; `detail` carries the message of the
/// failure that produced the response.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse<'a> {
    /// The error name/type identifier
    pub name: Cow<'a, str>,
    /// Generic message of the error kind
    pub message: Cow<'a, str>,
    /// Message of the underlying failure (optional, set by handler)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Cow<'a, str>>,
    /// Validation error details for field-specific errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<Vec<ValidationErrorDetail>>,

    /// Internal context for debugging (optional, not exposed to client)
    #[serde(skip)]
    pub context: Option<Cow<'a, str>>,
    /// HTTP status code (not serialized in JSON)
    #[serde(skip)]
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    // 4xx Client Errors
    pub const BAD_REQUEST: Self = Self::new(
        "bad_request",
        "Invalid request data.",
        StatusCode::BAD_REQUEST,
    );
    pub const NOT_FOUND: Self =
        Self::new("not_found", "Resource not found.", StatusCode::NOT_FOUND);
    pub const PAYLOAD_TOO_LARGE: Self = Self::new(
        "payload_too_large",
        "Payload too large.",
        StatusCode::PAYLOAD_TOO_LARGE,
    );
    pub const VALIDATION_ERROR: Self = Self::new(
        "validation_error",
        "Validation failed.",
        StatusCode::BAD_REQUEST,
    );
    // 5xx Server Errors
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "internal_server_error",
        "Internal server error.",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const GATEWAY_TIMEOUT: Self = Self::new(
        "gateway_timeout",
        "Request timed out.",
        StatusCode::GATEWAY_TIMEOUT,
    );

    /// Creates a new error response.
    #[inline]
    pub const fn new(name: &'a str, message: &'a str, status: StatusCode) -> Self {
        Self {
            name: Cow::Borrowed(name),
            message: Cow::Borrowed(message),
            detail: None,
            validation: None,
            context: None,
            status,
        }
    }

    /// Sets the detail of the response.
    /// If a detail already exists, the new one is appended.
    pub fn with_detail(mut self, detail: impl Into<Cow<'a, str>>) -> Self {
        let new_detail = detail.into();
        self.detail = Some(match self.detail {
            Some(existing) => Cow::Owned(format!("{}. {}", existing, new_detail)),
            None => new_detail,
        });
        self
    }

    /// Attaches context to the error response.
    /// If context already exists, it merges them with a separator.
    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        let new_context = context.into();
        self.context = Some(match self.context {
            Some(existing) => Cow::Owned(format!("{}; {}", existing, new_context)),
            None => new_context,
        });
        self
    }

    /// Adds validation errors to the error response.
    pub fn with_validation_errors(mut self, errors: Vec<ValidationErrorDetail>) -> Self {
        self.validation = Some(errors);
        self
    }
}

impl Default for ErrorResponse<'_> {
    #[inline]
    fn default() -> Self {
        Self::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ErrorResponse<'_> {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(
                target: TRACING_TARGET,
                status = %self.status,
                name = %self.name,
                detail = ?self.detail,
                context = ?self.context,
                "HTTP error response"
            );
        } else {
            tracing::warn!(
                target: TRACING_TARGET,
                status = %self.status,
                name = %self.name,
                detail = ?self.detail,
                context = ?self.context,
                "HTTP error response"
            );
        }

        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_merging() {
        let response = ErrorResponse::BAD_REQUEST
            .with_detail("Invalid format")
            .with_detail("Missing required field");

        assert_eq!(
            response.detail.as_deref(),
            Some("Invalid format. Missing required field")
        );
        assert_eq!(&response.message, "Invalid request data.");
    }

    #[test]
    fn context_merging() {
        let response = ErrorResponse::INTERNAL_SERVER_ERROR
            .with_context("Generation failed")
            .with_context("deployment: extraction");

        assert_eq!(
            response.context.as_deref(),
            Some("Generation failed; deployment: extraction")
        );
    }

    #[test]
    fn serialization_skips_internal_fields() -> anyhow::Result<()> {
        let response = ErrorResponse::INTERNAL_SERVER_ERROR
            .with_detail("ORQ_API_KEY not found in environment")
            .with_context("upload");

        let json = serde_json::to_value(&response)?;
        assert_eq!(
            json,
            serde_json::json!({
                "name": "internal_server_error",
                "message": "Internal server error.",
                "detail": "ORQ_API_KEY not found in environment",
            })
        );
        Ok(())
    }
}

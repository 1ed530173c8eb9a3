//! Structured error handling for generation operations.

use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Fixed message reported when no API key is configured.
pub const MISSING_API_KEY: &str = "ORQ_API_KEY not found in environment";

/// Categories of errors that can occur while invoking a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The provider could not be reached or initialized.
    ServiceUnavailable,
    /// The provider answered with a non-success status.
    ExternalError,
    /// The provider answered with a body that could not be understood.
    InvalidResponse,
    /// Required configuration (API key, base URL) is missing or malformed.
    Configuration,
    /// The request did not complete in time.
    Timeout,
    /// Serialization/deserialization error.
    Serialization,
    /// Unknown error occurred.
    #[default]
    Unknown,
}

impl ErrorKind {
    /// Returns the HTTP status classification attached to this kind, if any.
    #[must_use]
    pub const fn status_hint(&self) -> Option<u16> {
        match self {
            Self::ServiceUnavailable => Some(503),
            _ => None,
        }
    }
}

/// Structured error type with classification and context tracking.
#[must_use]
#[derive(Debug, Error)]
#[error("[{kind}]{}", message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Primary error message.
    pub message: Option<String>,
    /// Underlying source error, if any.
    #[source]
    pub source: Option<BoxedError>,
    /// Additional context information (upstream detail, status, body excerpt).
    pub context: Option<String>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            source: None,
            context: None,
        }
    }

    /// Creates a new error from a source error.
    pub fn from_source(kind: ErrorKind, source: impl Into<BoxedError>) -> Self {
        Self {
            kind,
            message: None,
            source: Some(source.into()),
            context: None,
        }
    }

    /// Creates the error raised when no API key is available at invocation time.
    pub fn missing_api_key() -> Self {
        Self::new(ErrorKind::Configuration).with_message(MISSING_API_KEY)
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the source of the error.
    pub fn with_source(mut self, source: impl Into<BoxedError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds context to the error.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Returns the message suitable for reporting to callers.
    ///
    /// Falls back to the error kind when no message was attached.
    pub fn detail(&self) -> &str {
        self.message.as_deref().unwrap_or(self.kind.as_ref())
    }

    /// Returns the HTTP status classification attached to this error, if any.
    #[must_use]
    pub const fn status_hint(&self) -> Option<u16> {
        self.kind.status_hint()
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::from_source(ErrorKind::Serialization, error)
            .with_message("Failed to encode or decode a generation payload")
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::new(ErrorKind::Timeout)
                .with_message("Orq AI service did not respond in time")
                .with_context(error.to_string())
                .with_source(error)
        } else if error.is_connect() || error.is_builder() {
            Self::new(ErrorKind::ServiceUnavailable)
                .with_message("Failed to connect to Orq AI service")
                .with_context(error.to_string())
                .with_source(error)
        } else if error.is_decode() {
            Self::new(ErrorKind::InvalidResponse)
                .with_message("Orq AI service returned an undecodable response")
                .with_context(error.to_string())
                .with_source(error)
        } else {
            Self::new(ErrorKind::ServiceUnavailable)
                .with_message("Failed to connect to Orq AI service")
                .with_context(error.to_string())
                .with_source(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn missing_api_key_message() {
        let error = Error::missing_api_key();
        assert_eq!(error.kind, ErrorKind::Configuration);
        assert_eq!(error.detail(), "ORQ_API_KEY not found in environment");
        assert!(error.status_hint().is_none());
    }

    #[test]
    fn service_unavailable_carries_503() {
        let error = Error::new(ErrorKind::ServiceUnavailable)
            .with_message("Failed to connect to Orq AI service")
            .with_context("connection refused");

        assert_eq!(error.status_hint(), Some(503));
        assert_eq!(error.context.as_deref(), Some("connection refused"));
    }

    #[test]
    fn display_includes_kind_and_message() {
        let error = Error::new(ErrorKind::ExternalError).with_message("bad gateway");

        let display = error.to_string();
        assert!(display.contains("external_error"));
        assert!(display.contains("bad gateway"));
    }

    #[test]
    fn detail_falls_back_to_kind() {
        let error = Error::new(ErrorKind::InvalidResponse);
        assert_eq!(error.detail(), "invalid_response");
    }

    #[test]
    fn kind_from_str() {
        assert_eq!(
            ErrorKind::from_str("service_unavailable").ok(),
            Some(ErrorKind::ServiceUnavailable)
        );
        assert!(ErrorKind::from_str("invalid").is_err());
        assert_eq!(ErrorKind::default(), ErrorKind::Unknown);
    }
}

//! Pipeline error to HTTP error conversion.

use crate::handler::{Error, ErrorKind};
use crate::pipeline::Error as PipelineError;
use crate::service::GuidelineError;

impl From<PipelineError> for Error<'static> {
    fn from(error: PipelineError) -> Self {
        let kind = match &error {
            PipelineError::InvalidInput(_) => ErrorKind::BadRequest,
            PipelineError::Guideline(GuidelineError::InvalidLevel(_)) => ErrorKind::BadRequest,
            PipelineError::NothingToSimplify => ErrorKind::NotFound,
            PipelineError::Guideline(_)
            | PipelineError::Generation(_)
            | PipelineError::Store(_)
            | PipelineError::MalformedRecord { .. }
            | PipelineError::Serialization(_) => ErrorKind::InternalServerError,
        };

        let error = match &error {
            PipelineError::Generation(source) => kind.with_message(upstream_detail(source)),
            _ => kind.with_message(error.to_string()),
        };

        error.into_static()
    }
}

/// Renders a generation failure with its status classification and the
/// upstream cause, e.g. `Failed to connect to Orq AI service (status 503):
/// connection refused`.
fn upstream_detail(source: &lingo_orq::Error) -> String {
    let mut detail = source.detail().to_owned();
    if let Some(status) = source.status_hint() {
        detail.push_str(&format!(" (status {status})"));
    }
    if let Some(context) = source.context.as_deref() {
        detail.push_str(": ");
        detail.push_str(context);
    }
    detail
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::*;

    #[test]
    fn status_mapping() {
        let cases: [(PipelineError, StatusCode); 4] = [
            (
                PipelineError::invalid_input("Only .txt files are allowed"),
                StatusCode::BAD_REQUEST,
            ),
            (
                GuidelineError::InvalidLevel("Expert".into()).into(),
                StatusCode::BAD_REQUEST,
            ),
            (PipelineError::NothingToSimplify, StatusCode::NOT_FOUND),
            (
                lingo_orq::Error::missing_api_key().into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            let error = Error::from(error);
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[test]
    fn message_is_preserved() {
        let error = Error::from(PipelineError::from(lingo_orq::Error::missing_api_key()));
        assert_eq!(error.message(), Some("ORQ_API_KEY not found in environment"));
    }

    #[test]
    fn upstream_cause_reaches_the_message() {
        let source = lingo_orq::Error::new(lingo_orq::ErrorKind::ServiceUnavailable)
            .with_message("Failed to connect to Orq AI service")
            .with_context("error sending request: connection refused");

        let error = Error::from(PipelineError::from(source));
        assert_eq!(
            error.message(),
            Some(
                "Failed to connect to Orq AI service (status 503): \
                 error sending request: connection refused"
            )
        );
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

//! Pipeline errors.

use std::borrow::Cow;

use crate::service::GuidelineError;

/// Result type alias for pipeline operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure of a pipeline flow.
///
/// Malformed generation output is not an error; it degrades to a fallback
/// payload inside the flow.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The submission failed boundary validation.
    #[error("{0}")]
    InvalidInput(Cow<'static, str>),

    /// There is no extraction record to simplify.
    #[error("No output files found to simplify")]
    NothingToSimplify,

    /// The audience level is unknown or its guidelines are unavailable.
    #[error(transparent)]
    Guideline(#[from] GuidelineError),

    /// The generation service failed.
    #[error("{}", .0.detail())]
    Generation(#[from] lingo_orq::Error),

    /// The record store failed.
    #[error(transparent)]
    Store(#[from] lingo_store::Error),

    /// A stored record is not a JSON object.
    #[error("Record {filename} is not a JSON object")]
    MalformedRecord { filename: String },

    /// A generation input could not be serialized.
    #[error("Failed to serialize generation input: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Creates an input validation error.
    pub fn invalid_input(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidInput(message.into())
    }
}

#[cfg(test)]
mod tests {
    use lingo_orq::ErrorKind;

    use super::*;

    #[test]
    fn generation_error_displays_detail() {
        let error: Error = lingo_orq::Error::missing_api_key().into();
        assert_eq!(error.to_string(), "ORQ_API_KEY not found in environment");

        let error: Error = lingo_orq::Error::new(ErrorKind::Timeout).into();
        assert_eq!(error.to_string(), "timeout");
    }

    #[test]
    fn guideline_error_is_transparent() {
        let error: Error = GuidelineError::InvalidLevel("Expert".into()).into();
        assert_eq!(
            error.to_string(),
            "Invalid level: Expert. Must be one of: Basic, Intermediate, Fluent"
        );
    }
}

use serde::{Deserialize, Serialize};

use crate::pipeline::SimplifyParams;

/// Request to simplify the most recent extraction.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplifyRequest {
    /// Language the simplified text is written in.
    pub language: String,
    /// Audience level: `Basic`, `Intermediate` or `Fluent`.
    pub level: String,
}

impl From<SimplifyRequest> for SimplifyParams {
    fn from(request: SimplifyRequest) -> Self {
        Self {
            language: request.language,
            level: request.level,
        }
    }
}

//! Generation response types.

use serde::{Deserialize, Serialize};

use crate::DeploymentKey;

/// Text produced by a deployment invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Stage the text was generated for.
    pub deployment: DeploymentKey,
    /// Provider-assigned identifier, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Raw generated text, possibly wrapped in formatting noise.
    pub content: String,
}

impl GenerationResponse {
    /// Creates a response without a provider identifier.
    pub fn new(deployment: DeploymentKey, content: impl Into<String>) -> Self {
        Self {
            deployment,
            id: None,
            content: content.into(),
        }
    }

    /// Returns the generated text.
    pub fn into_content(self) -> String {
        self.content
    }
}

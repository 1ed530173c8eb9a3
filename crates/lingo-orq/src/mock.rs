//! Offline generation provider.
//!
//! [`MockProvider`] answers every deployment with canned text and never
//! touches the network. It is selected by the `DUMMY` API key and used
//! throughout the test suites.
//!
//! # Example
//!
//! ```rust,ignore
//! use lingo_orq::{MockConfig, MockProvider};
//!
//! let service = MockProvider::new(MockConfig {
//!     extraction: Some("```json\n{\"summary\":\"x\"}\n```".into()),
//!     ..MockConfig::default()
//! })
//! .into_service();
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

use crate::{
    DeploymentKey, Error, ErrorKind, GenerationProvider, GenerationRequest, GenerationResponse,
    GenerationService, Result,
};

/// Canned extraction output.
pub const MOCK_EXTRACTION: &str =
    r#"{"summary": "This is a mock extraction", "steps": ["Step 1", "Step 2"]}"#;

/// Canned simplification output, wrapped in prose like real generations are.
pub const MOCK_SIMPLIFICATION: &str = r#"Here is the simplified text:
{"Summary": "This is a short text.", "Daily_Tasks": ["Do step 1.", "Do step 2."]}
I hope this helps."#;

/// Canned classification output, wrapped in a code fence.
pub const MOCK_CLASSIFICATION: &str = "```json\n{\"Summary\": false, \"Daily_Tasks\": true}\n```";

/// Configuration for the mock provider.
///
/// Unset outputs fall back to the canned constants of this module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MockConfig {
    /// Text returned for extraction requests.
    #[serde(default)]
    pub extraction: Option<String>,
    /// Text returned for simplification requests.
    #[serde(default)]
    pub simplification: Option<String>,
    /// Text returned for classification requests.
    #[serde(default)]
    pub classification: Option<String>,
    /// When set, every invocation fails as if the provider were unreachable.
    #[serde(default)]
    pub unavailable: bool,
}

/// Offline generation provider.
#[derive(Clone, Debug, Default)]
pub struct MockProvider {
    config: Arc<MockConfig>,
    calls: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Creates a new mock provider with the given configuration.
    pub fn new(config: MockConfig) -> Self {
        Self {
            config: Arc::new(config),
            calls: Arc::default(),
        }
    }

    /// Creates a mock provider whose invocations always fail.
    pub fn unavailable() -> Self {
        Self::new(MockConfig {
            unavailable: true,
            ..MockConfig::default()
        })
    }

    /// Returns how many invocations this provider (and its clones) received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Convert this provider into a [`GenerationService`].
    pub fn into_service(self) -> GenerationService {
        GenerationService::new(self)
    }

    fn output(&self, key: DeploymentKey) -> &str {
        let configured = match key {
            DeploymentKey::Extraction => &self.config.extraction,
            DeploymentKey::Simplification => &self.config.simplification,
            DeploymentKey::Classification => &self.config.classification,
        };

        configured.as_deref().unwrap_or(match key {
            DeploymentKey::Extraction => MOCK_EXTRACTION,
            DeploymentKey::Simplification => MOCK_SIMPLIFICATION,
            DeploymentKey::Classification => MOCK_CLASSIFICATION,
        })
    }
}

#[async_trait::async_trait]
impl GenerationProvider for MockProvider {
    async fn invoke(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.config.unavailable {
            return Err(Error::new(ErrorKind::ServiceUnavailable)
                .with_message("Failed to connect to Orq AI service")
                .with_context("mock provider configured as unavailable"));
        }

        Ok(GenerationResponse::new(
            request.deployment,
            self.output(request.deployment),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_outputs() {
        let provider = MockProvider::default();
        let service = provider.clone().into_service();

        let response = service
            .invoke(&GenerationRequest::new(DeploymentKey::Extraction))
            .await
            .unwrap();
        assert_eq!(response.content, MOCK_EXTRACTION);

        let response = service
            .invoke(&GenerationRequest::new(DeploymentKey::Classification))
            .await
            .unwrap();
        assert_eq!(response.content, MOCK_CLASSIFICATION);
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn configured_output_overrides_default() {
        let provider = MockProvider::new(MockConfig {
            simplification: Some("no json here".into()),
            ..MockConfig::default()
        });

        let response = provider
            .invoke(&GenerationRequest::new(DeploymentKey::Simplification))
            .await
            .unwrap();
        assert_eq!(response.content, "no json here");
    }

    #[tokio::test]
    async fn unavailable_provider_fails() {
        let provider = MockProvider::unavailable();
        let error = provider
            .invoke(&GenerationRequest::new(DeploymentKey::Extraction))
            .await
            .unwrap_err();

        assert_eq!(error.kind, ErrorKind::ServiceUnavailable);
        assert_eq!(error.status_hint(), Some(503));
    }
}

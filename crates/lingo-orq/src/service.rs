//! Generation service wrapper with observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::{GenerationProvider, GenerationRequest, GenerationResponse, Result, TRACING_TARGET};

/// Generation service wrapper with observability.
///
/// This wrapper adds structured logging to any generation provider.
/// The inner provider is wrapped in `Arc` for cheap cloning.
#[derive(Clone)]
pub struct GenerationService {
    inner: Arc<dyn GenerationProvider>,
}

impl fmt::Debug for GenerationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationService").finish_non_exhaustive()
    }
}

impl GenerationService {
    /// Create a new generation service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: GenerationProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Invokes a deployment and returns the generated text.
    pub async fn invoke(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            deployment = %request.deployment,
            inputs = request.inputs.len(),
            content_len = request.content_len(),
            "invoking generation"
        );

        let result = self.inner.invoke(request).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(response) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    deployment = %request.deployment,
                    response_id = ?response.id,
                    output_len = response.content.len(),
                    elapsed_ms = elapsed.as_millis(),
                    "generation completed"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    deployment = %request.deployment,
                    error = %error,
                    context = ?error.context,
                    elapsed_ms = elapsed.as_millis(),
                    "generation failed"
                );
            }
        }

        result
    }
}

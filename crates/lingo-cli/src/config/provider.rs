//! Generation provider selection.

use anyhow::Context;
use lingo_orq::GenerationService;

use super::Cli;
use crate::TRACING_TARGET_CONFIG;

/// Creates the generation service selected by the CLI configuration.
///
/// `--mock-generation` swaps in the offline provider. Otherwise the Orq
/// configuration decides, which also honors the `DUMMY` API key.
pub fn create_generation_service(cli: &Cli) -> anyhow::Result<GenerationService> {
    #[cfg(feature = "mock")]
    {
        if cli.mock_generation {
            tracing::warn!(
                target: TRACING_TARGET_CONFIG,
                "Mock generation enabled, responses are canned"
            );
            return Ok(lingo_orq::MockProvider::default().into_service());
        }
    }

    if cli.orq.api_key().is_none() {
        tracing::warn!(
            target: TRACING_TARGET_CONFIG,
            "ORQ_API_KEY is not set, generation requests will fail until it is configured"
        );
    }

    cli.orq
        .clone()
        .into_service()
        .context("failed to create Orq generation service")
}

//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── server: ServerConfig          # Host, port, shutdown
//! ├── middleware: MiddlewareConfig  # CORS, request timeout
//! ├── service: ServiceConfig        # Data and guideline directories
//! └── orq: OrqConfig                # Generation deployments and API key
//! ```
//!
//! Every option can be provided as a CLI argument or an environment variable.

mod middleware;
mod provider;
mod server;

use std::process;

use anyhow::Context;
use clap::Parser;
use lingo_orq::OrqConfig;
use lingo_server::service::ServiceConfig;
pub use middleware::MiddlewareConfig;
pub use provider::create_generation_service;
use serde::{Deserialize, Serialize};
pub use server::ServerConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "lingo")]
#[command(about = "Workplace instruction simplification server")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// HTTP middleware configuration (CORS, timeouts).
    #[clap(flatten)]
    pub middleware: MiddlewareConfig,

    /// Record storage and guideline locations.
    #[clap(flatten)]
    pub service: ServiceConfig,

    /// Orq generation client configuration.
    #[clap(flatten)]
    pub orq: OrqConfig,

    /// Serve canned generations instead of calling Orq.
    #[cfg(feature = "mock")]
    #[arg(long, env = "GENERATION_MOCK", default_value_t = false)]
    #[serde(default)]
    pub mock_generation: bool,
}

impl Cli {
    /// Loads the `.env` file (if enabled) and parses CLI arguments.
    ///
    /// The `.env` file is read first so clap picks its values up as
    /// environment defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with `RUST_LOG` filtering, defaulting to `info`.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;
        self.middleware
            .validate()
            .context("invalid middleware configuration")?;
        Ok(())
    }

    /// Returns whether canned generations were requested.
    pub fn uses_mock_generation(&self) -> bool {
        #[cfg(feature = "mock")]
        {
            self.mock_generation || self.orq.is_offline()
        }

        #[cfg(not(feature = "mock"))]
        {
            false
        }
    }

    /// Logs configuration without secrets.
    pub fn log(&self) {
        Self::log_build_info();
        self.server.log();
        self.middleware.log();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            data_dir = %self.service.data_dir.display(),
            guidelines_dir = %self.service.guidelines_dir.display(),
            "Service configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            base_url = %self.orq.base_url,
            has_api_key = self.orq.api_key().is_some(),
            timeout_secs = self.orq.effective_timeout().as_secs(),
            mock = self.uses_mock_generation(),
            "Generation configuration"
        );
    }

    fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    fn enabled_features() -> Vec<&'static str> {
        [
            cfg!(feature = "dotenv").then_some("dotenv"),
            cfg!(feature = "mock").then_some("mock"),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["lingo"])?;

        assert_eq!(cli.server.port, 8000);
        assert_eq!(cli.middleware.recovery.request_timeout, 120);
        assert_eq!(cli.middleware.cors.allowed_origins, vec!["*".to_owned()]);
        assert_eq!(cli.service.data_dir, std::path::PathBuf::from("./data"));
        assert!(cli.validate().is_ok());
        Ok(())
    }

    #[test]
    fn parses_overrides() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from([
            "lingo",
            "--port",
            "9000",
            "--cors-origins",
            "http://a.test,http://b.test",
            "--cors-max-age",
            "60",
            "--cors-allow-credentials",
            "--guidelines-dir",
            "/etc/lingo/guidelines",
        ])?;

        assert_eq!(cli.server.port, 9000);
        assert_eq!(cli.middleware.cors.allowed_origins.len(), 2);
        assert_eq!(cli.middleware.cors.max_age_seconds, 60);
        assert!(cli.middleware.cors.allow_credentials);
        assert_eq!(
            cli.service.guidelines_dir,
            std::path::PathBuf::from("/etc/lingo/guidelines")
        );
        Ok(())
    }

    #[cfg(feature = "mock")]
    #[test]
    fn mock_flag_or_dummy_key_selects_offline_generation() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["lingo", "--mock-generation"])?;
        assert!(cli.uses_mock_generation());

        let cli = Cli::try_parse_from(["lingo", "--orq-api-key", "DUMMY"])?;
        assert!(cli.uses_mock_generation());

        let cli = Cli::try_parse_from(["lingo", "--orq-api-key", "sk-live"])?;
        assert!(!cli.uses_mock_generation());
        Ok(())
    }
}

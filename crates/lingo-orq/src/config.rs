//! Orq client configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::{Deployments, GenerationService, OrqClient, Result, TRACING_TARGET};

/// Default base URL of the Orq API.
pub const DEFAULT_BASE_URL: &str = "https://my.orq.ai";

/// Default timeout for generation requests: 120 seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// API key value that selects the offline provider instead of the network client.
pub const OFFLINE_API_KEY: &str = "DUMMY";

/// Configuration for the Orq generation client.
///
/// The API key is optional on purpose: its absence is only reported when a
/// deployment is first invoked, so the server can start without it.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct OrqConfig {
    /// Orq API key.
    #[cfg_attr(feature = "config", arg(long = "orq-api-key", env = "ORQ_API_KEY"))]
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the Orq API.
    #[cfg_attr(
        feature = "config",
        arg(long = "orq-base-url", env = "ORQ_BASE_URL", default_value = DEFAULT_BASE_URL)
    )]
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Generation request timeout in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long = "orq-timeout", env = "ORQ_TIMEOUT", default_value = "120")
    )]
    #[serde(default = "default_timeout_secs")]
    pub timeout: u64,

    /// Deployment used for structured extraction.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "orq-extraction-deployment",
            env = "ORQ_EXTRACTION_DEPLOYMENT",
            default_value = crate::deployment::DEFAULT_EXTRACTION_DEPLOYMENT
        )
    )]
    #[serde(default = "default_extraction")]
    pub extraction_deployment: String,

    /// Deployment used for audience-level simplification.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "orq-simplify-deployment",
            env = "ORQ_SIMPLIFY_DEPLOYMENT",
            default_value = crate::deployment::DEFAULT_SIMPLIFICATION_DEPLOYMENT
        )
    )]
    #[serde(default = "default_simplification")]
    pub simplification_deployment: String,

    /// Deployment used for task classification.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "orq-classify-deployment",
            env = "ORQ_CLASSIFY_DEPLOYMENT",
            default_value = crate::deployment::DEFAULT_CLASSIFICATION_DEPLOYMENT
        )
    )]
    #[serde(default = "default_classification")]
    pub classification_deployment: String,

    /// User-Agent header to send with requests.
    #[cfg_attr(feature = "config", arg(long = "orq-user-agent", env = "ORQ_USER_AGENT"))]
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_extraction() -> String {
    crate::deployment::DEFAULT_EXTRACTION_DEPLOYMENT.to_owned()
}

fn default_simplification() -> String {
    crate::deployment::DEFAULT_SIMPLIFICATION_DEPLOYMENT.to_owned()
}

fn default_classification() -> String {
    crate::deployment::DEFAULT_CLASSIFICATION_DEPLOYMENT.to_owned()
}

impl Default for OrqConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout: default_timeout_secs(),
            extraction_deployment: default_extraction(),
            simplification_deployment: default_simplification(),
            classification_deployment: default_classification(),
            user_agent: None,
        }
    }
}

impl std::fmt::Debug for OrqConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrqConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("deployments", &self.deployments())
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl OrqConfig {
    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout = timeout_secs;
        self
    }

    /// Returns the configured API key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }

    /// Returns whether the configured key selects the offline provider.
    pub fn is_offline(&self) -> bool {
        self.api_key() == Some(OFFLINE_API_KEY)
    }

    /// Returns the effective timeout, using the default if zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.timeout == 0 {
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        } else {
            Duration::from_secs(self.timeout)
        }
    }

    /// Returns the effective user agent, using the default if not set.
    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("lingo/{}", env!("CARGO_PKG_VERSION")))
    }

    /// Returns the deployment name mapping.
    pub fn deployments(&self) -> Deployments {
        Deployments {
            extraction: self.extraction_deployment.clone(),
            simplification: self.simplification_deployment.clone(),
            classification: self.classification_deployment.clone(),
        }
    }

    /// Converts this configuration into a [`GenerationService`].
    ///
    /// With the `mock` feature enabled, the `DUMMY` API key selects the
    /// offline provider.
    pub fn into_service(self) -> Result<GenerationService> {
        #[cfg(feature = "mock")]
        {
            if self.is_offline() {
                tracing::warn!(
                    target: TRACING_TARGET,
                    "offline API key configured, using canned generations"
                );
                return Ok(crate::MockProvider::default().into_service());
            }
        }

        tracing::debug!(
            target: TRACING_TARGET,
            base_url = %self.base_url,
            has_api_key = self.api_key().is_some(),
            "creating Orq generation service"
        );

        OrqClient::new(self).map(OrqClient::into_service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = OrqConfig::default();
        assert!(config.api_key().is_none());
        assert_eq!(config.base_url, "https://my.orq.ai");
        assert_eq!(config.effective_timeout(), Duration::from_secs(120));
        assert_eq!(config.deployments(), Deployments::default());
    }

    #[test]
    fn blank_api_key_is_ignored() {
        let config = OrqConfig::default().with_api_key("   ");
        assert!(config.api_key().is_none());
    }

    #[test]
    fn dummy_key_is_offline() {
        assert!(OrqConfig::default().with_api_key("DUMMY").is_offline());
        assert!(!OrqConfig::default().with_api_key("sk-live").is_offline());
    }

    #[test]
    fn effective_timeout_uses_default_when_zero() {
        let config = OrqConfig::default().with_timeout(0);
        assert_eq!(
            config.effective_timeout(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = OrqConfig::default().with_api_key("secret-value");
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-value"));
        assert!(debug.contains("redacted"));
    }
}

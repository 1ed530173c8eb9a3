//! Reqwest-based HTTP client for Orq deployments.

use std::collections::BTreeMap;
use std::sync::Arc;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    Error, ErrorKind, GenerationProvider, GenerationRequest, GenerationResponse,
    GenerationService, Message, OrqConfig, Result, TRACING_TARGET,
};

/// Path of the deployment invocation endpoint, relative to the base URL.
const INVOKE_PATH: &str = "v2/deployments/invoke";

/// Longest upstream body excerpt kept in error context.
const MAX_BODY_EXCERPT: usize = 512;

/// Inner client that holds the HTTP client and configuration.
struct OrqClientInner {
    http: Client,
    endpoint: Url,
    config: OrqConfig,
}

/// Reqwest-based client invoking Orq deployments.
///
/// Construction never touches the network and never checks the API key;
/// both are deferred to [`GenerationProvider::invoke`].
#[derive(Clone)]
pub struct OrqClient {
    inner: Arc<OrqClientInner>,
}

impl std::fmt::Debug for OrqClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrqClient")
            .field("endpoint", &self.inner.endpoint.as_str())
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

/// Body of a deployment invocation.
#[derive(Debug, Serialize)]
struct InvokeBody<'a> {
    key: &'a str,
    #[serde(skip_serializing_if = "no_inputs")]
    inputs: &'a BTreeMap<String, String>,
    #[serde(skip_serializing_if = "no_messages")]
    messages: &'a [Message],
}

fn no_inputs(inputs: &&BTreeMap<String, String>) -> bool {
    inputs.is_empty()
}

fn no_messages(messages: &&[Message]) -> bool {
    messages.is_empty()
}

/// Relevant subset of a deployment invocation response.
#[derive(Debug, Deserialize)]
struct InvokeResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    choices: Vec<InvokeChoice>,
}

#[derive(Debug, Deserialize)]
struct InvokeChoice {
    message: InvokeMessage,
}

#[derive(Debug, Deserialize)]
struct InvokeMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OrqClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: OrqConfig) -> Result<Self> {
        let timeout = config.effective_timeout();
        let endpoint = invoke_endpoint(&config.base_url)?;

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(config.effective_user_agent())
            .build()
            .map_err(|err| {
                Error::new(ErrorKind::ServiceUnavailable)
                    .with_message("Failed to connect to Orq AI service")
                    .with_context(err.to_string())
                    .with_source(err)
            })?;

        tracing::debug!(
            target: TRACING_TARGET,
            endpoint = %endpoint,
            timeout_ms = timeout.as_millis(),
            "created Orq client"
        );

        let inner = OrqClientInner {
            http,
            endpoint,
            config,
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &OrqConfig {
        &self.inner.config
    }

    /// Returns the URL deployments are invoked at.
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Converts this client into a [`GenerationService`] for use with dependency injection.
    pub fn into_service(self) -> GenerationService {
        GenerationService::new(self)
    }
}

#[async_trait::async_trait]
impl GenerationProvider for OrqClient {
    async fn invoke(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        let api_key = self.config().api_key().ok_or_else(Error::missing_api_key)?;
        let deployments = self.config().deployments();
        let key = deployments.name(request.deployment);

        let body = InvokeBody {
            key,
            inputs: &request.inputs,
            messages: &request.messages,
        };

        tracing::trace!(
            target: TRACING_TARGET,
            deployment = key,
            inputs = request.inputs.len(),
            messages = request.messages.len(),
            "invoking deployment"
        );

        let response = self
            .inner
            .http
            .post(self.inner.endpoint.clone())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::new(ErrorKind::ExternalError)
                .with_message(format!("Orq AI service returned {status}"))
                .with_context(excerpt(&text)));
        }

        let payload: InvokeResponse = response.json().await?;
        let content = payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                Error::new(ErrorKind::InvalidResponse)
                    .with_message("Orq AI service returned no generated content")
                    .with_context(format!("deployment: {key}"))
            })?;

        Ok(GenerationResponse {
            deployment: request.deployment,
            id: payload.id,
            content,
        })
    }
}

/// Joins the invocation path onto the configured base URL.
fn invoke_endpoint(base_url: &str) -> Result<Url> {
    let mut base = Url::parse(base_url).map_err(|err| {
        Error::new(ErrorKind::Configuration)
            .with_message(format!("Invalid Orq base URL: {base_url}"))
            .with_source(err)
    })?;

    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    base.join(INVOKE_PATH).map_err(|err| {
        Error::new(ErrorKind::Configuration)
            .with_message(format!("Invalid Orq base URL: {base_url}"))
            .with_source(err)
    })
}

/// Truncates an upstream body on a character boundary.
fn excerpt(body: &str) -> String {
    body.chars().take(MAX_BODY_EXCERPT).collect()
}

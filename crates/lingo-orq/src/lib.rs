#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod client;
mod config;
mod deployment;
mod error;
#[cfg(any(test, feature = "mock"))]
#[cfg_attr(docsrs, doc(cfg(feature = "mock")))]
mod mock;
mod request;
mod response;
mod service;

pub mod structured;

pub use client::OrqClient;
pub use config::OrqConfig;
pub use deployment::{DeploymentKey, Deployments};
pub use error::{BoxedError, Error, ErrorKind, MISSING_API_KEY, Result};
#[cfg(any(test, feature = "mock"))]
#[cfg_attr(docsrs, doc(cfg(feature = "mock")))]
pub use mock::{MockConfig, MockProvider};
pub use request::{GenerationRequest, Message, Role};
pub use response::GenerationResponse;
pub use service::GenerationService;

/// Tracing target for generation operations.
pub const TRACING_TARGET: &str = "lingo_orq::generation";

/// Core trait for text-generation providers.
///
/// A provider resolves the symbolic [`DeploymentKey`] of the request into
/// its own deployment naming and returns the generated text. Providers are
/// stateless between invocations and never retry.
#[async_trait::async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Invokes the deployment named by the request and returns its output.
    async fn invoke(&self, request: &GenerationRequest) -> Result<GenerationResponse>;
}

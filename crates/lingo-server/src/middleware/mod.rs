//! Middleware for `axum::Router` and HTTP request processing.
//!
//! Each concern is exposed as an extension trait on [`Router`]:
//!
//! - [`RouterRecoveryExt`] converts timeouts and panics into error documents.
//! - [`RouterObservabilityExt`] adds request ids and tracing spans.
//! - [`RouterSecurityExt`] applies CORS, body limits, compression and
//!   security headers.
//!
//! ```rust,no_run
//! use axum::Router;
//! use lingo_server::middleware::{
//!     CorsConfig, RecoveryConfig, RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt,
//! };
//!
//! let app: Router = Router::new()
//!     .with_security(&CorsConfig::default())
//!     .with_observability()
//!     .with_recovery(&RecoveryConfig::default());
//! ```
//!
//! [`Router`]: axum::Router

mod observability;
mod recovery;
mod security;

pub use observability::RouterObservabilityExt;
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::{CorsConfig, DEFAULT_MAX_BODY_SIZE, RouterSecurityExt};

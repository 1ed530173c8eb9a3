//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! | Route | Handler |
//! |---|---|
//! | `POST /upload` | multipart document upload and extraction |
//! | `POST /simplify` | simplification of the latest extraction |
//! | `POST /task` | task submission |
//! | `GET /health` | record store health |
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use lingo_orq::OrqConfig;
//! use lingo_server::handler::routes;
//! use lingo_server::service::{ServiceConfig, ServiceState};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let generation = OrqConfig::default().into_service()?;
//! let state = ServiceState::from_config(&ServiceConfig::default(), generation).await?;
//! let app: axum::Router = routes().with_state(state);
//! # Ok(())
//! # }
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod error;
mod monitors;
pub mod request;
pub mod response;
mod simplify;
mod tasks;
mod uploads;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::response::ErrorResponse;
use crate::service::ServiceState;

#[inline]
async fn fallback() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with all routes and the 404 fallback.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .merge(uploads::routes())
        .merge(simplify::routes())
        .merge(tasks::routes())
        .merge(monitors::routes())
        .fallback(fallback)
}

//! Application state and dependency injection.

mod config;
pub mod guidelines;
mod state;

pub use crate::service::config::{ServiceConfig, ServiceConfigBuilder};
pub use crate::service::guidelines::{GuidelineError, GuidelineResolver, Level};
pub use crate::service::state::ServiceState;
// Re-export error types from crate root for convenience
pub use crate::{Error, Result};

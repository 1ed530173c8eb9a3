//! Monitor response types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Overall service health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ServiceStatus {
    /// Every dependency is usable.
    Healthy,
    /// The record store is not usable.
    Degraded,
}

/// System monitoring status response.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
pub struct MonitorStatus {
    /// Timestamp when this status was generated.
    pub checked_at: Timestamp,
    /// Overall system health status.
    pub status: ServiceStatus,
    /// Application version.
    pub version: String,
}

impl MonitorStatus {
    /// Creates a status report checked now.
    pub fn new(status: ServiceStatus) -> Self {
        Self {
            checked_at: Timestamp::now(),
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Default for MonitorStatus {
    fn default() -> Self {
        Self::new(ServiceStatus::Healthy)
    }
}

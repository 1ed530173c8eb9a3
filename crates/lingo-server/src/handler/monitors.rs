//! Service health handler.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use lingo_store::RecordStore;

use crate::extract::Json;
use crate::handler::response::{MonitorStatus, ServiceStatus};
use crate::service::ServiceState;

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "lingo_server::handler::monitors";

/// Reports whether the record store is usable. Nothing is written to disk.
#[tracing::instrument(skip_all)]
async fn health_status(
    State(record_store): State<RecordStore>,
) -> (StatusCode, Json<MonitorStatus>) {
    let (status_code, status) = match record_store.check().await {
        Ok(()) => (StatusCode::OK, ServiceStatus::Healthy),
        Err(err) => {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %err,
                "record store is not usable"
            );
            (StatusCode::SERVICE_UNAVAILABLE, ServiceStatus::Degraded)
        }
    };

    tracing::debug!(
        target: TRACING_TARGET,
        status = %status,
        "health status checked"
    );

    (status_code, Json(MonitorStatus::new(status)))
}

/// Returns a [`Router`] with all health monitoring routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/health", get(health_status))
}

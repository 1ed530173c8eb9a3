//! Task submission handler.

use axum::Router;
use axum::extract::State;
use axum::routing::post;

use crate::extract::{Json, ValidateJson};
use crate::handler::Result;
use crate::handler::request::CreateTask;
use crate::pipeline::{Pipeline, TaskReceipt};
use crate::service::ServiceState;

/// Tracing target for task operations.
const TRACING_TARGET: &str = "lingo_server::handler::tasks";

/// Stores a task associated with an extraction record.
#[tracing::instrument(skip_all)]
async fn submit_task(
    State(pipeline): State<Pipeline>,
    ValidateJson(request): ValidateJson<CreateTask>,
) -> Result<Json<TaskReceipt>> {
    let receipt = pipeline.submit_task(request.into()).await?;

    tracing::info!(
        target: TRACING_TARGET,
        task_id = %receipt.task_id,
        has_warning = receipt.task.metadata.contains_key("warning"),
        "task submitted"
    );

    Ok(Json(receipt))
}

/// Returns a [`Router`] with the task route.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/task", post(submit_task))
}

//! Simplification handler.

use axum::Router;
use axum::extract::State;
use axum::routing::post;

use crate::extract::Json;
use crate::handler::Result;
use crate::handler::request::SimplifyRequest;
use crate::pipeline::{Pipeline, SimplifyOutcome};
use crate::service::ServiceState;

/// Tracing target for simplification operations.
const TRACING_TARGET: &str = "lingo_server::handler::simplify";

/// Simplifies the most recent extraction for a language and audience level.
#[tracing::instrument(skip_all, fields(language = %request.language, level = %request.level))]
async fn simplify(
    State(pipeline): State<Pipeline>,
    Json(request): Json<SimplifyRequest>,
) -> Result<Json<SimplifyOutcome>> {
    let outcome = pipeline.simplify(&request.into()).await?;

    tracing::info!(
        target: TRACING_TARGET,
        related_output_filename = %outcome.related_output_filename(),
        structured = matches!(outcome, SimplifyOutcome::Structured { .. }),
        "simplification completed"
    );

    Ok(Json(outcome))
}

/// Returns a [`Router`] with the simplification route.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/simplify", post(simplify))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use lingo_orq::MockConfig;
    use serde_json::json;

    use crate::handler::test::TestApp;

    #[tokio::test]
    async fn simplify_with_empty_store_is_not_found() -> anyhow::Result<()> {
        let app = TestApp::new(MockConfig::default())?;

        let response = app
            .server
            .post("/simplify")
            .json(&json!({"language": "English", "level": "Basic"}))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: serde_json::Value = response.json();
        assert_eq!(body["detail"], "No output files found to simplify");
        Ok(())
    }

    #[tokio::test]
    async fn simplify_latest_extraction() -> anyhow::Result<()> {
        let app = TestApp::new(MockConfig::default())?;
        let filename = app.seed_extraction("Acme").await?;

        let response = app
            .server
            .post("/simplify")
            .json(&json!({"language": "Dutch", "level": "Intermediate"}))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["related_output_filename"], filename);
        assert_eq!(body["metadata"]["employer"], "Acme");
        assert_eq!(body["content"]["Summary"], "This is a short text.");
        assert_eq!(
            body["task_classification"],
            json!({"Summary": false, "Daily_Tasks": true})
        );
        Ok(())
    }

    #[tokio::test]
    async fn simplify_rejects_unknown_level() -> anyhow::Result<()> {
        let app = TestApp::new(MockConfig::default())?;
        app.seed_extraction("Acme").await?;

        let response = app
            .server
            .post("/simplify")
            .json(&json!({"language": "English", "level": "Expert"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(
            body["detail"],
            "Invalid level: Expert. Must be one of: Basic, Intermediate, Fluent"
        );
        Ok(())
    }

    #[tokio::test]
    async fn simplify_rejects_malformed_body() -> anyhow::Result<()> {
        let app = TestApp::new(MockConfig::default())?;

        let response = app
            .server
            .post("/simplify")
            .json(&json!({"language": "English"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        Ok(())
    }
}

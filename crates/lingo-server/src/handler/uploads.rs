//! Document upload handler.

use axum::Router;
use axum::extract::State;
use axum::routing::post;

use crate::extract::{Json, Multipart};
use crate::handler::{ErrorKind, Result};
use crate::pipeline::{ExtractionRecord, Pipeline, Upload};
use crate::service::ServiceState;

/// Tracing target for upload operations.
const TRACING_TARGET: &str = "lingo_server::handler::uploads";

/// Multipart field carrying the document.
const FILE_FIELD: &str = "file";

/// Multipart field carrying the employer name.
const EMPLOYER_FIELD: &str = "employer";

/// Extracts a structured record from an uploaded text document.
///
/// Form data:
/// - `file`: the `.txt` document
/// - `employer`: employer the document belongs to
#[tracing::instrument(skip_all)]
async fn upload_document(
    State(pipeline): State<Pipeline>,
    mut multipart: Multipart,
) -> Result<Json<ExtractionRecord>> {
    let mut document = None;
    let mut employer = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(FILE_FIELD) => {
                let filename = field.file_name().unwrap_or_default().to_owned();
                let content = field.bytes().await?;
                document = Some((filename, content));
            }
            Some(EMPLOYER_FIELD) => {
                employer = Some(field.text().await?);
            }
            name => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    field = ?name,
                    "skipping unknown multipart field"
                );
            }
        }
    }

    let (filename, content) = document
        .ok_or_else(|| ErrorKind::BadRequest.with_message("Missing form field 'file'"))?;
    let employer = employer
        .ok_or_else(|| ErrorKind::BadRequest.with_message("Missing form field 'employer'"))?;

    tracing::info!(
        target: TRACING_TARGET,
        filename = %filename,
        employer = %employer,
        bytes = content.len(),
        "document uploaded"
    );

    let record = pipeline
        .upload(Upload {
            filename,
            employer,
            content: content.to_vec(),
        })
        .await?;

    Ok(Json(record))
}

/// Returns a [`Router`] with the upload route.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/upload", post(upload_document))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use axum_test::multipart::{MultipartForm, Part};
    use lingo_orq::{MockConfig, OrqConfig};
    use lingo_store::RecordStore;
    use tempfile::TempDir;

    use crate::handler::routes;
    use crate::handler::test::TestApp;
    use crate::service::{GuidelineResolver, ServiceState};

    fn form(filename: &str, content: &[u8]) -> MultipartForm {
        MultipartForm::new().add_text("employer", "Acme Corp").add_part(
            "file",
            Part::bytes(content.to_vec())
                .file_name(filename)
                .mime_type("text/plain"),
        )
    }

    #[tokio::test]
    async fn upload_stores_fenced_extraction() -> anyhow::Result<()> {
        let app = TestApp::new(MockConfig {
            extraction: Some("```json\n{\"summary\":\"x\"}\n```".into()),
            ..MockConfig::default()
        })?;

        let response = app
            .server
            .post("/upload")
            .multipart(form("doc.txt", b"Open the shop."))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["summary"], "x");
        assert_eq!(body["metadata"]["employer"], "Acme Corp");
        assert_eq!(body["metadata"]["filename"], "doc.txt");

        let stored = std::fs::read_dir(app.data_dir().join("output"))?.count();
        assert_eq!(stored, 1);
        Ok(())
    }

    #[tokio::test]
    async fn upload_rejects_non_txt() -> anyhow::Result<()> {
        let app = TestApp::new(MockConfig::default())?;

        let response = app
            .server
            .post("/upload")
            .multipart(form("doc.pdf", b"%PDF"))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["detail"], "Only .txt files are allowed");
        assert_eq!(app.provider.calls(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn upload_rejects_non_utf8() -> anyhow::Result<()> {
        let app = TestApp::new(MockConfig::default())?;

        let response = app
            .server
            .post("/upload")
            .multipart(form("doc.txt", &[0xff, 0xfe]))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn upload_requires_employer() -> anyhow::Result<()> {
        let app = TestApp::new(MockConfig::default())?;

        let form = MultipartForm::new().add_part(
            "file",
            Part::bytes(b"text".to_vec()).file_name("doc.txt"),
        );
        let response = app.server.post("/upload").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["detail"], "Missing form field 'employer'");
        Ok(())
    }

    #[tokio::test]
    async fn upload_surfaces_generation_failure() -> anyhow::Result<()> {
        let app = TestApp::new(MockConfig {
            unavailable: true,
            ..MockConfig::default()
        })?;

        let response = app
            .server
            .post("/upload")
            .multipart(form("doc.txt", b"Open the shop."))
            .await;

        response.assert_status_internal_server_error();
        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "internal_server_error");
        assert_eq!(
            body["detail"],
            "Failed to connect to Orq AI service (status 503): \
             mock provider configured as unavailable"
        );
        assert_eq!(std::fs::read_dir(app.data_dir().join("output"))?.count(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn upload_reports_unreachable_orq_cause() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let generation = OrqConfig::default()
            .with_api_key("sk-test")
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(5)
            .into_service()?;
        let state = ServiceState::new(
            generation,
            RecordStore::new(dir.path().join("data")),
            GuidelineResolver::new(dir.path().join("guidelines")),
        );
        let server = TestServer::new(routes().with_state(state))?;

        let response = server
            .post("/upload")
            .multipart(form("doc.txt", b"Open the shop."))
            .await;

        response.assert_status_internal_server_error();
        let body: serde_json::Value = response.json();
        let detail = body["detail"].as_str().unwrap_or_default();
        assert!(
            detail.starts_with("Failed to connect to Orq AI service (status 503): "),
            "{detail}"
        );
        assert!(detail.len() > "Failed to connect to Orq AI service (status 503): ".len());
        Ok(())
    }
}

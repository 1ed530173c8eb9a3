//! Upload flow: extract, merge metadata, persist.

use jiff::Zoned;
use lingo_orq::structured::extract_fenced;
use lingo_orq::{DeploymentKey, GenerationRequest};
use lingo_store::RecordKind;
use serde_json::{Map, Value, json};

use super::naming::{extraction_identity, upload_date};
use super::{Error, Pipeline, Result, TRACING_TARGET};

/// Persisted extraction: `metadata` plus the extracted fields.
pub type ExtractionRecord = Map<String, Value>;

/// File extension accepted for uploads.
const ACCEPTED_EXTENSION: &str = ".txt";

/// Reserved key holding submission metadata in an extraction record.
const METADATA_FIELD: &str = "metadata";

/// An uploaded document and its submission details.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Client-supplied file name.
    pub filename: String,
    /// Employer the document belongs to.
    pub employer: String,
    /// Raw document bytes; must be UTF-8 text.
    pub content: Vec<u8>,
}

impl Upload {
    fn validate(&self) -> Result<()> {
        if !self.filename.ends_with(ACCEPTED_EXTENSION) {
            return Err(Error::invalid_input("Only .txt files are allowed"));
        }

        if self.employer.trim().is_empty() {
            return Err(Error::invalid_input("Employer must not be empty"));
        }

        Ok(())
    }
}

impl Pipeline {
    /// Extracts a structured record from an uploaded document and stores it.
    ///
    /// Extraction output that is not valid JSON is stored under
    /// `raw_extraction`. Nothing is written when generation fails.
    ///
    /// The submitted `metadata` always wins: a `metadata` field produced by
    /// extraction is dropped rather than replacing it, unlike a plain
    /// `{metadata, ...extracted}` object spread where the extracted key
    /// would take over.
    pub async fn upload(&self, upload: Upload) -> Result<ExtractionRecord> {
        upload.validate()?;
        let Upload {
            filename,
            employer,
            content,
        } = upload;

        let content = String::from_utf8(content)
            .map_err(|_| Error::invalid_input("File content must be valid UTF-8 text"))?;
        let now = Zoned::now();

        let request =
            GenerationRequest::new(DeploymentKey::Extraction).with_input("content", content);
        let response = self.generation.invoke(&request).await?;

        let extracted = extract_fenced(&response.content);
        if !extracted.is_parsed() {
            tracing::warn!(
                target: TRACING_TARGET,
                employer = %employer,
                filename = %filename,
                "extraction output is not JSON, storing raw text"
            );
        }

        let mut record = ExtractionRecord::new();
        record.insert(
            METADATA_FIELD.to_owned(),
            json!({
                "employer": employer,
                "upload_date": upload_date(&now),
                "filename": filename,
            }),
        );

        for (key, value) in extracted.into_extraction_fields() {
            if key == METADATA_FIELD {
                tracing::warn!(
                    target: TRACING_TARGET,
                    "extraction produced a metadata field, keeping submission metadata"
                );
                continue;
            }
            record.insert(key, value);
        }

        let identity = extraction_identity(&now, &employer);
        let path = self
            .store
            .save(RecordKind::Extraction, &identity, &record)
            .await?;

        tracing::info!(
            target: TRACING_TARGET,
            employer = %employer,
            path = %path.display(),
            fields = record.len() - 1,
            "extraction stored"
        );

        Ok(record)
    }
}

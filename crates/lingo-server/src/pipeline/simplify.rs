//! Simplify flow: rewrite the latest extraction, then classify it.

use lingo_orq::structured::{Structured, extract_embedded, extract_fenced};
use lingo_orq::{DeploymentKey, GenerationRequest};
use lingo_store::RecordKind;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Error, Pipeline, Result, TRACING_TARGET};

/// Target language and audience level of a simplification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifyParams {
    /// Language the simplified text is written in.
    pub language: String,
    /// Audience level name, one of `Basic`, `Intermediate` or `Fluent`.
    pub level: String,
}

/// Result of a simplification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SimplifyOutcome {
    /// The simplification produced a JSON object and was classified.
    Structured {
        content: Map<String, Value>,
        task_classification: Map<String, Value>,
        metadata: Value,
        related_output_filename: String,
    },
    /// The simplification was not JSON; its raw text is returned as is.
    Unstructured {
        metadata: Value,
        simplified_content: String,
        related_output_filename: String,
    },
}

impl SimplifyOutcome {
    /// Returns the extraction record the outcome was derived from.
    pub fn related_output_filename(&self) -> &str {
        match self {
            Self::Structured {
                related_output_filename,
                ..
            }
            | Self::Unstructured {
                related_output_filename,
                ..
            } => related_output_filename,
        }
    }
}

impl Pipeline {
    /// Simplifies the most recent extraction record.
    ///
    /// The store is consulted before the level is validated, so an empty
    /// store reports [`Error::NothingToSimplify`] for any level.
    pub async fn simplify(&self, params: &SimplifyParams) -> Result<SimplifyOutcome> {
        let record = match self.store.find_latest(RecordKind::Extraction).await {
            Ok(record) => record,
            Err(err) if err.is_not_found() => return Err(Error::NothingToSimplify),
            Err(err) => return Err(err.into()),
        };

        let filename = record.filename;
        let Value::Object(mut fields) = record.value else {
            return Err(Error::MalformedRecord { filename });
        };

        let metadata = fields
            .shift_remove("metadata")
            .unwrap_or_else(|| Value::Object(Map::new()));
        let input = serde_json::to_string_pretty(&fields)?;

        let guidelines = self.guidelines.resolve(&params.level).await?;

        tracing::info!(
            target: TRACING_TARGET,
            filename = %filename,
            language = %params.language,
            level = %params.level,
            "simplifying extraction"
        );

        let request = GenerationRequest::new(DeploymentKey::Simplification)
            .with_input("language", params.language.as_str())
            .with_input("level", params.level.as_str())
            .with_input("guidelines", &*guidelines)
            .with_user_message(input);
        let response = self.generation.invoke(&request).await?;

        let content = match extract_embedded(&response.content) {
            Structured::Parsed(content) => content,
            Structured::Unparsed(raw) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    filename = %filename,
                    "simplification output is not JSON, skipping classification"
                );

                return Ok(SimplifyOutcome::Unstructured {
                    metadata,
                    simplified_content: raw,
                    related_output_filename: filename,
                });
            }
        };

        let task_classification = self.classify(&content).await?;

        Ok(SimplifyOutcome::Structured {
            content,
            task_classification,
            metadata,
            related_output_filename: filename,
        })
    }

    /// Labels each section of simplified content. Unparsable labels yield
    /// an empty mapping.
    async fn classify(&self, content: &Map<String, Value>) -> Result<Map<String, Value>> {
        let request = GenerationRequest::new(DeploymentKey::Classification)
            .with_user_message(serde_json::to_string_pretty(content)?);
        let response = self.generation.invoke(&request).await?;

        let classification = extract_fenced(&response.content);
        if !classification.is_parsed() {
            tracing::warn!(
                target: TRACING_TARGET,
                "failed to parse task classification, using an empty mapping"
            );
        }

        Ok(classification.into_classification())
    }
}

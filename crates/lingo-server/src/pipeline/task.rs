//! Task submission flow.

use std::path::PathBuf;

use jiff::Zoned;
use lingo_store::{Record, RecordKind};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{AsRefStr, Display};

use super::naming::{submitted_at, task_identity};
use super::{Error, Pipeline, Result, TRACING_TARGET};

/// A task submitted against an extraction record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSubmission {
    /// Name of the person or team submitting the task.
    pub name: String,
    /// Free-text task description.
    pub task: String,
    /// Employer overriding the one of the associated record.
    #[serde(default)]
    pub employer: Option<String>,
    /// Extraction record to associate; the most recent one when omitted.
    #[serde(default)]
    pub related_output_filename: Option<String>,
}

/// Processing status of a task record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TaskStatus {
    /// Accepted and stored. No worker picks tasks up.
    #[default]
    Queued,
}

/// Persisted task submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    pub submitted_at: String,
    pub name: String,
    pub task: String,
    pub related_output_filename: Option<String>,
    pub metadata: Map<String, Value>,
    pub status: TaskStatus,
}

/// Acknowledgement of a stored task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskReceipt {
    pub status: &'static str,
    pub task_id: String,
    pub task_path: PathBuf,
    pub task: TaskRecord,
}

/// Key of the association warning in task metadata.
const WARNING_FIELD: &str = "warning";

fn warning(message: String) -> Map<String, Value> {
    let mut metadata = Map::new();
    metadata.insert(WARNING_FIELD.to_owned(), Value::String(message));
    metadata
}

fn metadata_of(record: &Record) -> Map<String, Value> {
    record
        .value
        .get("metadata")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

impl TaskSubmission {
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_input("Task name must not be empty"));
        }

        if self.task.trim().is_empty() {
            return Err(Error::invalid_input("Task description must not be empty"));
        }

        Ok(())
    }
}

impl Pipeline {
    /// Stores a task associated with an extraction record.
    ///
    /// An association that cannot be resolved does not fail the submission;
    /// it is recorded as a `warning` in the task metadata instead.
    pub async fn submit_task(&self, submission: TaskSubmission) -> Result<TaskReceipt> {
        submission.validate()?;
        let now = Zoned::now();

        let (related_output_filename, mut metadata) =
            self.associate(non_blank(submission.related_output_filename)).await?;

        if let Some(employer) = non_blank(submission.employer) {
            metadata.insert("employer".to_owned(), Value::String(employer));
        }

        let record = TaskRecord {
            id: task_identity(&now, &submission.name),
            submitted_at: submitted_at(&now),
            name: submission.name,
            task: submission.task,
            related_output_filename,
            metadata,
            status: TaskStatus::Queued,
        };

        let task_path = self.store.save(RecordKind::Task, &record.id, &record).await?;

        tracing::info!(
            target: TRACING_TARGET,
            task_id = %record.id,
            related = ?record.related_output_filename,
            "task stored"
        );

        Ok(TaskReceipt {
            status: "success",
            task_id: record.id.clone(),
            task_path,
            task: record,
        })
    }

    async fn associate(
        &self,
        explicit: Option<String>,
    ) -> Result<(Option<String>, Map<String, Value>)> {
        let lookup = match &explicit {
            Some(filename) => {
                self.store
                    .find_by_name(RecordKind::Extraction, filename)
                    .await
            }
            None => self.store.find_latest(RecordKind::Extraction).await,
        };

        match (lookup, explicit) {
            (Ok(record), _) => {
                let metadata = metadata_of(&record);
                Ok((Some(record.filename), metadata))
            }
            (Err(err), Some(filename)) if err.is_not_found() => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    filename = %filename,
                    "related output file not found"
                );
                let message = format!("Related output file '{filename}' not found");
                Ok((Some(filename), warning(message)))
            }
            (Err(err), None) if err.is_not_found() => Ok((
                None,
                warning("No output files found to associate with this task".to_owned()),
            )),
            (Err(err), _) => Err(Error::from(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use lingo_orq::MockConfig;
    use serde_json::json;

    use super::*;
    use crate::pipeline::Upload;
    use crate::pipeline::fixture::Fixture;

    fn submission(name: &str, task: &str) -> TaskSubmission {
        TaskSubmission {
            name: name.into(),
            task: task.into(),
            ..TaskSubmission::default()
        }
    }

    async fn seed(fixture: &Fixture, employer: &str) -> anyhow::Result<String> {
        fixture
            .pipeline
            .upload(Upload {
                filename: "doc.txt".into(),
                employer: employer.into(),
                content: b"Open the shop.".to_vec(),
            })
            .await?;

        let latest = fixture
            .pipeline
            .store()
            .find_latest(RecordKind::Extraction)
            .await?;
        Ok(latest.filename)
    }

    #[tokio::test]
    async fn associates_latest_record() -> anyhow::Result<()> {
        let fixture = Fixture::new(MockConfig::default())?;
        let filename = seed(&fixture, "Acme").await?;

        let receipt = fixture
            .pipeline
            .submit_task(submission("Jan de Vries", "Restock shelves"))
            .await?;

        assert_eq!(receipt.status, "success");
        assert!(receipt.task_id.ends_with("_Jan_de_Vries"));
        assert_eq!(receipt.task.related_output_filename, Some(filename));
        assert_eq!(receipt.task.metadata["employer"], "Acme");
        assert_eq!(receipt.task.status, TaskStatus::Queued);

        let stored: TaskRecord = serde_json::from_slice(&std::fs::read(&receipt.task_path)?)?;
        assert_eq!(stored, receipt.task);
        Ok(())
    }

    #[tokio::test]
    async fn explicit_reference_is_resolved() -> anyhow::Result<()> {
        let fixture = Fixture::new(MockConfig::default())?;
        let filename = seed(&fixture, "Acme").await?;

        let receipt = fixture
            .pipeline
            .submit_task(TaskSubmission {
                related_output_filename: Some(filename.clone()),
                employer: Some("Globex".into()),
                ..submission("Ann", "Count stock")
            })
            .await?;

        assert_eq!(receipt.task.related_output_filename, Some(filename));
        assert_eq!(receipt.task.metadata["employer"], "Globex");
        assert_eq!(receipt.task.metadata["filename"], "doc.txt");
        Ok(())
    }

    #[tokio::test]
    async fn unresolvable_reference_records_warning() -> anyhow::Result<()> {
        let fixture = Fixture::new(MockConfig::default())?;
        seed(&fixture, "Acme").await?;

        let receipt = fixture
            .pipeline
            .submit_task(TaskSubmission {
                related_output_filename: Some("missing.json".into()),
                ..submission("Ann", "Count stock")
            })
            .await?;

        assert_eq!(
            receipt.task.metadata,
            warning("Related output file 'missing.json' not found".into())
        );
        assert_eq!(
            receipt.task.related_output_filename.as_deref(),
            Some("missing.json")
        );
        Ok(())
    }

    #[tokio::test]
    async fn empty_store_records_warning() -> anyhow::Result<()> {
        let fixture = Fixture::new(MockConfig::default())?;

        let receipt = fixture
            .pipeline
            .submit_task(TaskSubmission {
                employer: Some("Acme".into()),
                ..submission("Ann", "Count stock")
            })
            .await?;

        assert_eq!(receipt.task.related_output_filename, None);
        assert_eq!(
            serde_json::to_value(&receipt.task.metadata)?,
            json!({
                "warning": "No output files found to associate with this task",
                "employer": "Acme",
            })
        );
        Ok(())
    }

    #[tokio::test]
    async fn blank_fields_are_rejected() -> anyhow::Result<()> {
        let fixture = Fixture::new(MockConfig::default())?;

        for (name, task) in [(" ", "Count stock"), ("Ann", "\n\t")] {
            let error = fixture
                .pipeline
                .submit_task(submission(name, task))
                .await
                .unwrap_err();
            assert!(matches!(error, Error::InvalidInput(_)));
        }

        assert!(!fixture.dir.path().join("data/tasks").exists());
        Ok(())
    }
}

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validate_not_blank;
use crate::pipeline::TaskSubmission;

/// Request to submit a task.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTask {
    /// Name of the submitter.
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    /// Free-text task description.
    #[validate(custom(function = "validate_not_blank"))]
    pub task: String,
    /// Employer overriding the one of the associated extraction.
    #[serde(default)]
    pub employer: Option<String>,
    /// File name of the extraction the task refers to.
    #[serde(default)]
    pub related_output_filename: Option<String>,
}

impl From<CreateTask> for TaskSubmission {
    fn from(request: CreateTask) -> Self {
        Self {
            name: request.name,
            task: request.task,
            employer: request.employer,
            related_output_filename: request.related_output_filename,
        }
    }
}

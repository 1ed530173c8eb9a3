//! Symbolic deployment keys and their provider-side names.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Default deployment used for structured extraction.
pub const DEFAULT_EXTRACTION_DEPLOYMENT: &str = "instructions_extraction";

/// Default deployment used for audience-level simplification.
pub const DEFAULT_SIMPLIFICATION_DEPLOYMENT: &str = "instructions_user_simplify";

/// Default deployment used for section-level task classification.
pub const DEFAULT_CLASSIFICATION_DEPLOYMENT: &str = "instructions_classify";

/// Pipeline stage a generation request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumString, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DeploymentKey {
    /// Structured extraction of an uploaded document.
    Extraction,
    /// Simplification of an extraction for a target audience level.
    Simplification,
    /// Classification of simplified sections into task / non-task.
    Classification,
}

/// Mapping from [`DeploymentKey`] to the deployment names configured on the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployments {
    pub extraction: String,
    pub simplification: String,
    pub classification: String,
}

impl Deployments {
    /// Returns the provider-side name for the given key.
    pub fn name(&self, key: DeploymentKey) -> &str {
        match key {
            DeploymentKey::Extraction => &self.extraction,
            DeploymentKey::Simplification => &self.simplification,
            DeploymentKey::Classification => &self.classification,
        }
    }
}

impl Default for Deployments {
    fn default() -> Self {
        Self {
            extraction: DEFAULT_EXTRACTION_DEPLOYMENT.to_owned(),
            simplification: DEFAULT_SIMPLIFICATION_DEPLOYMENT.to_owned(),
            classification: DEFAULT_CLASSIFICATION_DEPLOYMENT.to_owned(),
        }
    }
}

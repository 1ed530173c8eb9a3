//! Document pipeline orchestration.
//!
//! The [`Pipeline`] sequences the generation stages of a document and
//! threads metadata and record associations between them:
//!
//! - [`Pipeline::upload`] extracts a structured record from a document and
//!   persists it.
//! - [`Pipeline::simplify`] rewrites the most recent extraction for an
//!   audience level and classifies its sections.
//! - [`Pipeline::submit_task`] stores a task associated with an extraction.

mod error;
mod naming;
mod simplify;
mod task;
mod upload;

use lingo_orq::GenerationService;
use lingo_store::RecordStore;

pub use self::error::{Error, Result};
pub use self::naming::sanitize_identity;
pub use self::simplify::{SimplifyOutcome, SimplifyParams};
pub use self::task::{TaskReceipt, TaskRecord, TaskStatus, TaskSubmission};
pub use self::upload::{ExtractionRecord, Upload};
use crate::service::GuidelineResolver;

/// Tracing target for pipeline operations.
pub const TRACING_TARGET: &str = "lingo_server::pipeline";

/// Orchestrates the extraction, simplification and classification stages.
///
/// Cheap to clone; every collaborator is reference counted.
#[derive(Debug, Clone)]
pub struct Pipeline {
    generation: GenerationService,
    store: RecordStore,
    guidelines: GuidelineResolver,
}

impl Pipeline {
    /// Creates a pipeline over the given services.
    pub fn new(
        generation: GenerationService,
        store: RecordStore,
        guidelines: GuidelineResolver,
    ) -> Self {
        Self {
            generation,
            store,
            guidelines,
        }
    }

    /// Returns the record store the pipeline persists into.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }
}

#[cfg(test)]
pub(crate) mod fixture {
    use lingo_orq::{MockConfig, MockProvider};
    use tempfile::TempDir;

    use super::*;

    /// A pipeline over a temporary data and guidelines directory.
    pub struct Fixture {
        pub dir: TempDir,
        pub provider: MockProvider,
        pub pipeline: Pipeline,
    }

    impl Fixture {
        pub fn new(config: MockConfig) -> anyhow::Result<Self> {
            let dir = TempDir::new()?;
            let guidelines = dir.path().join("guidelines");
            std::fs::create_dir(&guidelines)?;
            std::fs::write(guidelines.join("basic.md"), "Use short sentences.")?;
            std::fs::write(guidelines.join("intermediate.md"), "Explain jargon.")?;
            std::fs::write(guidelines.join("fluent.md"), "Keep nuance.")?;

            let provider = MockProvider::new(config);
            let pipeline = Pipeline::new(
                provider.clone().into_service(),
                RecordStore::new(dir.path().join("data")),
                GuidelineResolver::new(guidelines),
            );

            Ok(Self {
                dir,
                provider,
                pipeline,
            })
        }
    }
}

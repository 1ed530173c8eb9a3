//! Application state and dependency injection.

use lingo_orq::GenerationService;
use lingo_store::RecordStore;

use crate::pipeline::Pipeline;
use crate::service::{Error, GuidelineResolver, Result, ServiceConfig};

/// Tracing target for state initialization.
const TRACING_TARGET: &str = "lingo_server::service::state";

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    generation: GenerationService,
    record_store: RecordStore,
    guidelines: GuidelineResolver,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Prepares the record directories. Guidelines are loaded lazily and the
    /// generation service is not contacted until the first request.
    pub async fn from_config(
        config: &ServiceConfig,
        generation: GenerationService,
    ) -> Result<Self> {
        let record_store = RecordStore::new(&config.data_dir);
        record_store.ensure_ready().await.map_err(|err| {
            Error::file_system(format!(
                "cannot prepare data directory {}",
                config.data_dir.display()
            ))
            .with_source(err)
        })?;

        if !config.guidelines_dir.is_dir() {
            tracing::warn!(
                target: TRACING_TARGET,
                path = %config.guidelines_dir.display(),
                "guidelines directory does not exist, simplification will fail"
            );
        }

        tracing::info!(
            target: TRACING_TARGET,
            data_dir = %config.data_dir.display(),
            guidelines_dir = %config.guidelines_dir.display(),
            "service state initialized"
        );

        Ok(Self::new(
            generation,
            record_store,
            GuidelineResolver::new(&config.guidelines_dir),
        ))
    }

    /// Assembles state from already constructed services.
    pub fn new(
        generation: GenerationService,
        record_store: RecordStore,
        guidelines: GuidelineResolver,
    ) -> Self {
        Self {
            generation,
            record_store,
            guidelines,
        }
    }

    /// Returns the orchestrator over this state's services.
    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new(
            self.generation.clone(),
            self.record_store.clone(),
            self.guidelines.clone(),
        )
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(generation: GenerationService);
impl_di!(record_store: RecordStore);
impl_di!(guidelines: GuidelineResolver);

impl axum::extract::FromRef<ServiceState> for Pipeline {
    fn from_ref(state: &ServiceState) -> Self {
        state.pipeline()
    }
}

use std::path::PathBuf;

#[cfg(feature = "config")]
use clap::Args;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Default values for configuration options.
mod defaults {
    use std::path::PathBuf;

    /// Default root directory for persisted records.
    pub fn data_dir() -> PathBuf {
        "./data".into()
    }

    /// Default directory holding one guideline file per audience level.
    pub fn guidelines_dir() -> PathBuf {
        "./guidelines".into()
    }
}

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
#[builder(
    pattern = "owned",
    setter(into, strip_option, prefix = "with"),
    build_fn(validate = "Self::validate")
)]
pub struct ServiceConfig {
    /// Root directory for extraction and task records.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "DATA_DIR", default_value = "./data")
    )]
    #[builder(default = "defaults::data_dir()")]
    pub data_dir: PathBuf,

    /// Directory containing `basic.md`, `intermediate.md` and `fluent.md`.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "GUIDELINES_DIR", default_value = "./guidelines")
    )]
    #[builder(default = "defaults::guidelines_dir()")]
    pub guidelines_dir: PathBuf,
}

impl ServiceConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }
}

impl ServiceConfigBuilder {
    fn validate(builder: &ServiceConfigBuilder) -> Result<(), String> {
        if let Some(data_dir) = &builder.data_dir
            && data_dir.as_os_str().is_empty()
        {
            return Err("Data directory cannot be empty".to_string());
        }

        if let Some(guidelines_dir) = &builder.guidelines_dir
            && guidelines_dir.as_os_str().is_empty()
        {
            return Err("Guidelines directory cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: defaults::data_dir(),
            guidelines_dir: defaults::guidelines_dir(),
        }
    }
}

//! Audience-level guideline resolution.
//!
//! Guidelines are read from one markdown file per [`Level`] inside the
//! configured directory. Each level is loaded at most once per process;
//! concurrent first requests share a single read.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumCount, EnumString, VariantNames};
use tokio::sync::OnceCell;

/// Tracing target for guideline resolution.
const TRACING_TARGET: &str = "lingo_server::service::guidelines";

/// Audience proficiency level a simplification is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumCount, EnumString, VariantNames)]
pub enum Level {
    Basic,
    Intermediate,
    Fluent,
}

impl Level {
    /// Returns the guideline file name of this level.
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Basic => "basic.md",
            Self::Intermediate => "intermediate.md",
            Self::Fluent => "fluent.md",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Errors raised while resolving guidelines.
#[derive(Debug, thiserror::Error)]
pub enum GuidelineError {
    /// The level name is not one of the known levels.
    #[error("Invalid level: {0}. Must be one of: {levels}", levels = Level::VARIANTS.join(", "))]
    InvalidLevel(String),

    /// The guideline file of a level could not be read.
    #[error("Guidelines for level {level} are unavailable at {}: {source}", path.display())]
    Unavailable {
        level: Level,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The guideline file of a level is empty.
    #[error("Guidelines for level {level} are empty at {}", path.display())]
    Empty { level: Level, path: PathBuf },
}

struct Inner {
    dir: PathBuf,
    cells: [OnceCell<Arc<str>>; Level::COUNT],
}

/// Resolves level names to guideline texts, caching each level after its
/// first successful load.
///
/// Failed loads are not cached and are retried on the next request.
#[derive(Clone)]
pub struct GuidelineResolver {
    inner: Arc<Inner>,
}

impl fmt::Debug for GuidelineResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loaded: Vec<&str> = [Level::Basic, Level::Intermediate, Level::Fluent]
            .into_iter()
            .filter(|level| self.inner.cells[level.index()].initialized())
            .map(Level::file_name)
            .collect();

        f.debug_struct("GuidelineResolver")
            .field("dir", &self.inner.dir)
            .field("loaded", &loaded)
            .finish()
    }
}

impl GuidelineResolver {
    /// Creates a resolver reading from `dir`. Nothing is read until first use.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(Inner {
                dir: dir.into(),
                cells: Default::default(),
            }),
        }
    }

    /// Returns the guideline directory.
    pub fn dir(&self) -> &Path {
        &self.inner.dir
    }

    /// Resolves a case-sensitive level name into its guideline text.
    pub async fn resolve(&self, level: &str) -> Result<Arc<str>, GuidelineError> {
        let level = Level::from_str(level)
            .map_err(|_| GuidelineError::InvalidLevel(level.to_owned()))?;
        self.load(level).await
    }

    /// Returns the guideline text of `level`, reading the file on first use.
    pub async fn load(&self, level: Level) -> Result<Arc<str>, GuidelineError> {
        let cell = &self.inner.cells[level.index()];
        let text = cell
            .get_or_try_init(|| self.read(level))
            .await?;

        Ok(Arc::clone(text))
    }

    async fn read(&self, level: Level) -> Result<Arc<str>, GuidelineError> {
        let path = self.inner.dir.join(level.file_name());
        let text = tokio::fs::read_to_string(&path).await.map_err(|source| {
            GuidelineError::Unavailable {
                level,
                path: path.clone(),
                source,
            }
        })?;

        if text.trim().is_empty() {
            return Err(GuidelineError::Empty { level, path });
        }

        tracing::info!(
            target: TRACING_TARGET,
            level = %level,
            path = %path.display(),
            bytes = text.len(),
            "guidelines loaded"
        );

        Ok(Arc::from(text))
    }
}

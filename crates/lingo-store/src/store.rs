//! Filesystem-backed record store.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use serde::Serialize;
use strum::IntoEnumIterator;
use tokio::fs;

use crate::{Error, RECORD_EXTENSION, Record, RecordKind, Result, TRACING_TARGET};

/// Filename-addressed JSON record store rooted at a data directory.
///
/// The store holds no locks and no in-memory state besides its root path.
/// Every lookup is a point-in-time scan of the filesystem.
#[derive(Debug, Clone)]
pub struct RecordStore {
    root: Arc<PathBuf>,
}

impl RecordStore {
    /// Creates a store rooted at `root`. Nothing is touched on disk.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::new(root.into()),
        }
    }

    /// Returns the data root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the directory holding records of `kind`.
    pub fn kind_dir(&self, kind: RecordKind) -> PathBuf {
        self.root.join(kind.directory())
    }

    /// Returns the path a record named `filename` of `kind` lives at.
    pub fn record_path(&self, kind: RecordKind, filename: &str) -> PathBuf {
        self.kind_dir(kind).join(filename)
    }

    /// Creates the directories of every record kind.
    pub async fn ensure_ready(&self) -> Result<()> {
        for kind in RecordKind::iter() {
            let dir = self.kind_dir(kind);
            fs::create_dir_all(&dir)
                .await
                .map_err(|err| Error::io(&dir, err))?;
        }

        Ok(())
    }

    /// Checks that the store is usable without writing anything.
    ///
    /// The data root must be a directory. A kind directory may be missing,
    /// since [`save`] creates it, but must be a directory when present.
    ///
    /// [`save`]: Self::save
    pub async fn check(&self) -> Result<()> {
        expect_directory(&self.root).await?;

        for kind in RecordKind::iter() {
            let dir = self.kind_dir(kind);
            match expect_directory(&dir).await {
                Err(Error::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {}
                result => result?,
            }
        }

        Ok(())
    }

    /// Persists `payload` as `{identity}.json` and returns its path.
    ///
    /// The kind directory is created when missing. An existing record with
    /// the same identity is overwritten.
    pub async fn save<T>(&self, kind: RecordKind, identity: &str, payload: &T) -> Result<PathBuf>
    where
        T: Serialize + ?Sized,
    {
        if !is_plain_name(identity) {
            return Err(Error::InvalidName(identity.to_owned()));
        }

        let dir = self.kind_dir(kind);
        fs::create_dir_all(&dir)
            .await
            .map_err(|err| Error::io(&dir, err))?;

        let path = dir.join(format!("{identity}.{RECORD_EXTENSION}"));
        let bytes = serde_json::to_vec_pretty(payload)?;

        if fs::try_exists(&path).await.unwrap_or(false) {
            tracing::warn!(
                target: TRACING_TARGET,
                kind = %kind,
                path = %path.display(),
                "overwriting existing record"
            );
        }

        fs::write(&path, &bytes)
            .await
            .map_err(|err| Error::io(&path, err))?;

        tracing::debug!(
            target: TRACING_TARGET,
            kind = %kind,
            path = %path.display(),
            bytes = bytes.len(),
            "record saved"
        );

        Ok(path)
    }

    /// Returns the record of `kind` with the greatest creation time.
    ///
    /// Platforms without creation times fall back to modification times.
    /// Equal times resolve to the greatest file name.
    pub async fn find_latest(&self, kind: RecordKind) -> Result<Record> {
        let dir = self.kind_dir(kind);
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(Error::Empty { kind });
            }
            Err(err) => return Err(Error::io(&dir, err)),
        };

        let mut candidates = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|err| Error::io(&dir, err))?
        {
            let path = entry.path();
            if !has_record_extension(&path) {
                continue;
            }

            let Some(filename) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };

            // A record can disappear between listing and stat.
            let metadata = match entry.metadata().await {
                Ok(metadata) if metadata.is_file() => metadata,
                Ok(_) => continue,
                Err(err) => {
                    tracing::debug!(
                        target: TRACING_TARGET,
                        path = %path.display(),
                        error = %err,
                        "skipping unreadable entry"
                    );
                    continue;
                }
            };

            let created = metadata
                .created()
                .or_else(|_| metadata.modified())
                .map_err(|err| Error::io(&path, err))?;

            candidates.push((created, filename));
        }

        let filename = select_latest(candidates).ok_or(Error::Empty { kind })?;

        tracing::debug!(
            target: TRACING_TARGET,
            kind = %kind,
            filename = %filename,
            "resolved latest record"
        );

        self.read(kind, filename).await
    }

    /// Returns the record of `kind` named exactly `filename`.
    ///
    /// Names that are not plain file names are reported as not found.
    pub async fn find_by_name(&self, kind: RecordKind, filename: &str) -> Result<Record> {
        if !is_plain_name(filename) {
            return Err(Error::NotFound {
                kind,
                name: filename.to_owned(),
            });
        }

        self.read(kind, filename.to_owned()).await
    }

    async fn read(&self, kind: RecordKind, filename: String) -> Result<Record> {
        let path = self.record_path(kind, &filename);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(Error::NotFound {
                    kind,
                    name: filename,
                });
            }
            Err(err) => return Err(Error::io(&path, err)),
        };

        let value = serde_json::from_slice(&bytes).map_err(|source| Error::Malformed {
            path: path.clone(),
            source,
        })?;

        Ok(Record {
            filename,
            path,
            value,
        })
    }
}

/// Picks the greatest `(time, name)` pair.
fn select_latest(candidates: Vec<(SystemTime, String)>) -> Option<String> {
    candidates.into_iter().max().map(|(_, filename)| filename)
}

fn has_record_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == RECORD_EXTENSION)
}

async fn expect_directory(path: &Path) -> Result<()> {
    let metadata = fs::metadata(path)
        .await
        .map_err(|err| Error::io(path, err))?;

    if metadata.is_dir() {
        Ok(())
    } else {
        Err(Error::io(path, io::Error::other("not a directory")))
    }
}

/// Returns `true` for a single, non-special path component.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && !name.contains("..")
        && !name.contains(['/', '\\', '\0'])
}

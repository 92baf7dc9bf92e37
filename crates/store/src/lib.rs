#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! On-disk artifact cache for relget
//!
//! The cache root holds one directory per resolved version:
//!
//! ```text
//! <root>/
//!   20.14.0/
//!     SHASUMS256.txt
//!     node-v20.14.0-linux-x64.tar.gz
//!     node-v20.14.0.tar.gz
//! ```
//!
//! Directories are created on first request and trusted afterwards. Nothing
//! locks the cache across processes.

use relget_errors::{Error, StorageError};
use relget_events::{AppEvent, CacheEvent, EventEmitter, EventSender};
use relget_resources::{MemoCell, MemoTable};
use relget_types::Version;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Per-version cache directories under one root
#[derive(Debug)]
pub struct ArtifactCache {
    root: PathBuf,
    root_ready: MemoCell<PathBuf>,
    versions: MemoTable<Version, PathBuf>,
    events: Option<EventSender>,
}

impl ArtifactCache {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, events: Option<EventSender>) -> Self {
        Self {
            root: root.into(),
            root_ready: MemoCell::new(),
            versions: MemoTable::new(),
            events,
        }
    }

    /// Root path, without touching the filesystem
    #[must_use]
    pub fn root_path(&self) -> &Path {
        &self.root
    }

    /// Path of the directory for `version`, without touching the filesystem
    #[must_use]
    pub fn version_path(&self, version: &Version) -> PathBuf {
        self.root.join(version.to_string())
    }

    /// The cache root, created on first use
    ///
    /// # Errors
    ///
    /// Returns `StorageError::CreateDirFailed` if the directory cannot be created.
    pub async fn root(&self) -> Result<PathBuf, Error> {
        let path = self.root.clone();
        let events = self.events.clone();
        self.root_ready
            .get_or_init(move || async move {
                ensure_dir(&path).await?;
                events.emit(AppEvent::Cache(CacheEvent::DirectoryEnsured { path: path.clone() }));
                Ok(path)
            })
            .await
    }

    /// The directory for `version`, created on first use
    ///
    /// Concurrent callers for the same version share one creation attempt.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::CreateDirFailed` if either the root or the
    /// version directory cannot be created.
    pub async fn directory_for(&self, version: &Version) -> Result<PathBuf, Error> {
        let root = self.root().await?;
        let path = root.join(version.to_string());
        let events = self.events.clone();

        self.versions
            .get_or_init(version.clone(), move || async move {
                ensure_dir(&path).await?;
                events.emit(AppEvent::Cache(CacheEvent::DirectoryEnsured { path: path.clone() }));
                Ok(path)
            })
            .await
    }

    /// Number of version directories provisioned by this cache
    #[must_use]
    pub fn provisioned(&self) -> usize {
        self.versions.launched()
    }
}

/// Create `path` and its parents, treating an existing directory as success
///
/// # Errors
///
/// Returns `StorageError::CreateDirFailed` for any failure other than the
/// directory already existing.
pub async fn ensure_dir(path: &Path) -> Result<(), Error> {
    match fs::create_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && is_dir(path).await => Ok(()),
        Err(e) => Err(StorageError::CreateDirFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        }
        .into()),
    }
}

/// Whether a regular file exists at `path`
pub async fn file_exists(path: &Path) -> bool {
    fs::metadata(path).await.is_ok_and(|m| m.is_file())
}

async fn is_dir(path: &Path) -> bool {
    fs::metadata(path).await.is_ok_and(|m| m.is_dir())
}

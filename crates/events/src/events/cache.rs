use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// On-disk cache events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CacheEvent {
    /// A cache directory was created or found to exist
    DirectoryEnsured { path: PathBuf },

    /// A requested file was already present in the cache
    Hit { path: PathBuf },

    /// A requested file must be fetched
    Miss { path: PathBuf },
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::FailureContext;

/// Download-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DownloadEvent {
    /// Response received, body streaming to disk
    Started {
        url: String,
        dest: PathBuf,
        total_bytes: Option<u64>,
    },

    /// Body fully written to disk
    Completed {
        url: String,
        dest: PathBuf,
        bytes_downloaded: u64,
    },

    /// Transfer aborted; any partial file is left in place
    Failed {
        url: String,
        dest: PathBuf,
        failure: FailureContext,
    },
}

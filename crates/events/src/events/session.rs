use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::FailureContext;

/// Install session lifecycle events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// Session graph started
    Started {
        selector: String,
        platform: String,
        target: PathBuf,
    },

    /// The release index does not list a build for the target platform
    PlatformNotListed { version: String, key: String },

    /// All artifacts verified and handed to the installer
    Completed {
        version: String,
        artifacts: Vec<PathBuf>,
    },

    /// First failure in the dependency graph
    Failed {
        stage: String,
        failure: FailureContext,
    },
}

use serde::{Deserialize, Serialize};

/// Release index and version resolution events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ResolverEvent {
    /// Release index request issued
    IndexFetchStarted { url: String },

    /// Release index parsed
    IndexFetched {
        url: String,
        releases: usize,
        skipped: usize,
    },

    /// Selector resolved to a concrete release
    VersionResolved {
        selector: String,
        version: String,
        candidates: usize,
    },
}

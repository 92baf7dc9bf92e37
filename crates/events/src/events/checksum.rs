use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Checksum manifest events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChecksumEvent {
    /// Manifest parsed from the cache or a fresh download
    ManifestLoaded {
        version: String,
        path: PathBuf,
        entries: usize,
        skipped_lines: usize,
        from_cache: bool,
    },

    /// Digest verification of a local file started
    VerificationStarted { path: PathBuf, expected: String },

    /// Local file matched its recorded digest
    VerificationPassed { path: PathBuf, digest: String },

    /// Local file did not match its recorded digest
    VerificationFailed {
        path: PathBuf,
        expected: String,
        actual: String,
    },
}

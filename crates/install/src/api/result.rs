use relget_types::Version;
use std::path::PathBuf;

/// A local file whose digest matched the release manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedArtifact {
    pub path: PathBuf,
    pub expected_digest: String,
}

/// Outcome of a successful session, handed to the installation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationResult {
    /// Version the selector resolved to
    pub version: Version,
    /// Where the external installer should place the release
    pub target: PathBuf,
    /// Verified platform installer archive
    pub installer: CachedArtifact,
    /// Verified source archive
    pub source: CachedArtifact,
}

impl InstallationResult {
    /// Paths of every verified artifact, installer first
    #[must_use]
    pub fn artifact_paths(&self) -> Vec<PathBuf> {
        vec![self.installer.path.clone(), self.source.path.clone()]
    }
}

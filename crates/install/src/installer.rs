//! Hand-off to the installation step

use crate::InstallationResult;
use async_trait::async_trait;
use relget_errors::Error;
use tokio::sync::Mutex;

/// Consumer of verified artifacts (extraction, linking, registration)
#[async_trait]
pub trait ArtifactInstaller: Send + Sync {
    /// Install the verified artifacts described by `result`
    ///
    /// # Errors
    ///
    /// Implementations report their own failures; the session surfaces them
    /// as the session's result.
    async fn install(&self, result: &InstallationResult) -> Result<(), Error>;
}

/// Installer that only remembers what it was handed
///
/// Used for dry runs and in tests.
#[derive(Debug, Default)]
pub struct RecordingInstaller {
    received: Mutex<Vec<InstallationResult>>,
}

impl RecordingInstaller {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent hand-off
    pub async fn last(&self) -> Option<InstallationResult> {
        self.received.lock().await.last().cloned()
    }

    /// Number of hand-offs so far
    pub async fn count(&self) -> usize {
        self.received.lock().await.len()
    }
}

#[async_trait]
impl ArtifactInstaller for RecordingInstaller {
    async fn install(&self, result: &InstallationResult) -> Result<(), Error> {
        self.received.lock().await.push(result.clone());
        Ok(())
    }
}

//! Ensure a release file is cached locally and matches its manifest digest

use crate::CachedArtifact;
use relget_errors::{Error, VerificationError};
use relget_events::{AppEvent, CacheEvent, ChecksumEvent, EventEmitter, EventSender};
use relget_hash::Hash;
use relget_manifest::ChecksumStore;
use relget_net::{download_to_path, NetClient};
use relget_resources::MemoTable;
use relget_store::{file_exists, ArtifactCache};
use relget_types::Version;
use std::path::Path;
use std::sync::Arc;

/// Downloads on cache miss and verifies every time a file is first requested
///
/// A file is verified at most once per downloader; later requests for the
/// same `(version, file name)` reuse that outcome.
#[derive(Debug)]
pub struct VerifiedDownloader {
    client: NetClient,
    cache: Arc<ArtifactCache>,
    checksums: Arc<ChecksumStore>,
    events: Option<EventSender>,
    verified: MemoTable<(Version, String), CachedArtifact>,
}

impl VerifiedDownloader {
    #[must_use]
    pub fn new(
        client: NetClient,
        cache: Arc<ArtifactCache>,
        checksums: Arc<ChecksumStore>,
        events: Option<EventSender>,
    ) -> Self {
        Self {
            client,
            cache,
            checksums,
            events,
            verified: MemoTable::new(),
        }
    }

    /// Ensure `file_name` from `url` is in the cache for `version` and matches
    /// the version's manifest
    ///
    /// The manifest lookup happens before any download, so an artifact the
    /// release does not list is never fetched. A file already present in the
    /// cache is not downloaded again but is always hashed.
    ///
    /// # Errors
    ///
    /// - `VerificationError::MissingChecksum` if the manifest has no entry
    /// - `VerificationError::ChecksumMismatch` if the local bytes differ
    /// - network or storage errors from the manifest, the cache or the download
    pub async fn ensure(
        &self,
        url: &str,
        file_name: &str,
        version: &Version,
    ) -> Result<CachedArtifact, Error> {
        let client = self.client.clone();
        let cache = Arc::clone(&self.cache);
        let checksums = Arc::clone(&self.checksums);
        let events = self.events.clone();
        let url = url.to_string();
        let file = file_name.to_string();
        let version = version.clone();

        self.verified
            .get_or_init((version.clone(), file.clone()), move || async move {
                let manifest = checksums.manifest_for(&version).await?;
                let expected = manifest
                    .get(&file)
                    .ok_or_else(|| VerificationError::MissingChecksum {
                        file: file.clone(),
                        version: version.to_string(),
                    })?
                    .to_string();

                let dir = cache.directory_for(&version).await?;
                let path = dir.join(&file);

                if file_exists(&path).await {
                    events.emit(AppEvent::Cache(CacheEvent::Hit { path: path.clone() }));
                } else {
                    events.emit(AppEvent::Cache(CacheEvent::Miss { path: path.clone() }));
                    download_to_path(&client, &url, &path, &events).await?;
                }

                verify(&path, &expected, &events).await?;

                Ok(CachedArtifact {
                    path,
                    expected_digest: expected,
                })
            })
            .await
    }

    /// Number of distinct files this downloader has started to ensure
    #[must_use]
    pub fn ensured(&self) -> usize {
        self.verified.launched()
    }
}

async fn verify<E>(path: &Path, expected: &str, events: &E) -> Result<(), Error>
where
    E: EventEmitter + ?Sized,
{
    events.emit(AppEvent::Checksum(ChecksumEvent::VerificationStarted {
        path: path.to_path_buf(),
        expected: expected.to_string(),
    }));

    let actual = Hash::hash_file(path).await?;

    if actual.matches_hex(expected) {
        events.emit(AppEvent::Checksum(ChecksumEvent::VerificationPassed {
            path: path.to_path_buf(),
            digest: actual.to_hex(),
        }));
        Ok(())
    } else {
        events.emit(AppEvent::Checksum(ChecksumEvent::VerificationFailed {
            path: path.to_path_buf(),
            expected: expected.to_string(),
            actual: actual.to_hex(),
        }));
        Err(VerificationError::ChecksumMismatch {
            path: path.display().to_string(),
            expected: expected.to_string(),
            actual: actual.to_hex(),
        }
        .into())
    }
}

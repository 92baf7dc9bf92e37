//! Cached, memoized access to per-version manifests

use crate::ChecksumManifest;
use relget_errors::Error;
use relget_events::{AppEvent, CacheEvent, ChecksumEvent, EventEmitter, EventSender};
use relget_net::{download_to_path, NetClient};
use relget_repository::NamingPolicy;
use relget_resources::MemoTable;
use relget_store::{file_exists, ArtifactCache};
use relget_types::Version;
use std::sync::Arc;

/// Loads each version's checksum manifest at most once
#[derive(Debug)]
pub struct ChecksumStore {
    client: NetClient,
    naming: NamingPolicy,
    cache: Arc<ArtifactCache>,
    events: Option<EventSender>,
    manifests: MemoTable<Version, Arc<ChecksumManifest>>,
}

impl ChecksumStore {
    #[must_use]
    pub fn new(
        client: NetClient,
        naming: NamingPolicy,
        cache: Arc<ArtifactCache>,
        events: Option<EventSender>,
    ) -> Self {
        Self {
            client,
            naming,
            cache,
            events,
            manifests: MemoTable::new(),
        }
    }

    /// Manifest for `version`, from the cache directory if present,
    /// otherwise downloaded there first
    ///
    /// # Errors
    ///
    /// Returns a storage error if the cache directory or manifest file cannot
    /// be created or read, and a network error if the download fails.
    pub async fn manifest_for(&self, version: &Version) -> Result<Arc<ChecksumManifest>, Error> {
        let client = self.client.clone();
        let naming = self.naming.clone();
        let cache = Arc::clone(&self.cache);
        let events = self.events.clone();
        let version_key = version.clone();
        let version = version.clone();

        self.manifests
            .get_or_init(version_key, move || async move {
                let dir = cache.directory_for(&version).await?;
                let path = dir.join(naming.checksum_file_name());

                let from_cache = file_exists(&path).await;
                if from_cache {
                    events.emit(AppEvent::Cache(CacheEvent::Hit { path: path.clone() }));
                } else {
                    events.emit(AppEvent::Cache(CacheEvent::Miss { path: path.clone() }));
                    let url = naming.checksum_url(&version);
                    download_to_path(&client, &url, &path, &events).await?;
                }

                let manifest = ChecksumManifest::from_file(&path).await?;
                events.emit(AppEvent::Checksum(ChecksumEvent::ManifestLoaded {
                    version: version.to_string(),
                    path,
                    entries: manifest.len(),
                    skipped_lines: manifest.skipped_lines(),
                    from_cache,
                }));

                Ok(Arc::new(manifest))
            })
            .await
    }

    /// Number of manifest loads started
    #[must_use]
    pub fn load_count(&self) -> usize {
        self.manifests.launched()
    }
}

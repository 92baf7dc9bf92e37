//! Top-level install session

use crate::{
    ArtifactInstaller, CachedArtifact, InstallationResult, SessionConfig, VerifiedDownloader,
};
use relget_errors::{Error, NetworkError};
use relget_events::{AppEvent, EventEmitter, EventSender, FailureContext, SessionEvent};
use relget_manifest::ChecksumStore;
use relget_net::NetClient;
use relget_repository::NamingPolicy;
use relget_resolver::VersionResolver;
use relget_store::ArtifactCache;
use relget_types::{PlatformConfig, Version, VersionSelector};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// One resolve, download, verify and hand-off run
///
/// All intermediate results are memoized for the lifetime of the session, so
/// calling [`InstallSession::install`] twice resolves and verifies once.
pub struct InstallSession {
    target: PathBuf,
    platform: PlatformConfig,
    naming: NamingPolicy,
    resolver: VersionResolver,
    cache: Arc<ArtifactCache>,
    checksums: Arc<ChecksumStore>,
    downloader: VerifiedDownloader,
    installer: Arc<dyn ArtifactInstaller>,
    events: Option<EventSender>,
}

impl InstallSession {
    /// Build a session for `selector`
    ///
    /// # Errors
    ///
    /// Returns `VersionError::InvalidSelector` if the selector does not parse,
    /// or a network error if the HTTP client cannot be built.
    pub fn new(
        selector: &str,
        target: impl Into<PathBuf>,
        config: SessionConfig,
        installer: Arc<dyn ArtifactInstaller>,
        events: Option<EventSender>,
    ) -> Result<Self, Error> {
        let selector = VersionSelector::parse(selector)?;
        let client = NetClient::new(config.net)?;
        let naming = config.naming;

        let cache = Arc::new(ArtifactCache::new(config.cache_root, events.clone()));
        let checksums = Arc::new(ChecksumStore::new(
            client.clone(),
            naming.clone(),
            Arc::clone(&cache),
            events.clone(),
        ));
        let resolver = VersionResolver::new(
            client.clone(),
            naming.index_url(),
            selector,
            events.clone(),
        );
        let downloader = VerifiedDownloader::new(
            client,
            Arc::clone(&cache),
            Arc::clone(&checksums),
            events.clone(),
        );

        Ok(Self {
            target: target.into(),
            platform: config.platform,
            naming,
            resolver,
            cache,
            checksums,
            downloader,
            installer,
            events,
        })
    }

    /// Resolve, fetch and verify both artifacts, then hand them off
    ///
    /// The installer and source branches run concurrently once the version
    /// is known. Nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns the first failure in the pipeline.
    pub async fn install(&self) -> Result<InstallationResult, Error> {
        self.events.emit(AppEvent::Session(SessionEvent::Started {
            selector: self.resolver.selector().as_str().to_string(),
            platform: self.platform.to_string(),
            target: self.target.clone(),
        }));

        let result = self.run().await;

        match &result {
            Ok(done) => self.events.emit(AppEvent::Session(SessionEvent::Completed {
                version: done.version.to_string(),
                artifacts: done.artifact_paths(),
            })),
            Err(e) => self.emit_failed(e),
        }

        result
    }

    /// [`InstallSession::install`] bounded by `deadline`
    ///
    /// Work still pending at the deadline is dropped. Files already written
    /// stay in the cache.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::DeadlineExceeded` if the deadline passes, or
    /// the first pipeline failure otherwise.
    pub async fn install_with_deadline(
        &self,
        deadline: Duration,
    ) -> Result<InstallationResult, Error> {
        if let Ok(result) = tokio::time::timeout(deadline, self.install()).await {
            result
        } else {
            let err: Error = NetworkError::DeadlineExceeded {
                seconds: deadline.as_secs(),
            }
            .into();
            self.emit_failed(&err);
            Err(err)
        }
    }

    async fn run(&self) -> Result<InstallationResult, Error> {
        let release = self.resolver.resolved_release().await?;
        let version = release.version.clone();

        let key = NamingPolicy::index_files_key(&self.platform);
        if !release.publishes(&key) {
            self.events.emit(AppEvent::Session(SessionEvent::PlatformNotListed {
                version: version.to_string(),
                key,
            }));
        }

        let (installer, source) =
            futures::try_join!(self.ensure_installer(&version), self.ensure_source(&version))?;

        let result = InstallationResult {
            version,
            target: self.target.clone(),
            installer,
            source,
        };

        self.installer.install(&result).await?;
        Ok(result)
    }

    async fn ensure_installer(&self, version: &Version) -> Result<CachedArtifact, Error> {
        let file_name = self.naming.installer_file_name(version, &self.platform);
        let url = self.naming.installer_url(version, &file_name);
        self.downloader.ensure(&url, &file_name, version).await
    }

    async fn ensure_source(&self, version: &Version) -> Result<CachedArtifact, Error> {
        let file_name = self.naming.src_file_name(version);
        let url = self.naming.src_url(version, &file_name);
        self.downloader.ensure(&url, &file_name, version).await
    }

    fn emit_failed(&self, error: &Error) {
        self.events.emit(AppEvent::Session(SessionEvent::Failed {
            stage: error.stage().to_string(),
            failure: FailureContext::from_error(error),
        }));
    }

    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target
    }

    #[must_use]
    pub fn platform(&self) -> &PlatformConfig {
        &self.platform
    }

    #[must_use]
    pub fn resolver(&self) -> &VersionResolver {
        &self.resolver
    }

    #[must_use]
    pub fn cache(&self) -> &ArtifactCache {
        &self.cache
    }

    #[must_use]
    pub fn checksums(&self) -> &ChecksumStore {
        &self.checksums
    }

    #[must_use]
    pub fn downloader(&self) -> &VerifiedDownloader {
        &self.downloader
    }
}

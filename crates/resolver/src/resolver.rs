//! Memoized resolver bound to one selector and one index URL

use crate::resolve_in_index;
use relget_errors::Error;
use relget_events::{AppEvent, EventEmitter, EventSender, ResolverEvent};
use relget_index::{fetch_release_index, Release};
use relget_net::NetClient;
use relget_resources::MemoCell;
use relget_types::{Version, VersionSelector};

/// Resolves a selector against the remote release index, at most once
///
/// Concurrent callers of [`VersionResolver::resolve`] share the single
/// in-flight index fetch.
#[derive(Debug)]
pub struct VersionResolver {
    client: NetClient,
    index_url: String,
    selector: VersionSelector,
    events: Option<EventSender>,
    resolved: MemoCell<Release>,
}

impl VersionResolver {
    #[must_use]
    pub fn new(
        client: NetClient,
        index_url: impl Into<String>,
        selector: VersionSelector,
        events: Option<EventSender>,
    ) -> Self {
        Self {
            client,
            index_url: index_url.into(),
            selector,
            events,
            resolved: MemoCell::new(),
        }
    }

    #[must_use]
    pub fn selector(&self) -> &VersionSelector {
        &self.selector
    }

    #[must_use]
    pub fn index_url(&self) -> &str {
        &self.index_url
    }

    /// The resolved version
    ///
    /// # Errors
    ///
    /// Returns a network or format error if the index cannot be fetched, or
    /// `VersionError::NoSatisfyingVersion` if nothing matches.
    pub async fn resolve(&self) -> Result<Version, Error> {
        self.resolved_release().await.map(|release| release.version)
    }

    /// The full index entry of the resolved release
    ///
    /// # Errors
    ///
    /// Same as [`VersionResolver::resolve`].
    pub async fn resolved_release(&self) -> Result<Release, Error> {
        let client = self.client.clone();
        let url = self.index_url.clone();
        let selector = self.selector.clone();
        let events = self.events.clone();

        self.resolved
            .get_or_init(move || async move {
                let index = fetch_release_index(&client, &url, &events).await?;
                let release = resolve_in_index(&selector, &index)?;

                events.emit(AppEvent::Resolver(ResolverEvent::VersionResolved {
                    selector: selector.as_str().to_string(),
                    version: release.version.to_string(),
                    candidates: index.len(),
                }));

                Ok(release)
            })
            .await
    }

    /// Number of index fetches started by this resolver
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.resolved.launched()
    }
}

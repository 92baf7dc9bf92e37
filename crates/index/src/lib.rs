#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Release index for relget
//!
//! The release index is a JSON array published by the mirror listing every
//! available release. It is fetched once per session and never mutated.

mod models;

pub use models::{LtsTag, Release, ReleaseEntry, ReleaseIndex};

use relget_errors::Error;
use relget_events::{AppEvent, EventEmitter, ResolverEvent};
use relget_net::NetClient;

/// Fetch and parse the release index at `url`
///
/// # Errors
///
/// Returns a network error if the request fails or the status is not 200,
/// and a format error if the response is not JSON or not a list of releases.
pub async fn fetch_release_index<E>(
    client: &NetClient,
    url: &str,
    events: &E,
) -> Result<ReleaseIndex, Error>
where
    E: EventEmitter + ?Sized,
{
    events.emit(AppEvent::Resolver(ResolverEvent::IndexFetchStarted {
        url: url.to_string(),
    }));

    let entries: Vec<ReleaseEntry> = relget_net::fetch_json_checked(client, url, events).await?;
    let index = ReleaseIndex::from_entries(entries);

    events.emit(AppEvent::Resolver(ResolverEvent::IndexFetched {
        url: url.to_string(),
        releases: index.len(),
        skipped: index.skipped(),
    }));

    Ok(index)
}

//! Structured logging integration for events
//!
//! Library crates only emit events; this module turns each one into a
//! tracing record with structured fields.

use relget_events::{
    AppEvent, CacheEvent, ChecksumEvent, DownloadEvent, GeneralEvent, ResolverEvent, SessionEvent,
};
use tracing::{debug, error, info, warn};

/// Log an `AppEvent` at its level with structured fields
pub fn log_event_with_tracing(event: &AppEvent) {
    match event {
        AppEvent::General(general) => log_general(general),

        AppEvent::Resolver(resolver_event) => match resolver_event {
            ResolverEvent::IndexFetchStarted { url } => {
                debug!(url = %url, "Fetching release index");
            }
            ResolverEvent::IndexFetched {
                url,
                releases,
                skipped,
            } => {
                info!(url = %url, releases, skipped, "Release index fetched");
            }
            ResolverEvent::VersionResolved {
                selector,
                version,
                candidates,
            } => {
                info!(selector = %selector, version = %version, candidates, "Version resolved");
            }
        },

        AppEvent::Cache(cache_event) => match cache_event {
            CacheEvent::DirectoryEnsured { path } => {
                debug!(path = %path.display(), "Cache directory ready");
            }
            CacheEvent::Hit { path } => debug!(path = %path.display(), "Cache hit"),
            CacheEvent::Miss { path } => debug!(path = %path.display(), "Cache miss"),
        },

        AppEvent::Checksum(checksum_event) => match checksum_event {
            ChecksumEvent::ManifestLoaded {
                version,
                path,
                entries,
                skipped_lines,
                from_cache,
            } => {
                info!(
                    version = %version,
                    path = %path.display(),
                    entries,
                    skipped_lines,
                    from_cache,
                    "Checksum manifest loaded"
                );
            }
            ChecksumEvent::VerificationStarted { path, expected } => {
                debug!(path = %path.display(), expected = %expected, "Verifying digest");
            }
            ChecksumEvent::VerificationPassed { path, digest } => {
                info!(path = %path.display(), digest = %digest, "Digest verified");
            }
            ChecksumEvent::VerificationFailed {
                path,
                expected,
                actual,
            } => {
                error!(
                    path = %path.display(),
                    expected = %expected,
                    actual = %actual,
                    "Digest mismatch"
                );
            }
        },

        AppEvent::Download(download_event) => match download_event {
            DownloadEvent::Started {
                url,
                dest,
                total_bytes,
            } => {
                info!(url = %url, dest = %dest.display(), total_bytes = ?total_bytes, "Download started");
            }
            DownloadEvent::Completed {
                url,
                dest,
                bytes_downloaded,
            } => {
                info!(url = %url, dest = %dest.display(), bytes_downloaded, "Download completed");
            }
            DownloadEvent::Failed { url, dest, failure } => {
                error!(
                    url = %url,
                    dest = %dest.display(),
                    retryable = failure.retryable,
                    code = ?failure.code,
                    message = %failure.message,
                    hint = ?failure.hint,
                    "Download failed"
                );
            }
        },

        AppEvent::Session(session_event) => match session_event {
            SessionEvent::Started {
                selector,
                platform,
                target,
            } => {
                info!(selector = %selector, platform = %platform, target = %target.display(), "Session started");
            }
            SessionEvent::PlatformNotListed { version, key } => {
                warn!(version = %version, key = %key, "Release index does not list a build for this platform");
            }
            SessionEvent::Completed { version, artifacts } => {
                info!(version = %version, artifacts = artifacts.len(), "Session completed");
            }
            SessionEvent::Failed { stage, failure } => {
                error!(
                    stage = %stage,
                    code = ?failure.code,
                    message = %failure.message,
                    hint = ?failure.hint,
                    "Session failed"
                );
            }
        },
    }
}

fn log_general(event: &GeneralEvent) {
    match event {
        GeneralEvent::Warning { message, context } => {
            warn!(context = ?context, "{message}");
        }
        GeneralEvent::Error { message, details } => {
            error!(details = ?details, "{message}");
        }
        GeneralEvent::DebugLog { message, context } => {
            debug!(context = ?context, "{message}");
        }
    }
}

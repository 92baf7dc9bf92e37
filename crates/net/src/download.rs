//! Streaming download to a local path
//!
//! The body is written straight to the destination. Digest checks happen in a
//! separate pass over the finished file, so this module only moves bytes.

pub(crate) mod validation;

use crate::client::{map_transport_error, NetClient};
use futures::StreamExt;
use relget_errors::{Error, NetworkError, StorageError};
use relget_events::{AppEvent, DownloadEvent, EventEmitter, FailureContext};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use validation::{validate_success, validate_url};

/// Outcome of a completed download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResult {
    pub url: String,
    pub path: PathBuf,
    pub size: u64,
}

/// Stream `url` into `dest`
///
/// A failure after the file was created leaves the partial file in place.
///
/// # Errors
///
/// Returns a network error for invalid URLs, transport failures and non-2xx
/// statuses, and a storage error if the destination cannot be written.
pub async fn download_to_path<E>(
    client: &NetClient,
    url: &str,
    dest: &Path,
    events: &E,
) -> Result<DownloadResult, Error>
where
    E: EventEmitter + ?Sized,
{
    let result = stream_to_path(client, url, dest, events).await;

    match &result {
        Ok(done) => events.emit(AppEvent::Download(DownloadEvent::Completed {
            url: url.to_string(),
            dest: dest.to_path_buf(),
            bytes_downloaded: done.size,
        })),
        Err(e) => events.emit(AppEvent::Download(DownloadEvent::Failed {
            url: url.to_string(),
            dest: dest.to_path_buf(),
            failure: FailureContext::from_error(e),
        })),
    }

    result
}

async fn stream_to_path<E>(
    client: &NetClient,
    url: &str,
    dest: &Path,
    events: &E,
) -> Result<DownloadResult, Error>
where
    E: EventEmitter + ?Sized,
{
    validate_url(url)?;

    let response = client.get(url).await?;
    validate_success(&response, url)?;

    events.emit(AppEvent::Download(DownloadEvent::Started {
        url: url.to_string(),
        dest: dest.to_path_buf(),
        total_bytes: response.content_length(),
    }));

    let mut file = File::create(dest)
        .await
        .map_err(|e| StorageError::from_io_with_path(&e, dest))?;

    let mut stream = response.bytes_stream();
    let mut size = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| {
            if e.is_timeout() {
                map_transport_error(&e, url)
            } else {
                NetworkError::DownloadFailed(format!("{url}: {e}")).into()
            }
        })?;
        file.write_all(&chunk)
            .await
            .map_err(|e| StorageError::from_io_with_path(&e, dest))?;
        size += chunk.len() as u64;
    }

    file.flush()
        .await
        .map_err(|e| StorageError::from_io_with_path(&e, dest))?;

    Ok(DownloadResult {
        url: url.to_string(),
        path: dest.to_path_buf(),
        size,
    })
}

#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Network operations for relget
//!
//! This crate handles all HTTP operations: fetching the release index as
//! JSON, and streaming manifests and artifacts to disk. Nothing here retries;
//! a failed request is reported once and the caller decides what to do.

mod client;
mod download;

pub use client::{NetClient, NetConfig};
pub use download::{download_to_path, DownloadResult};

use download::validation::{is_json_content_type, validate_ok, validate_url};
use relget_errors::{Error, FormatError, NetworkError};
use relget_events::EventEmitter;
use serde::de::DeserializeOwned;

/// Fetch a JSON document, insisting on `200 OK` and a JSON content type
///
/// # Errors
///
/// Returns a network error for transport failures or any status other than
/// 200, and a format error if the content type is not `application/json` or
/// the body does not deserialize into `T`.
pub async fn fetch_json_checked<T, E>(client: &NetClient, url: &str, events: &E) -> Result<T, Error>
where
    T: DeserializeOwned,
    E: EventEmitter + ?Sized,
{
    validate_url(url)?;
    events.emit_debug(format!("Fetching JSON from {url}"));

    let response = client.get(url).await?;
    validate_ok(&response, url)?;

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    if !is_json_content_type(&content_type) {
        return Err(FormatError::UnexpectedContentType {
            url: url.to_string(),
            expected: "application/json".to_string(),
            actual: if content_type.is_empty() {
                "<none>".to_string()
            } else {
                content_type
            },
        }
        .into());
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| NetworkError::DownloadFailed(format!("{url}: {e}")))?;

    serde_json::from_slice(&body).map_err(|e| {
        FormatError::InvalidJson {
            url: url.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

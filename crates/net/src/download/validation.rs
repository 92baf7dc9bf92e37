//! URL validation and HTTP response validation

use relget_errors::{Error, NetworkError};
use url::Url;

/// Validate URL and check for supported protocols
pub(crate) fn validate_url(url: &str) -> Result<Url, Error> {
    let parsed = Url::parse(url).map_err(|e| NetworkError::InvalidUrl(format!("{url}: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(NetworkError::UnsupportedProtocol {
            protocol: scheme.to_string(),
        }
        .into()),
    }
}

/// Accept any 2xx status
pub(crate) fn validate_success(response: &reqwest::Response, url: &str) -> Result<(), Error> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(http_error(status, url))
    }
}

/// Accept exactly `200 OK`
pub(crate) fn validate_ok(response: &reqwest::Response, url: &str) -> Result<(), Error> {
    let status = response.status();
    if status == reqwest::StatusCode::OK {
        Ok(())
    } else {
        Err(http_error(status, url))
    }
}

fn http_error(status: reqwest::StatusCode, url: &str) -> Error {
    NetworkError::HttpError {
        url: url.to_string(),
        status: status.as_u16(),
        message: status.to_string(),
    }
    .into()
}

/// Whether a `Content-Type` value names JSON, ignoring parameters and case
pub(crate) fn is_json_content_type(value: &str) -> bool {
    value
        .split(';')
        .next()
        .map(str::trim)
        .is_some_and(|mime| mime.eq_ignore_ascii_case("application/json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_schemes() {
        assert!(validate_url("https://nodejs.org/dist/index.json").is_ok());
        assert!(validate_url("http://127.0.0.1:8080/x").is_ok());
        assert!(matches!(
            validate_url("file:///tmp/index.json"),
            Err(Error::Network(NetworkError::UnsupportedProtocol { .. }))
        ));
        assert!(matches!(
            validate_url("not a url"),
            Err(Error::Network(NetworkError::InvalidUrl(_)))
        ));
    }

    #[test]
    fn test_json_content_type() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("application/json; charset=utf-8"));
        assert!(is_json_content_type("Application/JSON"));
        assert!(!is_json_content_type("text/html"));
        assert!(!is_json_content_type("application/jsonp"));
        assert!(!is_json_content_type(""));
    }
}

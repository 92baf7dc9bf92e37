//! Remote payload format error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum FormatError {
    #[error("unexpected content type from {url}: expected {expected}, got {actual}")]
    UnexpectedContentType {
        url: String,
        expected: String,
        actual: String,
    },

    #[error("invalid JSON from {url}: {message}")]
    InvalidJson { url: String, message: String },
}

impl UserFacingError for FormatError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        Some("The mirror returned an unexpected release index; check the configured base URL.")
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::UnexpectedContentType { .. } => "format.unexpected_content_type",
            Self::InvalidJson { .. } => "format.invalid_json",
        };
        Some(code)
    }
}

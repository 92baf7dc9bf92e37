//! Artifact verification error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum VerificationError {
    #[error("no checksum recorded for {file} in the {version} manifest")]
    MissingChecksum { file: String, version: String },

    #[error("checksum mismatch for {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    #[error("invalid digest {digest:?}: {message}")]
    InvalidDigest { digest: String, message: String },
}

impl UserFacingError for VerificationError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::MissingChecksum { .. } => Some(
                "The release does not publish this artifact; check the platform and architecture.",
            ),
            Self::ChecksumMismatch { .. } => Some(
                "Delete the cached file (it may be corrupt or partially downloaded) and retry.",
            ),
            Self::InvalidDigest { .. } => {
                Some("A SHA-256 digest is 64 hexadecimal characters.")
            }
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::MissingChecksum { .. } => "verification.missing_checksum",
            Self::ChecksumMismatch { .. } => "verification.checksum_mismatch",
            Self::InvalidDigest { .. } => "verification.invalid_digest",
        };
        Some(code)
    }
}

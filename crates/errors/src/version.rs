//! Version and selector parsing error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum VersionError {
    #[error("invalid version: {input}")]
    InvalidVersion { input: String },

    #[error("invalid version selector '{input}': {message}")]
    InvalidSelector { input: String, message: String },

    #[error("no release satisfies '{selector}' ({candidates} releases considered)")]
    NoSatisfyingVersion { selector: String, candidates: usize },
}

impl UserFacingError for VersionError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidVersion { .. } => Some("Use semantic-version strings like 1.2.3."),
            Self::InvalidSelector { .. } => Some(
                "Use a semver range such as ^1.2.0, ~1.4, 1.x, >=2.0.0 <3.0.0 or 1.x || 2.x.",
            ),
            Self::NoSatisfyingVersion { .. } => {
                Some("Relax the version selector or check the mirror's published releases.")
            }
        }
    }

    fn is_retryable(&self) -> bool {
        false
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::InvalidVersion { .. } => "version.invalid_version",
            Self::InvalidSelector { .. } => "version.invalid_selector",
            Self::NoSatisfyingVersion { .. } => "version.no_satisfying_version",
        };
        Some(code)
    }
}

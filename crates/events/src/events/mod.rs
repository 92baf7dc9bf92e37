use relget_errors::UserFacingError;
use serde::{Deserialize, Serialize};

/// Structured failure information shared across domains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureContext {
    /// Stable error code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Short user-facing message.
    pub message: String,
    /// Optional remediation hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether retrying the operation might succeed.
    pub retryable: bool,
}

impl FailureContext {
    /// Build failure context from a `UserFacingError` implementation.
    #[must_use]
    pub fn from_error<E: UserFacingError + ?Sized>(error: &E) -> Self {
        Self {
            code: error.user_code().map(Into::into),
            message: error.user_message().into_owned(),
            hint: error.user_hint().map(Into::into),
            retryable: error.is_retryable(),
        }
    }
}

pub mod cache;
pub mod checksum;
pub mod download;
pub mod general;
pub mod resolver;
pub mod session;

pub use cache::*;
pub use checksum::*;
pub use download::*;
pub use general::*;
pub use resolver::*;
pub use session::*;

/// Top-level application event enum that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// General utility events (warnings, errors, debug output)
    General(GeneralEvent),

    /// Release index and version resolution
    Resolver(ResolverEvent),

    /// Cache directories and cache hit/miss reporting
    Cache(CacheEvent),

    /// Checksum manifests and digest verification
    Checksum(ChecksumEvent),

    /// File transfers
    Download(DownloadEvent),

    /// Install session lifecycle
    Session(SessionEvent),
}

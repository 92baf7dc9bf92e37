//! CLI error handling

use std::fmt;

use relget_errors::UserFacingError;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Configuration error
    Config(relget_errors::ConfigError),
    /// Session error
    Session(relget_errors::Error),
    /// Result rendering failed
    Output(String),
}

impl CliError {
    /// Stable code for machine-readable output
    pub fn code(&self) -> Option<&'static str> {
        match self {
            CliError::Config(e) => e.user_code(),
            CliError::Session(e) => e.user_code(),
            CliError::Output(_) => None,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "Configuration error: {e}"),
            CliError::Session(e) => {
                write!(f, "{} failed: {}", e.stage(), e.user_message())?;
                if let Some(code) = e.user_code() {
                    write!(f, "\n  Code: {code}")?;
                }
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                if e.is_retryable() {
                    write!(f, "\n  Retry: safe to retry this operation.")?;
                }
                Ok(())
            }
            CliError::Output(msg) => write!(f, "Output error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Session(e) => Some(e),
            CliError::Output(_) => None,
        }
    }
}

impl From<relget_errors::ConfigError> for CliError {
    fn from(e: relget_errors::ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<relget_errors::Error> for CliError {
    fn from(e: relget_errors::Error) -> Self {
        match e {
            relget_errors::Error::Config(inner) => CliError::Config(inner),
            other => CliError::Session(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output(e.to_string())
    }
}

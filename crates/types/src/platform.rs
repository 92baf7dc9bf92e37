//! Target platform and architecture identifiers
//!
//! Identifiers follow the naming used by release mirrors (`linux`, `darwin`,
//! `win`; `x64`, `arm64`, ...), not Rust's target triple names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Target platform/architecture pair used to name installer artifacts
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlatformConfig {
    pub platform: String,
    pub arch: String,
}

impl PlatformConfig {
    /// Create a platform configuration from explicit identifiers
    #[must_use]
    pub fn new(platform: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            arch: arch.into(),
        }
    }

    /// Platform configuration of the running host
    #[must_use]
    pub fn host() -> Self {
        Self::new(host_platform(), host_arch())
    }

    /// Host defaults with optional overrides applied
    #[must_use]
    pub fn host_with_overrides(platform: Option<&str>, arch: Option<&str>) -> Self {
        Self::new(
            platform.unwrap_or(host_platform()),
            arch.unwrap_or(host_arch()),
        )
    }

    /// Whether installer archives for this platform ship as `.zip`
    #[must_use]
    pub fn uses_zip(&self) -> bool {
        self.platform == "win"
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self::host()
    }
}

impl fmt::Display for PlatformConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.platform, self.arch)
    }
}

/// Mirror identifier for the running operating system
#[must_use]
pub fn host_platform() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        "windows" => "win",
        "solaris" | "illumos" => "sunos",
        other => other,
    }
}

/// Mirror identifier for the running CPU architecture
#[must_use]
pub fn host_arch() -> &'static str {
    match std::env::consts::ARCH {
        "x86_64" => "x64",
        "aarch64" => "arm64",
        "arm" => "armv7l",
        "powerpc64" => "ppc64le",
        other => other,
    }
}

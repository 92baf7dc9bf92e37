#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for relget
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/relget/config.toml)
//! - Environment variables
//! - CLI flags (applied by the binary)

use relget_errors::{ConfigError, Error, StorageError};
use relget_types::PlatformConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub dist: DistConfig,

    #[serde(default)]
    pub platform: PlatformSection,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub paths: PathConfig,
}

/// Release mirror layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Artifact name prefix, e.g. `node` in `node-v20.1.0-linux-x64.tar.gz`
    #[serde(default = "default_dist_name")]
    pub name: String,
    #[serde(default = "default_index_file")]
    pub index_file: String,
    #[serde(default = "default_checksum_file")]
    pub checksum_file: String,
}

/// Target platform overrides; unset fields fall back to the running host
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlatformSection {
    pub platform: Option<String>,
    pub arch: Option<String>,
}

/// Network configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Longest silence on a connection before a request fails. It does not
    /// cap how long a steady download may take; use `deadline` for that.
    #[serde(default = "default_timeout")]
    pub timeout: u64, // seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64, // seconds
    /// Overall deadline for one install session; `None` waits indefinitely
    #[serde(default)]
    pub deadline: Option<u64>, // seconds
}

/// Path configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PathConfig {
    pub cache_dir: Option<PathBuf>,
}

// Default implementations

impl Default for DistConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            name: default_dist_name(),
            index_file: default_index_file(),
            checksum_file: default_checksum_file(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout: 300, // 5 minutes
            connect_timeout: 30,
            deadline: None,
        }
    }
}

// Default value functions for serde
fn default_base_url() -> String {
    "https://nodejs.org/dist".to_string()
}

fn default_dist_name() -> String {
    "node".to_string()
}

fn default_index_file() -> String {
    "index.json".to_string()
}

fn default_checksum_file() -> String {
    "SHASUMS256.txt".to_string()
}

fn default_timeout() -> u64 {
    300 // 5 minutes
}

fn default_connect_timeout() -> u64 {
    30
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join("relget").join("config.toml"))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist,
    /// `ConfigError::ParseError` if it is not UTF-8 or not valid TOML, and a
    /// storage error for any other read failure.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::from(ConfigError::NotFound {
                path: path.display().to_string(),
            }),
            std::io::ErrorKind::InvalidData => Error::from(ConfigError::ParseError {
                message: format!("{}: {e}", path.display()),
            }),
            _ => Error::from(StorageError::from_io_with_path(&e, path)),
        })?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })
            .map_err(Into::into)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path()?;

        if fs::try_exists(&config_path).await.unwrap_or(false) {
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        if let Ok(base_url) = std::env::var("RELGET_BASE_URL") {
            self.dist.base_url = base_url;
        }

        if let Ok(name) = std::env::var("RELGET_DIST_NAME") {
            self.dist.name = name;
        }

        if let Ok(platform) = std::env::var("RELGET_PLATFORM") {
            self.platform.platform = Some(platform);
        }

        if let Ok(arch) = std::env::var("RELGET_ARCH") {
            self.platform.arch = Some(arch);
        }

        if let Ok(cache_dir) = std::env::var("RELGET_CACHE_DIR") {
            self.paths.cache_dir = Some(PathBuf::from(cache_dir));
        }

        if let Ok(timeout) = std::env::var("RELGET_TIMEOUT") {
            self.network.timeout = parse_seconds("RELGET_TIMEOUT", timeout)?;
        }

        if let Ok(deadline) = std::env::var("RELGET_DEADLINE") {
            self.network.deadline = Some(parse_seconds("RELGET_DEADLINE", deadline)?);
        }

        Ok(())
    }

    /// Check values that cannot be expressed in the TOML schema
    ///
    /// # Errors
    ///
    /// Returns an error if the mirror base URL is not an http(s) URL or a
    /// required name is empty.
    pub fn validate(&self) -> Result<(), Error> {
        let parsed = url::Url::parse(&self.dist.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "dist.base_url".to_string(),
            value: format!("{}: {e}", self.dist.base_url),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "dist.base_url".to_string(),
                value: self.dist.base_url.clone(),
            }
            .into());
        }

        for (field, value) in [
            ("dist.name", &self.dist.name),
            ("dist.index_file", &self.dist.index_file),
            ("dist.checksum_file", &self.dist.checksum_file),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    message: format!("{field} must not be empty"),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Target platform with host defaults filled in
    #[must_use]
    pub fn platform_config(&self) -> PlatformConfig {
        PlatformConfig::host_with_overrides(
            self.platform.platform.as_deref(),
            self.platform.arch.as_deref(),
        )
    }

    /// Get the cache root (with default)
    ///
    /// # Errors
    ///
    /// Returns an error if no cache directory is configured and the system
    /// cache directory cannot be determined.
    pub fn cache_root(&self) -> Result<PathBuf, Error> {
        if let Some(dir) = &self.paths.cache_dir {
            return Ok(dir.clone());
        }
        let cache_dir = dirs::cache_dir().ok_or_else(|| ConfigError::NotFound {
            path: "cache directory".to_string(),
        })?;
        Ok(cache_dir.join("relget"))
    }

    /// Per-read timeout for HTTP connections
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.network.timeout)
    }

    /// Connection establishment timeout
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.network.connect_timeout)
    }

    /// Overall session deadline, if one is configured
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.network.deadline.map(Duration::from_secs)
    }
}

fn parse_seconds(field: &str, value: String) -> Result<u64, Error> {
    let parsed = value.trim().parse::<u64>();
    match parsed {
        Ok(seconds) => Ok(seconds),
        Err(_) => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value,
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.dist.base_url, "https://nodejs.org/dist");
        assert_eq!(config.dist.checksum_file, "SHASUMS256.txt");
        assert_eq!(config.network.timeout, 300);
        assert!(config.deadline().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_http() {
        let mut config = Config::default();
        config.dist.base_url = "ftp://mirror.example.com/dist".to_string();
        assert!(config.validate().is_err());

        config.dist.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_names() {
        let mut config = Config::default();
        config.dist.name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cache_root_override() {
        let mut config = Config::default();
        config.paths.cache_dir = Some(PathBuf::from("/tmp/relget-cache"));
        assert_eq!(
            config.cache_root().unwrap(),
            PathBuf::from("/tmp/relget-cache")
        );
    }
}

#![warn(mismatched_lifetime_syntaxes)]
#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Release mirror layout for relget
//!
//! Every remote file lives under `{base}/v{version}/`, except the release
//! index which sits at the mirror root. Everything here is a pure function of
//! the layout, the resolved version and the target platform.

use relget_config::DistConfig;
use relget_types::{PlatformConfig, Version};
use serde::{Deserialize, Serialize};

/// File names and URLs of a release mirror
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingPolicy {
    base_url: String,
    name: String,
    index_file: String,
    checksum_file: String,
}

impl NamingPolicy {
    /// Layout with the default `index.json` and `SHASUMS256.txt` file names
    #[must_use]
    pub fn new(base_url: impl Into<String>, name: impl Into<String>) -> Self {
        let defaults = DistConfig::default();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            name: name.into(),
            index_file: defaults.index_file,
            checksum_file: defaults.checksum_file,
        }
    }

    #[must_use]
    pub fn from_config(dist: &DistConfig) -> Self {
        Self {
            base_url: dist.base_url.trim_end_matches('/').to_string(),
            name: dist.name.clone(),
            index_file: dist.index_file.clone(),
            checksum_file: dist.checksum_file.clone(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// URL of the release index
    #[must_use]
    pub fn index_url(&self) -> String {
        format!("{}/{}", self.base_url, self.index_file)
    }

    /// Directory URL holding every file of one release
    #[must_use]
    pub fn release_url(&self, version: &Version) -> String {
        format!("{}/v{version}", self.base_url)
    }

    /// `node-v20.14.0-linux-x64.tar.gz`, or `.zip` for `win`
    #[must_use]
    pub fn installer_file_name(&self, version: &Version, platform: &PlatformConfig) -> String {
        let ext = if platform.uses_zip() { "zip" } else { "tar.gz" };
        format!(
            "{}-v{version}-{}-{}.{ext}",
            self.name, platform.platform, platform.arch
        )
    }

    #[must_use]
    pub fn installer_url(&self, version: &Version, file_name: &str) -> String {
        format!("{}/{file_name}", self.release_url(version))
    }

    /// `node-v20.14.0.tar.gz`
    #[must_use]
    pub fn src_file_name(&self, version: &Version) -> String {
        format!("{}-v{version}.tar.gz", self.name)
    }

    #[must_use]
    pub fn src_url(&self, version: &Version, file_name: &str) -> String {
        format!("{}/{file_name}", self.release_url(version))
    }

    #[must_use]
    pub fn checksum_file_name(&self) -> &str {
        &self.checksum_file
    }

    #[must_use]
    pub fn checksum_url(&self, version: &Version) -> String {
        format!("{}/{}", self.release_url(version), self.checksum_file)
    }

    /// Key under which the release index lists an installer build
    ///
    /// The index uses `osx` for darwin and suffixes the archive kind for
    /// darwin and windows builds.
    #[must_use]
    pub fn index_files_key(platform: &PlatformConfig) -> String {
        match platform.platform.as_str() {
            "darwin" => format!("osx-{}-tar", platform.arch),
            "win" => format!("win-{}-zip", platform.arch),
            other => format!("{other}-{}", platform.arch),
        }
    }
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self::from_config(&DistConfig::default())
    }
}

//! Release index data models

use relget_errors::{Error, FormatError};
use relget_types::{normalize_release_version, Version};
use serde::{Deserialize, Serialize};

/// One entry of the remote `index.json` array
///
/// Only `version` is required. Fields this crate does not model are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseEntry {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub lts: LtsTag,
    #[serde(default)]
    pub security: bool,
}

/// `lts` is either `false` or the codename of the LTS line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LtsTag {
    Codename(String),
    Flag(bool),
}

impl Default for LtsTag {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl LtsTag {
    #[must_use]
    pub fn codename(&self) -> Option<&str> {
        match self {
            Self::Codename(name) => Some(name),
            Self::Flag(_) => None,
        }
    }

    #[must_use]
    pub fn is_lts(&self) -> bool {
        match self {
            Self::Codename(_) => true,
            Self::Flag(flag) => *flag,
        }
    }
}

/// A release whose version string normalised to semver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub version: Version,
    pub date: Option<String>,
    pub files: Vec<String>,
    pub lts: LtsTag,
    pub security: bool,
}

impl Release {
    /// Whether the index lists a build under `key` (e.g. `linux-x64`)
    ///
    /// Entries without a `files` list carry no information and are treated
    /// as publishing everything; the checksum manifest stays authoritative.
    #[must_use]
    pub fn publishes(&self, key: &str) -> bool {
        self.files.is_empty() || self.files.iter().any(|f| f == key)
    }
}

/// Parsed release index, in the order the server listed it
#[derive(Debug, Clone, Default)]
pub struct ReleaseIndex {
    releases: Vec<Release>,
    skipped: usize,
}

impl ReleaseIndex {
    /// Build an index from raw entries, dropping entries whose version does
    /// not normalise to semver
    #[must_use]
    pub fn from_entries(entries: Vec<ReleaseEntry>) -> Self {
        let mut releases = Vec::with_capacity(entries.len());
        let mut skipped = 0;

        for entry in entries {
            match normalize_release_version(&entry.version) {
                Ok(version) => releases.push(Release {
                    version,
                    date: entry.date,
                    files: entry.files,
                    lts: entry.lts,
                    security: entry.security,
                }),
                Err(_) => skipped += 1,
            }
        }

        Self { releases, skipped }
    }

    /// Parse an index document
    ///
    /// # Errors
    ///
    /// Returns a format error if the JSON is not an array of release entries.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let entries: Vec<ReleaseEntry> =
            serde_json::from_str(json).map_err(|e| FormatError::InvalidJson {
                url: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        Ok(Self::from_entries(entries))
    }

    #[must_use]
    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    pub fn versions(&self) -> impl Iterator<Item = &Version> {
        self.releases.iter().map(|r| &r.version)
    }

    /// Release entry for an exact version
    #[must_use]
    pub fn release(&self, version: &Version) -> Option<&Release> {
        self.releases.iter().find(|r| &r.version == version)
    }

    /// Number of entries dropped because their version did not parse
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.releases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_node_style_index() {
        let json = r#"[
            {"version":"v22.3.0","date":"2024-06-11","files":["linux-x64","osx-arm64-tar","src"],"npm":"10.8.1","lts":false,"security":false},
            {"version":"v20.14.0","date":"2024-05-28","files":["linux-x64"],"lts":"Iron","security":true},
            {"version":"nightly-2024","files":[]}
        ]"#;

        let index = ReleaseIndex::from_json(json).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.skipped(), 1);

        let latest = &index.releases()[0];
        assert_eq!(latest.version, Version::new(22, 3, 0));
        assert!(!latest.lts.is_lts());
        assert!(latest.publishes("linux-x64"));
        assert!(!latest.publishes("win-x64-zip"));

        let iron = index.release(&Version::new(20, 14, 0)).unwrap();
        assert_eq!(iron.lts.codename(), Some("Iron"));
        assert!(iron.security);
    }

    #[test]
    fn test_minimal_entries() {
        let index = ReleaseIndex::from_json(r#"[{"version":"1.2.0"},{"version":"v1.3.0"}]"#).unwrap();
        let versions: Vec<String> = index.versions().map(ToString::to_string).collect();
        assert_eq!(versions, vec!["1.2.0", "1.3.0"]);
        assert!(index.releases()[0].publishes("anything"));
    }

    #[test]
    fn test_non_array_is_format_error() {
        let err = ReleaseIndex::from_json(r#"{"version":"1.0.0"}"#).unwrap_err();
        assert!(matches!(err, Error::Format(FormatError::InvalidJson { .. })));
    }
}

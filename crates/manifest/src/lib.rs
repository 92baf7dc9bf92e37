#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Checksum manifests for relget
//!
//! A release publishes one `SHASUMS256.txt`-style manifest listing the
//! SHA-256 digest of every file in the release:
//!
//! ```text
//! 6e3e5e7c5a8f...  node-v20.14.0-linux-x64.tar.gz
//! 9b2f0c41d6aa... *node-v20.14.0.tar.gz
//! ```
//!
//! The manifest is downloaded into the version's cache directory once and
//! parsed from there on every later request.

mod store;

pub use store::ChecksumStore;

use relget_errors::{Error, StorageError};
use std::collections::HashMap;
use std::path::Path;

/// File name to expected hex digest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecksumManifest {
    entries: HashMap<String, String>,
    skipped_lines: usize,
}

impl ChecksumManifest {
    /// Parse manifest text
    ///
    /// Lines that are not `<hex digest><whitespace><file name>` are skipped
    /// and counted; blank lines are ignored. A later line for the same file
    /// replaces an earlier one.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut manifest = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match parse_line(line) {
                Some((digest, file)) => {
                    manifest.entries.insert(file.to_string(), digest.to_string());
                }
                None => manifest.skipped_lines += 1,
            }
        }

        manifest
    }

    /// Read and parse a manifest file
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file cannot be read.
    pub async fn from_file(path: &Path) -> Result<Self, Error> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| StorageError::from_io_with_path(&e, path))?;
        Ok(Self::parse(&content))
    }

    /// Expected digest for `file_name`
    #[must_use]
    pub fn get(&self, file_name: &str) -> Option<&str> {
        self.entries.get(file_name).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, file_name: &str) -> bool {
        self.entries.contains_key(file_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(f, d)| (f.as_str(), d.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Non-blank lines that did not parse
    #[must_use]
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }
}

fn parse_line(line: &str) -> Option<(&str, &str)> {
    let (digest, rest) = line.split_once(char::is_whitespace)?;
    if digest.is_empty() || !digest.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    // `sha256sum -b` marks binary mode with a leading '*'
    let file = rest.trim_start();
    let file = file.strip_prefix('*').unwrap_or(file);
    if file.is_empty() {
        return None;
    }

    Some((digest, file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_line() {
        let manifest = ChecksumManifest::parse("abcd1234  file.tar.gz");
        assert_eq!(manifest.get("file.tar.gz"), Some("abcd1234"));
        assert_eq!(manifest.len(), 1);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let content = "\
abcd1234  good.tar.gz
no-separator-here
zzzz  not-hex.tar.gz
# comment line

ef01  other.zip
";
        let manifest = ChecksumManifest::parse(content);
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.get("good.tar.gz"), Some("abcd1234"));
        assert_eq!(manifest.get("other.zip"), Some("ef01"));
        assert_eq!(manifest.skipped_lines(), 3);
    }

    #[test]
    fn test_last_duplicate_wins() {
        let manifest = ChecksumManifest::parse("aaaa  f.tar.gz\nbbbb  f.tar.gz\n");
        assert_eq!(manifest.get("f.tar.gz"), Some("bbbb"));
        assert_eq!(manifest.len(), 1);
    }

    #[test]
    fn test_binary_marker_and_tabs() {
        let manifest = ChecksumManifest::parse("ABCDEF *node-v1.0.0.tar.gz\n0123\tnode.zip\r\n");
        assert_eq!(manifest.get("node-v1.0.0.tar.gz"), Some("ABCDEF"));
        assert_eq!(manifest.get("node.zip"), Some("0123"));
    }

    #[test]
    fn test_empty_manifest_is_not_an_error() {
        let manifest = ChecksumManifest::parse("");
        assert!(manifest.is_empty());
        assert_eq!(manifest.skipped_lines(), 0);
    }
}

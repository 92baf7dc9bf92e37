//! Version selectors and release-version normalisation
//!
//! A selector is a semantic-version range. On top of what
//! [`semver::VersionReq`] accepts natively it understands:
//! - `a || b` - either range
//! - `>=1.2.0 <2.0.0` - whitespace-separated comparators
//! - `1.2.3 - 2.3.4` - inclusive hyphen ranges
//! - `v1.2.3` - a leading `v` on any version
//! - `1.2.3`, `1.2` - a bare version is exact, missing parts match anything
//! - `latest`, `*` or an empty string - any release

use relget_errors::VersionError;
use semver::{Version, VersionReq};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operator characters that may appear detached from their version
const OPERATOR_CHARS: &[char] = &['<', '>', '=', '~', '^'];

/// An immutable, validated semantic-version range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionSelector {
    raw: String,
    alternatives: Vec<VersionReq>,
}

impl VersionSelector {
    /// Parse a selector string
    ///
    /// # Errors
    ///
    /// Returns `VersionError::InvalidSelector` if any alternative fails to
    /// parse as a version range.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        input.parse()
    }

    /// Check whether a version satisfies any alternative of this selector
    #[must_use]
    pub fn matches(&self, version: &Version) -> bool {
        self.alternatives.iter().any(|req| req.matches(version))
    }

    /// The selector as originally written
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether this selector accepts every release
    #[must_use]
    pub fn is_any(&self) -> bool {
        self.alternatives.iter().any(|req| *req == VersionReq::STAR)
    }
}

impl FromStr for VersionSelector {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if trimmed.is_empty() || trimmed == "*" || trimmed.eq_ignore_ascii_case("latest") {
            return Ok(Self {
                raw: s.to_string(),
                alternatives: vec![VersionReq::STAR],
            });
        }

        let alternatives = trimmed
            .split("||")
            .map(|part| parse_range(part, s))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            raw: s.to_string(),
            alternatives,
        })
    }
}

impl TryFrom<String> for VersionSelector {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VersionSelector> for String {
    fn from(selector: VersionSelector) -> Self {
        selector.raw
    }
}

impl fmt::Display for VersionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Parse one `||` alternative into a `VersionReq`
fn parse_range(part: &str, whole: &str) -> Result<VersionReq, VersionError> {
    let invalid = |message: String| VersionError::InvalidSelector {
        input: whole.to_string(),
        message,
    };

    let tokens: Vec<&str> = part.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(invalid("empty range alternative".to_string()));
    }

    let comparators = match tokens.as_slice() {
        [low, "-", high] => vec![
            format!(">={}", strip_v(low)),
            format!("<={}", strip_v(high)),
        ],
        _ => join_comparators(&tokens),
    };

    VersionReq::parse(&comparators.join(", ")).map_err(|e| invalid(e.to_string()))
}

/// Re-attach detached operators (`>= 1.0.0`) and drop commas already present
fn join_comparators(tokens: &[&str]) -> Vec<String> {
    let mut comparators = Vec::with_capacity(tokens.len());
    let mut pending_op = String::new();

    for token in tokens {
        for piece in token.split(',').filter(|p| !p.is_empty()) {
            if piece.chars().all(|c| OPERATOR_CHARS.contains(&c)) {
                pending_op.push_str(piece);
                continue;
            }
            let op_len = piece
                .find(|c: char| !OPERATOR_CHARS.contains(&c))
                .unwrap_or(piece.len());
            let (op, version) = piece.split_at(op_len);
            let version = strip_v(version);
            // A bare version is exact (`1.2` is every 1.2.x), not a caret range
            let op = if op.is_empty() && pending_op.is_empty() && !has_wildcard(version) {
                "="
            } else {
                op
            };
            comparators.push(format!("{pending_op}{op}{version}"));
            pending_op.clear();
        }
    }

    if !pending_op.is_empty() {
        // A dangling operator; let semver report it
        comparators.push(pending_op);
    }

    comparators
}

fn has_wildcard(version: &str) -> bool {
    version
        .split('.')
        .any(|part| matches!(part, "x" | "X" | "*"))
}

fn strip_v(version: &str) -> &str {
    version
        .strip_prefix('v')
        .or_else(|| version.strip_prefix('V'))
        .unwrap_or(version)
}

/// Normalise a published release version (`v18.17.1` -> `18.17.1`) and parse it
///
/// # Errors
///
/// Returns `VersionError::InvalidVersion` if the remainder is not a semantic version.
pub fn normalize_release_version(input: &str) -> Result<Version, VersionError> {
    Version::parse(strip_v(input.trim())).map_err(|_| VersionError::InvalidVersion {
        input: input.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_caret_selector() {
        let selector = VersionSelector::parse("^1.2.0").unwrap();
        assert!(selector.matches(&v("1.2.0")));
        assert!(selector.matches(&v("1.9.3")));
        assert!(!selector.matches(&v("2.0.0")));
        assert!(!selector.matches(&v("1.1.9")));
    }

    #[test]
    fn test_wildcard_selector() {
        let selector = VersionSelector::parse("1.x").unwrap();
        assert!(selector.matches(&v("1.0.0")));
        assert!(selector.matches(&v("1.99.2")));
        assert!(!selector.matches(&v("2.0.0")));
    }

    #[test]
    fn test_space_separated_comparators() {
        let selector = VersionSelector::parse(">= 1.2.0 <2.0.0").unwrap();
        assert!(selector.matches(&v("1.5.0")));
        assert!(!selector.matches(&v("2.0.0")));
        assert!(!selector.matches(&v("1.1.0")));
    }

    #[test]
    fn test_hyphen_range() {
        let selector = VersionSelector::parse("1.2.3 - 2.3.4").unwrap();
        assert!(selector.matches(&v("1.2.3")));
        assert!(selector.matches(&v("2.3.4")));
        assert!(!selector.matches(&v("2.3.5")));
    }

    #[test]
    fn test_disjunction() {
        let selector = VersionSelector::parse("^1.0.0 || ^3.0.0").unwrap();
        assert!(selector.matches(&v("1.4.0")));
        assert!(!selector.matches(&v("2.4.0")));
        assert!(selector.matches(&v("3.0.1")));
    }

    #[test]
    fn test_leading_v() {
        let selector = VersionSelector::parse("v18.17.1").unwrap();
        assert!(selector.matches(&v("18.17.1")));
        assert!(!selector.matches(&v("18.20.3")));
    }

    #[test]
    fn test_bare_version_is_exact() {
        let selector = VersionSelector::parse("18.17.1").unwrap();
        assert!(selector.matches(&v("18.17.1")));
        assert!(!selector.matches(&v("18.17.2")));
        assert!(!selector.matches(&v("18.20.3")));

        let partial = VersionSelector::parse("1.2").unwrap();
        assert!(partial.matches(&v("1.2.0")));
        assert!(partial.matches(&v("1.2.9")));
        assert!(!partial.matches(&v("1.3.0")));

        let major = VersionSelector::parse("18").unwrap();
        assert!(major.matches(&v("18.20.3")));
        assert!(!major.matches(&v("19.0.0")));

        // Explicit operators keep their meaning
        let caret = VersionSelector::parse("^18.17.1").unwrap();
        assert!(caret.matches(&v("18.20.3")));
        let bounded = VersionSelector::parse(">= 1.2.0 <2").unwrap();
        assert!(bounded.matches(&v("1.9.0")));
        assert!(!bounded.matches(&v("2.0.0")));
    }

    #[test]
    fn test_any_selector() {
        for input in ["", "*", "latest", "LATEST"] {
            let selector = VersionSelector::parse(input).unwrap();
            assert!(selector.is_any(), "{input:?} should accept anything");
            assert!(selector.matches(&v("0.0.1")));
        }
    }

    #[test]
    fn test_invalid_selector() {
        for input in ["not a range", "^1.2.0 ||", ">=", "1.2.3.4"] {
            let err = VersionSelector::parse(input).unwrap_err();
            assert!(
                matches!(err, VersionError::InvalidSelector { .. }),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_normalize_release_version() {
        assert_eq!(normalize_release_version("v18.17.1").unwrap(), v("18.17.1"));
        assert_eq!(normalize_release_version("1.0.0").unwrap(), v("1.0.0"));
        assert!(normalize_release_version("vNext").is_err());
    }
}

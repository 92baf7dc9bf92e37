#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Version resolution for relget
//!
//! Resolution picks the highest release in the index that satisfies the
//! selector. The index is fetched once per resolver and the outcome, success
//! or failure, is shared by every caller.

mod resolver;

pub use resolver::VersionResolver;

use relget_errors::VersionError;
use relget_index::{Release, ReleaseIndex};
use relget_types::{Version, VersionSelector};

/// Highest version in `versions` that satisfies `selector`
///
/// The result does not depend on the order of `versions`.
pub fn select_highest<'a, I>(selector: &VersionSelector, versions: I) -> Option<&'a Version>
where
    I: IntoIterator<Item = &'a Version>,
{
    versions
        .into_iter()
        .filter(|v| selector.matches(v))
        .max()
}

/// Resolve `selector` against a fetched index
///
/// # Errors
///
/// Returns `VersionError::NoSatisfyingVersion` if no release matches.
pub fn resolve_in_index(
    selector: &VersionSelector,
    index: &ReleaseIndex,
) -> Result<Release, VersionError> {
    let best = select_highest(selector, index.versions()).ok_or_else(|| {
        VersionError::NoSatisfyingVersion {
            selector: selector.as_str().to_string(),
            candidates: index.len(),
        }
    })?;

    // select_highest only yields versions taken from this index
    index
        .release(best)
        .cloned()
        .ok_or_else(|| VersionError::NoSatisfyingVersion {
            selector: selector.as_str().to_string(),
            candidates: index.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versions(list: &[&str]) -> Vec<Version> {
        list.iter().map(|v| Version::parse(v).unwrap()).collect()
    }

    #[test]
    fn test_highest_not_first() {
        let available = versions(&["1.2.0", "1.3.0", "1.2.5"]);
        let selector = VersionSelector::parse("^1.2.0").unwrap();
        assert_eq!(
            select_highest(&selector, &available),
            Some(&Version::new(1, 3, 0))
        );
    }

    #[test]
    fn test_no_match() {
        let available = versions(&["1.2.0"]);
        let selector = VersionSelector::parse("^99.0.0").unwrap();
        assert_eq!(select_highest(&selector, &available), None);
    }

    #[test]
    fn test_resolve_in_index() {
        let index = ReleaseIndex::from_json(
            r#"[{"version":"v18.20.3"},{"version":"v20.14.0"},{"version":"v20.9.0"},{"version":"v22.3.0"}]"#,
        )
        .unwrap();

        let selector = VersionSelector::parse("20.x").unwrap();
        let release = resolve_in_index(&selector, &index).unwrap();
        assert_eq!(release.version, Version::new(20, 14, 0));

        let selector = VersionSelector::parse("^16 || ^18").unwrap();
        let release = resolve_in_index(&selector, &index).unwrap();
        assert_eq!(release.version, Version::new(18, 20, 3));

        let selector = VersionSelector::parse("latest").unwrap();
        let release = resolve_in_index(&selector, &index).unwrap();
        assert_eq!(release.version, Version::new(22, 3, 0));
    }

    #[test]
    fn test_bare_version_pins_release() {
        let index = ReleaseIndex::from_json(
            r#"[{"version":"v18.20.3"},{"version":"v18.17.1"},{"version":"v18.17.0"}]"#,
        )
        .unwrap();

        for input in ["18.17.1", "v18.17.1"] {
            let selector = VersionSelector::parse(input).unwrap();
            let release = resolve_in_index(&selector, &index).unwrap();
            assert_eq!(release.version, Version::new(18, 17, 1), "{input}");
        }

        let selector = VersionSelector::parse("18.17").unwrap();
        let release = resolve_in_index(&selector, &index).unwrap();
        assert_eq!(release.version, Version::new(18, 17, 1));
    }

    #[test]
    fn test_resolve_in_index_reports_candidates() {
        let index = ReleaseIndex::from_json(r#"[{"version":"v1.2.0"}]"#).unwrap();
        let selector = VersionSelector::parse("^99.0.0").unwrap();
        let err = resolve_in_index(&selector, &index).unwrap_err();
        assert!(matches!(
            err,
            VersionError::NoSatisfyingVersion { candidates: 1, .. }
        ));
    }
}

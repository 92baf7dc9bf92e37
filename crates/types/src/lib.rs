#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for relget
//!
//! This crate provides the version selector, release-version normalisation
//! and platform identifiers shared by every other crate.

pub mod platform;
pub mod version;

// Re-export commonly used types
pub use platform::{host_arch, host_platform, PlatformConfig};
pub use semver::Version;
pub use version::{normalize_release_version, VersionSelector};

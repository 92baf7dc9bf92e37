#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Verified artifact installation for relget
//!
//! An [`InstallSession`] ties the pipeline together:
//!
//! ```text
//! VersionResolver ──> NamingPolicy ──┬─> VerifiedDownloader(installer) ─┐
//!                                    └─> VerifiedDownloader(source)    ─┴─> ArtifactInstaller
//! ```
//!
//! Each downloader branch waits on the version's cache directory and
//! checksum manifest, both of which are provisioned once and shared. The two
//! branches run concurrently; the first failure ends the session.

mod api;
mod downloader;
mod installer;
mod session;

pub use api::config::SessionConfig;
pub use api::result::{CachedArtifact, InstallationResult};
pub use downloader::VerifiedDownloader;
pub use installer::{ArtifactInstaller, RecordingInstaller};
pub use session::InstallSession;

// Re-export EventSender so callers can wire a channel without another import
pub use relget_events::EventSender;

#![deny(clippy::pedantic, unsafe_code)]

//! Shared-computation utilities for relget
//!
//! Every expensive step of an install session (resolving the version,
//! provisioning a cache directory, loading a checksum manifest) runs at most
//! once per key. Callers that arrive while the step is still running attach
//! to the in-flight future instead of starting their own.

pub mod memo;

pub use memo::{MemoCell, MemoTable};

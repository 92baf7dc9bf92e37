//! Shared fixtures for end-to-end tests
//!
//! `MockDist` serves a small release mirror laid out like a Node.js dist
//! directory: `index.json` at the root and one directory per version
//! holding `SHASUMS256.txt` plus the archives it lists.

#![allow(dead_code)]

use httpmock::prelude::*;
use httpmock::Mock;
use relget_events::{AppEvent, EventReceiver};
use relget_hash::Hash;
use relget_install::{RecordingInstaller, SessionConfig};
use relget_net::NetConfig;
use relget_repository::NamingPolicy;
use relget_types::PlatformConfig;
use std::path::Path;

/// One archive published for a release
pub struct Artifact {
    pub file_name: String,
    pub body: Vec<u8>,
}

impl Artifact {
    pub fn new(file_name: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            body: body.into(),
        }
    }

    pub fn digest(&self) -> String {
        Hash::from_data(&self.body).to_hex()
    }
}

/// Mocks registered for one served version
pub struct ServedRelease<'a> {
    pub manifest: Mock<'a>,
    pub artifacts: Vec<Mock<'a>>,
}

impl ServedRelease<'_> {
    /// Total requests made for archives of this release
    pub fn artifact_hits(&self) -> usize {
        self.artifacts.iter().map(Mock::hits).sum()
    }
}

pub struct MockDist {
    pub server: MockServer,
}

impl MockDist {
    pub fn start() -> Self {
        Self {
            server: MockServer::start(),
        }
    }

    pub fn base_url(&self) -> String {
        self.server.url("/dist")
    }

    pub fn naming(&self) -> NamingPolicy {
        NamingPolicy::new(self.base_url(), "node")
    }

    /// Serve `index.json` with the given raw JSON body
    pub fn serve_index(&self, body: impl Into<String>) -> Mock<'_> {
        let body = body.into();
        self.server.mock(move |when, then| {
            when.method(GET).path("/dist/index.json");
            then.status(200)
                .header("content-type", "application/json; charset=utf-8")
                .body(body);
        })
    }

    /// Serve a manifest listing every artifact plus the archives themselves
    pub fn serve_release(&self, version: &str, artifacts: &[Artifact]) -> ServedRelease<'_> {
        let manifest_body: String = artifacts
            .iter()
            .map(|a| format!("{}  {}\n", a.digest(), a.file_name))
            .collect();
        self.serve_release_with_manifest(version, manifest_body, artifacts)
    }

    /// Serve archives alongside an arbitrary manifest body
    pub fn serve_release_with_manifest(
        &self,
        version: &str,
        manifest_body: String,
        artifacts: &[Artifact],
    ) -> ServedRelease<'_> {
        let manifest_path = format!("/dist/v{version}/SHASUMS256.txt");
        let manifest = self.server.mock(move |when, then| {
            when.method(GET).path(manifest_path);
            then.status(200)
                .header("content-type", "text/plain")
                .body(manifest_body);
        });

        let artifacts = artifacts
            .iter()
            .map(|artifact| {
                let path = format!("/dist/v{version}/{}", artifact.file_name);
                let body = artifact.body.clone();
                self.server.mock(move |when, then| {
                    when.method(GET).path(path);
                    then.status(200).body(body);
                })
            })
            .collect();

        ServedRelease {
            manifest,
            artifacts,
        }
    }

    pub fn session_config(&self, cache_root: &Path, platform: PlatformConfig) -> SessionConfig {
        SessionConfig::new(cache_root)
            .with_naming(self.naming())
            .with_platform(platform)
            .with_net(NetConfig::for_tool("relget", "0.0.0-test"))
    }
}

/// The two archives a Linux x64 session needs for `version`
pub fn linux_release(version: &str) -> Vec<Artifact> {
    vec![
        Artifact::new(
            format!("node-v{version}-linux-x64.tar.gz"),
            format!("linux x64 build of {version}"),
        ),
        Artifact::new(
            format!("node-v{version}.tar.gz"),
            format!("source tree of {version}"),
        ),
    ]
}

/// Collect every event already queued on the receiver
pub fn drain(rx: &mut EventReceiver) -> Vec<AppEvent> {
    std::iter::from_fn(|| rx.try_recv().ok()).collect()
}

pub fn recorder() -> std::sync::Arc<RecordingInstaller> {
    std::sync::Arc::new(RecordingInstaller::new())
}

//! Command line interface definition

use clap::Parser;
use std::path::PathBuf;

/// relget - resolve, download and verify release artifacts
#[derive(Parser, Debug)]
#[command(name = "relget")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Resolve a version range against a release mirror and fetch verified artifacts")]
#[command(long_about = None)]
pub struct Cli {
    /// Version range to resolve (e.g. `20.x`, `^18.17`, `>=16 <19`, `latest`)
    pub selector: String,

    /// Install target handed to the installation step
    pub target: PathBuf,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Options that override configuration
#[derive(Parser, Debug)]
pub struct GlobalArgs {
    /// Target platform identifier (linux, darwin, win, ...)
    #[arg(long)]
    pub platform: Option<String>,

    /// Target architecture identifier (x64, arm64, ...)
    #[arg(long)]
    pub arch: Option<String>,

    /// Cache root directory
    #[arg(long, value_name = "PATH")]
    pub cache_dir: Option<PathBuf>,

    /// Release mirror base URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Use alternate config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Abort the session after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub deadline: Option<u64>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

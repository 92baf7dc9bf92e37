//! relget - resolve, download and verify release artifacts
//!
//! This binary wires configuration, logging and one install session
//! together. The session itself lives in the `relget-install` crate.

mod cli;
mod error;
mod logging;

use crate::cli::{Cli, GlobalArgs};
use crate::error::CliError;
use clap::Parser;
use relget_config::Config;
use relget_events::EventReceiver;
use relget_install::{InstallSession, InstallationResult, RecordingInstaller, SessionConfig};
use serde::Serialize;
use std::future::Future;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tokio::select;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    init_tracing(json_mode, cli.global.debug);

    if let Err(e) = run(cli).await {
        error!("Application error: {}", e);
        if json_mode {
            let failure = JsonFailure {
                error: e.to_string(),
                code: e.code(),
            };
            if let Ok(rendered) = serde_json::to_string_pretty(&failure) {
                println!("{rendered}");
            }
        } else {
            eprintln!("Error: {e}");
        }
        process::exit(1);
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    info!("Starting relget v{}", env!("CARGO_PKG_VERSION"));

    // Precedence: defaults < file < environment < CLI flags
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;
    config.merge_env()?;
    apply_cli_config(&mut config, &cli.global);
    config.validate()?;

    let (event_sender, event_receiver) = relget_events::channel();

    let session = InstallSession::new(
        &cli.selector,
        cli.target,
        SessionConfig::from_config(&config, env!("CARGO_PKG_VERSION"))?,
        Arc::new(RecordingInstaller::new()),
        Some(event_sender),
    )?;

    let deadline = config.deadline();
    let install = async {
        match deadline {
            Some(limit) => session.install_with_deadline(limit).await,
            None => session.install().await,
        }
    };

    let result = run_with_events(install, event_receiver).await?;
    render_result(&result, cli.global.json)?;

    info!("Session completed successfully");
    Ok(())
}

/// Drive the session while logging its events as they arrive
async fn run_with_events<F>(
    session: F,
    mut event_receiver: EventReceiver,
) -> Result<InstallationResult, CliError>
where
    F: Future<Output = Result<InstallationResult, relget_errors::Error>>,
{
    let mut session = Box::pin(session);
    let mut events_open = true;

    loop {
        select! {
            result = &mut session => {
                // Drain any remaining events
                while let Ok(event) = event_receiver.try_recv() {
                    logging::log_event_with_tracing(&event);
                }
                return result.map_err(CliError::from);
            }

            event = event_receiver.recv(), if events_open => {
                match event {
                    Some(event) => logging::log_event_with_tracing(&event),
                    None => events_open = false,
                }
            }
        }
    }
}

/// Apply CLI flags on top of file and environment configuration
fn apply_cli_config(config: &mut Config, global: &GlobalArgs) {
    if let Some(platform) = &global.platform {
        config.platform.platform = Some(platform.clone());
    }
    if let Some(arch) = &global.arch {
        config.platform.arch = Some(arch.clone());
    }
    if let Some(cache_dir) = &global.cache_dir {
        config.paths.cache_dir = Some(cache_dir.clone());
    }
    if let Some(base_url) = &global.base_url {
        config.dist.base_url.clone_from(base_url);
    }
    if let Some(deadline) = global.deadline {
        config.network.deadline = Some(deadline);
    }
}

#[derive(Serialize)]
struct JsonResult {
    version: String,
    target: PathBuf,
    installer: PathBuf,
    source: PathBuf,
}

#[derive(Serialize)]
struct JsonFailure {
    error: String,
    code: Option<&'static str>,
}

fn render_result(result: &InstallationResult, json: bool) -> Result<(), CliError> {
    if json {
        let rendered = serde_json::to_string_pretty(&JsonResult {
            version: result.version.to_string(),
            target: result.target.clone(),
            installer: result.installer.path.clone(),
            source: result.source.path.clone(),
        })?;
        println!("{rendered}");
    } else {
        println!("Resolved {}", result.version);
        for path in result.artifact_paths() {
            println!("  {}", path.display());
        }
    }
    Ok(())
}

/// Initialize tracing/logging
///
/// Logs go to stderr so stdout only carries the result.
fn init_tracing(json_mode: bool, debug_enabled: bool) {
    let default_filter = if debug_enabled {
        "debug,relget=debug"
    } else {
        "info,relget=info"
    };

    let filter = if debug_enabled {
        tracing_subscriber::EnvFilter::new(default_filter)
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter))
    };

    if json_mode {
        tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags_override_config() {
        let cli = Cli::try_parse_from([
            "relget",
            "^18",
            "/tmp/target",
            "--base-url",
            "http://127.0.0.1:9000/dist",
            "--cache-dir",
            "/tmp/relget-cache",
            "--arch",
            "arm64",
        ])
        .unwrap();

        let mut config = Config::default();
        config.platform.platform = Some("linux".to_string());
        apply_cli_config(&mut config, &cli.global);

        assert_eq!(config.dist.base_url, "http://127.0.0.1:9000/dist");
        assert_eq!(
            config.cache_root().unwrap(),
            PathBuf::from("/tmp/relget-cache")
        );
        assert_eq!(config.platform_config().to_string(), "linux-arm64");
        assert!(config.deadline().is_none());
    }
}

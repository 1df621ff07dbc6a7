use anyhow::{Context, Result};
use clap::Parser;
use common::{FileConfigStore, WallpaperDirs};
use std::process::ExitCode;
use wallrot::args::BLOCK_BUTTON_VAR;
use wallrot::{Action, Cli, Rotator, SystemDesktop};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let action = match Cli::try_parse() {
        Ok(cli) => cli.action(std::env::var_os(BLOCK_BUTTON_VAR).as_deref()),
        Err(e) => {
            log::debug!("{}", e);
            Action::Invalid
        }
    };

    match run(action).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(action: Action) -> Result<()> {
    wallrot::print_reply(&action, &mut std::io::stdout())
        .context("Failed to write to stdout")?;

    if !action.needs_desktop() {
        return Ok(());
    }

    let description = match &action {
        Action::Status { .. } => "status-bar update",
        Action::Daemon { .. } => "daemon",
        Action::SetMode(_) => "mode switch",
        Action::Invalid => "invalid option",
    };

    let config_path = common::default_config_path()
        .with_context(|| format!("{} failed", description))?;
    let home = common::home_dir().with_context(|| format!("{} failed", description))?;

    let mut rotator = Rotator::new(
        FileConfigStore::new(config_path),
        SystemDesktop::default(),
        WallpaperDirs::from_home(home),
    );

    rotator
        .execute(action, shutdown_signal())
        .await
        .with_context(|| format!("{} failed", description))
}

/// Resolves on SIGTERM or SIGINT
async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let (Ok(mut sigterm), Ok(mut sigint)) = (
        signal(SignalKind::terminate()),
        signal(SignalKind::interrupt()),
    ) else {
        log::warn!("Failed to set up signal handlers, stop the daemon with SIGKILL");
        return std::future::pending().await;
    };

    tokio::select! {
        _ = sigterm.recv() => {
            log::info!("Received SIGTERM, shutting down...");
        }
        _ = sigint.recv() => {
            log::info!("Received SIGINT, shutting down...");
        }
    }
}

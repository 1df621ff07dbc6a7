use common::{ConfigStore, Mode, WallpaperDirs, WallpaperError, list_images};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::args::Action;
use crate::desktop::Desktop;

/// Printed on every status-bar poll
pub const STATUS_GLYPH: &str = " 📀 ";

/// Outcome of one rotation cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RotationReport {
    pub applied: usize,
    pub failed: usize,
}

/// Sequences config, catalog and desktop calls for each command
pub struct Rotator<S, D> {
    store: S,
    desktop: D,
    dirs: WallpaperDirs,
    rng: StdRng,
}

impl<S: ConfigStore, D: Desktop> Rotator<S, D> {
    pub fn new(store: S, desktop: D, dirs: WallpaperDirs) -> Self {
        Self {
            store,
            desktop,
            dirs,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Use a fixed seed for image selection
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn desktop(&self) -> &D {
        &self.desktop
    }

    /// Wallpaper directory for the mode currently on disk
    pub fn current_dir(&self) -> PathBuf {
        let config = self.store.load();
        self.dirs.directory_for(&config).to_path_buf()
    }

    /// Dispatch one parsed invocation: [`print_reply`], then [`Self::execute`]
    pub async fn run<W, F>(
        &mut self,
        action: Action,
        out: &mut W,
        shutdown: F,
    ) -> Result<(), WallpaperError>
    where
        W: Write,
        F: Future<Output = ()>,
    {
        print_reply(&action, out)?;
        self.execute(action, shutdown).await
    }

    /// The config and desktop side of an invocation, without stdout
    pub async fn execute<F>(&mut self, action: Action, shutdown: F) -> Result<(), WallpaperError>
    where
        F: Future<Output = ()>,
    {
        match action {
            Action::Status { clicked: true } => {
                self.notify("Changing the wallpaper...").await;
                self.rotate().await?;
            }
            Action::Daemon { interval } => self.daemon(interval, shutdown).await?,
            Action::SetMode(mode) => {
                self.switch_mode(mode).await?;
            }
            Action::Status { clicked: false } | Action::Invalid => {}
        }

        Ok(())
    }

    /// Persist `mode`, announce it, and rotate once from the new directory
    pub async fn switch_mode(&mut self, mode: Mode) -> Result<RotationReport, WallpaperError> {
        let mut config = self.store.load();
        config.mode = mode;
        if self.store.save(&config) {
            log::info!("Mode set to {}", mode);
        }

        self.notify(&format!("Switched to {} wallpapers", mode)).await;
        self.rotate().await
    }

    /// One rotation cycle: a random catalog image on every active output.
    ///
    /// An empty catalog is logged and skipped without querying outputs. A
    /// missing directory or a failed output query is returned to the caller.
    pub async fn rotate(&mut self) -> Result<RotationReport, WallpaperError> {
        let directory = self.current_dir();
        let images = list_images(&directory)?;

        if images.is_empty() {
            log::error!("{}", WallpaperError::EmptyCatalog(directory));
            return Ok(RotationReport::default());
        }

        let outputs = self.desktop.list_outputs().await?;
        let mut report = RotationReport::default();

        for output in &outputs {
            let Some(image) = images.choose(&mut self.rng) else {
                break;
            };

            if self.apply(image, &output.name).await {
                report.applied += 1;
            } else {
                report.failed += 1;
            }
        }

        log::info!(
            "Rotation from {}: {} output(s) set, {} failed",
            directory.display(),
            report.applied,
            report.failed
        );
        Ok(report)
    }

    /// Set one output's wallpaper, logging instead of failing
    pub async fn apply(&self, image: &Path, output: &str) -> bool {
        match self.desktop.set_wallpaper(image, output).await {
            Ok(()) => {
                log::info!("Wallpaper set on {}: {}", output, image.display());
                true
            }
            Err(e) => {
                log::error!("Error setting wallpaper on {}: {}", output, e);
                false
            }
        }
    }

    /// Best-effort desktop notification
    pub async fn notify(&self, message: &str) -> bool {
        match self.desktop.notify(message).await {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Error sending notification '{}': {}", message, e);
                false
            }
        }
    }

    /// Rotate every `interval` until `shutdown` resolves.
    ///
    /// Failed cycles are logged and the loop keeps going.
    pub async fn daemon<F>(
        &mut self,
        interval: Duration,
        shutdown: F,
    ) -> Result<(), WallpaperError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        // A hung tool call must not outlive the signal
        tokio::select! {
            _ = &mut shutdown => {
                log::info!("Wallpaper rotation daemon stopped");
            }
            _ = self.cycles(interval) => {}
        }

        Ok(())
    }

    async fn cycles(&mut self, interval: Duration) {
        self.notify("Initialized daemon").await;
        log::info!(
            "Starting wallpaper rotation daemon with interval {} seconds",
            interval.as_secs()
        );

        if let Err(e) = self.desktop.start_daemon() {
            log::warn!("Error starting swww daemon: {}", e);
        }

        loop {
            if let Err(e) = self.rotate().await {
                log::error!("Rotation failed: {}", e);
            }
            tokio::time::sleep(interval).await;
        }
    }
}

/// What an invocation prints on stdout.
///
/// Needs neither config nor home directory, so a status-bar poll always
/// gets its glyph.
pub fn print_reply<W: Write>(action: &Action, out: &mut W) -> std::io::Result<()> {
    match action {
        Action::Status { .. } => writeln!(out, "{}", STATUS_GLYPH)?,
        Action::Invalid => writeln!(out, "Invalid option!")?,
        Action::Daemon { .. } | Action::SetMode(_) => return Ok(()),
    }
    out.flush()
}

//! External tools wallrot drives: the compositor output query, the swww
//! daemon and client, and the desktop notifier.

use common::{Output, WallpaperError, parse_outputs};
use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Notification display time in milliseconds
pub const NOTIFY_TIMEOUT_MS: u32 = 1000;

/// The desktop-side operations a rotation needs.
///
/// Every call is awaited to completion before the next one starts, except
/// [`Desktop::start_daemon`], which only launches its process.
#[allow(async_fn_in_trait)]
pub trait Desktop {
    /// Enumerate the active outputs
    async fn list_outputs(&self) -> Result<Vec<Output>, WallpaperError>;

    /// Apply `image` to the output called `output`, cropping to fill
    async fn set_wallpaper(&self, image: &Path, output: &str) -> Result<(), WallpaperError>;

    async fn notify(&self, message: &str) -> Result<(), WallpaperError>;

    /// Launch the wallpaper daemon helper and return without waiting on it
    fn start_daemon(&self) -> Result<(), WallpaperError>;
}

/// Program names for each tool, looked up on `PATH`
#[derive(Debug, Clone)]
pub struct SystemDesktop {
    pub randr: String,
    pub swww: String,
    pub swww_daemon: String,
    pub notifier: String,
}

impl Default for SystemDesktop {
    fn default() -> Self {
        Self {
            randr: "wlr-randr".to_string(),
            swww: "swww".to_string(),
            swww_daemon: "swww-daemon".to_string(),
            notifier: "notify-send".to_string(),
        }
    }
}

impl SystemDesktop {
    pub fn randr_args() -> Vec<OsString> {
        vec!["--json".into()]
    }

    pub fn swww_args(image: &Path, output: &str) -> Vec<OsString> {
        vec![
            "img".into(),
            "--outputs".into(),
            output.into(),
            "--resize".into(),
            "crop".into(),
            image.into(),
        ]
    }

    pub fn notify_args(message: &str) -> Vec<OsString> {
        vec!["-t".into(), NOTIFY_TIMEOUT_MS.to_string().into(), message.into()]
    }

    /// Run `program` to completion and fail on a non-zero exit
    async fn run(program: &str, args: Vec<OsString>) -> Result<Vec<u8>, WallpaperError> {
        log::debug!("Running {} {:?}", program, args);

        let output = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| WallpaperError::subprocess(program, format!("failed to start: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match stderr.trim() {
                "" => output.status.to_string(),
                msg => format!("{}: {}", output.status, msg),
            };
            return Err(WallpaperError::subprocess(program, reason));
        }

        Ok(output.stdout)
    }
}

impl Desktop for SystemDesktop {
    async fn list_outputs(&self) -> Result<Vec<Output>, WallpaperError> {
        let stdout = Self::run(&self.randr, Self::randr_args())
            .await
            .map_err(|e| WallpaperError::Query(e.to_string()))?;

        parse_outputs(&String::from_utf8_lossy(&stdout))
    }

    async fn set_wallpaper(&self, image: &Path, output: &str) -> Result<(), WallpaperError> {
        Self::run(&self.swww, Self::swww_args(image, output)).await?;
        Ok(())
    }

    async fn notify(&self, message: &str) -> Result<(), WallpaperError> {
        Self::run(&self.notifier, Self::notify_args(message)).await?;
        Ok(())
    }

    fn start_daemon(&self) -> Result<(), WallpaperError> {
        // The child is dropped unsupervised; it keeps running after this returns
        let child = Command::new(&self.swww_daemon)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .spawn()
            .map_err(|e| {
                WallpaperError::subprocess(&self.swww_daemon, format!("failed to start: {}", e))
            })?;

        log::info!(
            "Started {} (pid {})",
            self.swww_daemon,
            child.id().unwrap_or_default()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_swww_args() {
        let args = SystemDesktop::swww_args(&PathBuf::from("/walls/a b.png"), "DP-1");
        assert_eq!(
            args,
            ["img", "--outputs", "DP-1", "--resize", "crop", "/walls/a b.png"]
                .map(OsString::from)
                .to_vec()
        );
    }

    #[test]
    fn test_notify_args() {
        let args = SystemDesktop::notify_args("Initialized daemon");
        assert_eq!(
            args,
            ["-t", "1000", "Initialized daemon"].map(OsString::from).to_vec()
        );
    }

    #[test]
    fn test_randr_args() {
        assert_eq!(SystemDesktop::randr_args(), vec![OsString::from("--json")]);
    }

    #[tokio::test]
    async fn test_missing_program_is_error() {
        let desktop = SystemDesktop {
            randr: "wallrot-test-no-such-randr".to_string(),
            swww: "wallrot-test-no-such-swww".to_string(),
            swww_daemon: "wallrot-test-no-such-daemon".to_string(),
            notifier: "wallrot-test-no-such-notifier".to_string(),
        };

        assert!(matches!(
            desktop.list_outputs().await,
            Err(WallpaperError::Query(_))
        ));
        assert!(matches!(
            desktop.set_wallpaper(Path::new("/tmp/a.png"), "DP-1").await,
            Err(WallpaperError::Subprocess { .. })
        ));
        assert!(matches!(
            desktop.notify("hello").await,
            Err(WallpaperError::Subprocess { .. })
        ));
        assert!(desktop.start_daemon().is_err());
    }
}

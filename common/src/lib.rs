//! Common types and utilities for wallrot.
//!
//! This crate holds everything that does not touch a subprocess: the persisted
//! [`Config`] and its [`ConfigStore`] implementations, the wallpaper directory
//! rule and image catalog, and the parser for the compositor's output list.
//! The `wallrot` binary builds the orchestration on top of it.
//!
//! # Examples
//!
//! ```no_run
//! use common::{ConfigStore, FileConfigStore, WallpaperDirs};
//!
//! let store = FileConfigStore::new(common::default_config_path()?);
//! let config = store.load();
//!
//! let dirs = WallpaperDirs::from_home(common::home_dir()?);
//! let images = common::list_images(dirs.directory_for(&config))?;
//! println!("{} candidate wallpapers", images.len());
//! # Ok::<(), common::WallpaperError>(())
//! ```

mod catalog;
mod config;
mod output;

pub use catalog::{IMAGE_EXTENSIONS, WallpaperDirs, is_image, list_images};
pub use config::{Config, ConfigStore, FileConfigStore, MemoryConfigStore, Mode};
pub use output::{Output, parse_outputs};

use std::path::PathBuf;
use thiserror::Error;

/// Name of the config file inside the user's config directory.
pub const CONFIG_FILE_NAME: &str = "swww-script.json";

/// Error types shared between the library and the binary.
#[derive(Error, Debug)]
pub enum WallpaperError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("No images found in directory {}", .0.display())]
    EmptyCatalog(PathBuf),

    #[error("Wallpaper directory {} does not exist", .0.display())]
    DirectoryMissing(PathBuf),

    #[error("Output query failed: {0}")]
    Query(String),

    #[error("{program} failed: {reason}")]
    Subprocess { program: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WallpaperError {
    /// Convenience constructor for a failed external tool
    pub fn subprocess(program: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Subprocess {
            program: program.into(),
            reason: reason.into(),
        }
    }
}

/// Config file path helper
pub fn default_config_path() -> Result<PathBuf, WallpaperError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| WallpaperError::Config("Failed to get config directory".to_string()))?;

    Ok(config_dir.join(CONFIG_FILE_NAME))
}

/// Home directory helper, the root of both wallpaper directories
pub fn home_dir() -> Result<PathBuf, WallpaperError> {
    dirs::home_dir()
        .ok_or_else(|| WallpaperError::Config("Failed to get home directory".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path() {
        if let Ok(path) = default_config_path() {
            assert!(path.ends_with("swww-script.json"));
        }
    }

    #[test]
    fn test_error_messages() {
        let err = WallpaperError::EmptyCatalog(PathBuf::from("/walls"));
        assert_eq!(err.to_string(), "No images found in directory /walls");

        let err = WallpaperError::DirectoryMissing(PathBuf::from("/nope"));
        assert_eq!(err.to_string(), "Wallpaper directory /nope does not exist");

        let err = WallpaperError::subprocess("swww", "exit status: 1");
        assert_eq!(err.to_string(), "swww failed: exit status: 1");
    }

    #[test]
    fn test_wallpaper_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let wall_err: WallpaperError = io_err.into();
        assert!(matches!(wall_err, WallpaperError::Io(_)));
    }
}

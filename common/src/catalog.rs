use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{Config, Mode, WallpaperError};

/// File extensions treated as wallpapers, matched case-insensitively
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp"];

/// The two mode-selected wallpaper directories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallpaperDirs {
    pub static_dir: PathBuf,
    pub dynamic_dir: PathBuf,
}

impl WallpaperDirs {
    /// `~/Pictures/Static_Wallpapers` and `~/Pictures/Dynamic_Wallpapers`
    pub fn from_home(home: impl AsRef<Path>) -> Self {
        let pictures = home.as_ref().join("Pictures");
        Self {
            static_dir: pictures.join("Static_Wallpapers"),
            dynamic_dir: pictures.join("Dynamic_Wallpapers"),
        }
    }

    /// Directory for the configured mode. Does not check that it exists.
    pub fn directory_for(&self, config: &Config) -> &Path {
        self.directory_for_mode(config.mode)
    }

    pub fn directory_for_mode(&self, mode: Mode) -> &Path {
        match mode {
            Mode::Static => &self.static_dir,
            Mode::Dynamic => &self.dynamic_dir,
        }
    }
}

/// Check if a path has one of the [`IMAGE_EXTENSIONS`]
pub fn is_image(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// List the image files directly inside `directory`.
///
/// The result is in directory-listing order, which is unspecified. An empty
/// vector means the directory holds no images; a missing directory is
/// [`WallpaperError::DirectoryMissing`].
pub fn list_images(directory: impl AsRef<Path>) -> Result<Vec<PathBuf>, WallpaperError> {
    let directory = directory.as_ref();

    let entries = fs::read_dir(directory).map_err(|e| match e.kind() {
        ErrorKind::NotFound => WallpaperError::DirectoryMissing(directory.to_path_buf()),
        _ => WallpaperError::Io(e),
    })?;

    let mut images = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();

        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            continue;
        }
        if is_image(&path) {
            images.push(path);
        }
    }

    log::debug!("Found {} image(s) in {}", images.len(), directory.display());
    Ok(images)
}

use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::WallpaperError;

/// Wallpaper source selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Static,
    #[default]
    Dynamic,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Persisted configuration.
///
/// Keys other than `mode` are kept in `extra` so that saving never drops
/// something another tool wrote into the same file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub mode: Mode,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Config {
    pub fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }
}

/// Load/save access to the persisted [`Config`].
///
/// `load` never fails: any problem is logged and the default config is
/// returned. `save` reports success as a bool after logging the failure.
pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, config: &Config) -> bool;
}

/// JSON file at a fixed path. No locking; the last writer wins.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file, surfacing every failure
    pub fn try_load(&self) -> Result<Config, WallpaperError> {
        let contents = fs::read_to_string(&self.path)?;
        serde_json::from_str(&contents).map_err(|e| {
            WallpaperError::Config(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }

    /// Write the config, creating the parent directory first
    pub fn try_save(&self, config: &Config) -> Result<(), WallpaperError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string(config)
            .map_err(|e| WallpaperError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&self.path, json)?;

        Ok(())
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        match self.try_load() {
            Ok(config) => {
                log::debug!("Loaded config from {} ({})", self.path.display(), config.mode);
                config
            }
            Err(WallpaperError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!(
                    "Config file not found at {}, using defaults",
                    self.path.display()
                );
                Config::default()
            }
            Err(e) => {
                log::error!("Error loading config: {}", e);
                Config::default()
            }
        }
    }

    fn save(&self, config: &Config) -> bool {
        match self.try_save(config) {
            Ok(()) => {
                log::debug!("Saved config to {}", self.path.display());
                true
            }
            Err(e) => {
                log::error!("Error saving config to {}: {}", self.path.display(), e);
                false
            }
        }
    }
}

/// In-memory store used by tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    config: RefCell<Option<Config>>,
    saves: Cell<usize>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config: RefCell::new(Some(config)),
            saves: Cell::new(0),
        }
    }

    /// The last saved config, if any was ever set
    pub fn stored(&self) -> Option<Config> {
        self.config.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Config {
        self.config.borrow().clone().unwrap_or_default()
    }

    fn save(&self, config: &Config) -> bool {
        *self.config.borrow_mut() = Some(config.clone());
        self.saves.set(self.saves.get() + 1);
        true
    }
}

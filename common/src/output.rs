use serde::Deserialize;

use crate::WallpaperError;

/// Output (monitor) as reported by `wlr-randr --json`.
///
/// Only the fields wallrot uses are read; everything else in the JSON
/// (modes, position, scale, ...) is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Output {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Output {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            enabled: true,
        }
    }
}

/// Parse the JSON array printed by `wlr-randr --json`, keeping enabled outputs
pub fn parse_outputs(json: &str) -> Result<Vec<Output>, WallpaperError> {
    let outputs: Vec<Output> = serde_json::from_str(json)
        .map_err(|e| WallpaperError::Query(format!("Unparseable output list: {}", e)))?;

    Ok(outputs
        .into_iter()
        .filter(|output| {
            if !output.enabled {
                log::debug!("Skipping disabled output {}", output.name);
            }
            output.enabled
        })
        .collect())
}

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a config file when `--config` is not given.
pub const CONFIG_ENV: &str = "PALETTATOR_CONFIG";

/// Config file picked up from the working directory as a last resort.
pub const DEFAULT_CONFIG_FILE: &str = "palettator.yaml";

/// Application configuration loaded from palettator.yaml
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub palette: PaletteConfig,
}

/// Extraction, swatch layout and output settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PaletteConfig {
    /// Number of colors to extract per image
    #[serde(default = "default_palette_size")]
    pub palette_size: usize,

    /// Swatch width in pixels
    #[serde(default = "default_square")]
    pub square_x: u32,

    /// Swatch height in pixels
    #[serde(default = "default_square")]
    pub square_y: u32,

    /// Swatches per row
    #[serde(default = "default_columns")]
    pub columns: u32,

    #[serde(default = "default_title_size")]
    pub title_size: u32,

    #[serde(default = "default_subtitle_size")]
    pub subtitle_size: u32,

    /// Font file for the hex label
    #[serde(default = "default_title_font")]
    pub title_font: PathBuf,

    /// Font file for the percentage label
    #[serde(default = "default_subtitle_font")]
    pub subtitle_font: PathBuf,

    /// Downscale images before extraction
    #[serde(default = "default_resize")]
    pub resize: bool,

    /// Directory receiving swatch images and exports
    #[serde(default = "default_save_path")]
    pub save_path: PathBuf,
}

fn default_palette_size() -> usize {
    9
}

fn default_square() -> u32 {
    100
}

fn default_columns() -> u32 {
    3
}

fn default_title_size() -> u32 {
    18
}

fn default_subtitle_size() -> u32 {
    14
}

fn default_title_font() -> PathBuf {
    PathBuf::from("fonts/Lato-Black.ttf")
}

fn default_subtitle_font() -> PathBuf {
    PathBuf::from("fonts/Lato-Regular.ttf")
}

fn default_resize() -> bool {
    true
}

fn default_save_path() -> PathBuf {
    PathBuf::from("output")
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            palette_size: default_palette_size(),
            square_x: default_square(),
            square_y: default_square(),
            columns: default_columns(),
            title_size: default_title_size(),
            subtitle_size: default_subtitle_size(),
            title_font: default_title_font(),
            subtitle_font: default_subtitle_font(),
            resize: default_resize(),
            save_path: default_save_path(),
        }
    }
}

impl AppConfig {
    /// Pick the config file: explicit path, then `PALETTATOR_CONFIG`, then
    /// `./palettator.yaml` if it exists.
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        local.exists().then_some(local)
    }

    /// Load configuration from a file, falling back to defaults on any problem.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config file, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "Loaded configuration");
                    config
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), %e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), %e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty file deserializes to unit, not to a map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }
}

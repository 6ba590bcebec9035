use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Application configuration
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub keys: KeyConfig,
    pub overlay: OverlayConfig,
    pub highlight: HighlightConfig,
    pub ui: UiConfig,
}

/// Shortcut chords, written like "Alt+Shift+O"
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct KeyConfig {
    pub toggle: String,
    pub next: String,
    pub prev: String,
    pub activate: String,
    pub exit: String,
    pub refresh: String,
}

/// Where the control panel floats
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct OverlayConfig {
    pub corner: Corner,
}

/// Look of the marker drawn around the current element
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct HighlightConfig {
    /// "#rrggbb"
    pub color: String,
    /// Outline width (in pixels)
    pub width: f32,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct UiConfig {
    /// "dark" or "light"
    pub theme: String,
    /// Size of the page font (in points)
    pub font_size: f32,
    /// Animate scrolling to the highlighted element
    pub smooth_scroll: bool,
}

impl Default for KeyConfig {
    fn default() -> Self {
        KeyConfig {
            toggle: "Alt+Shift+O".to_string(),
            next: "Alt+J".to_string(),
            prev: "Alt+K".to_string(),
            activate: "Alt+Enter".to_string(),
            exit: "Escape".to_string(),
            refresh: "Alt+R".to_string(),
        }
    }
}

impl Default for HighlightConfig {
    fn default() -> Self {
        HighlightConfig {
            color: "#ffb020".to_string(),
            width: 3.0,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            theme: "dark".to_string(),
            font_size: 14.0,
            smooth_scroll: true,
        }
    }
}

impl HighlightConfig {
    pub fn rgb(&self) -> Result<[u8; 3]> {
        parse_hex_color(&self.color)
    }
}

fn parse_hex_color(color: &str) -> Result<[u8; 3]> {
    let hex = color
        .strip_prefix('#')
        .filter(|h| h.len() == 6 && h.is_ascii())
        .ok_or_else(|| Error::Color(color.to_string()))?;
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| Error::Color(color.to_string()))
    };
    Ok([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "onehand")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from the default location, or defaults
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_or_default(&path),
            _ => Config::default(),
        }
    }

    /// Load from an explicit file, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(config) => {
                info!(path = %path.display(), "loaded config");
                config
            }
            Err(e) => {
                warn!("{e}; using default configuration");
                Config::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        toml::from_str(&contents).map_err(|source| Error::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(|e| Error::io(path, e))
    }

    /// Create a default config file if it doesn't exist
    pub fn create_default() -> Result<()> {
        if let Some(path) = Self::config_path() {
            if !path.exists() {
                Config::default().save_to(&path)?;
                info!(path = %path.display(), "wrote default config");
            }
        }
        Ok(())
    }
}

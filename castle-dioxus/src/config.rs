//! Desktop configuration for the Castle.
//!
//! Configuration is loaded from `<config dir>/castle/castle.toml` and provides
//! window, logging and map settings. Every section and field is optional;
//! missing values fall back to the defaults below.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use etcetera::base_strategy::{choose_base_strategy, BaseStrategy};
use serde::Deserialize;

/// Configuration loaded from `castle.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CastleConfig {
    pub window: WindowConfig,
    pub logging: LoggingConfig,
    pub map: MapConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_file: Option<PathBuf>,
    pub level: String,
    pub suppressed_patterns: Vec<String>,
}

/// Map screen configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Image painted behind the targets; the bundled area map when unset.
    pub image: Option<String>,
    pub center: MapCenter,
    pub zoom: f64,
    /// TOML file with `[[target]]` entries; the bundled targets when unset.
    pub targets: Option<PathBuf>,
}

/// Geographic centre shown in the area screen's HUD.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MapCenter {
    pub lat: f64,
    pub lng: f64,
}

impl MapCenter {
    /// Parse `lat,lng`. Both parts must be finite numbers.
    pub fn parse(value: &str) -> Option<Self> {
        let (lat, lng) = value.split_once(',')?;
        let lat = lat.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
        let lng = lng.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
        Some(Self { lat, lng })
    }
}

impl Default for MapCenter {
    fn default() -> Self {
        Self {
            lat: 43.6,
            lng: -116.2,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "The Castle".to_string(),
            width: 1280.0,
            height: 800.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_file: Some(std::env::temp_dir().join("castle.log")),
            level: "info".to_string(),
            suppressed_patterns: vec![
                "SelectionDidChange".to_string(),
                "Dispatched unknown event".to_string(),
                "mousemove".to_string(),
                "pointermove".to_string(),
            ],
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            image: None,
            center: MapCenter::default(),
            zoom: 11.0,
            targets: None,
        }
    }
}

/// Directory holding `castle.toml`, under the platform's config base.
///
/// `None` when no home directory can be found.
pub fn config_dir() -> Option<PathBuf> {
    match choose_base_strategy() {
        Ok(strategy) => Some(strategy.config_dir().join("castle")),
        Err(err) => {
            log::warn!("No config directory: {err}");
            None
        }
    }
}

impl CastleConfig {
    /// Load configuration from the default location.
    ///
    /// Falls back to defaults if the file doesn't exist.
    /// Returns an error only if the file exists but is malformed.
    pub fn load_default() -> Result<Self> {
        match config_dir().map(|dir| dir.join("castle.toml")) {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = toml::from_str::<CastleConfig>(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Set the window title.
    #[must_use]
    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    /// Set the window dimensions.
    #[must_use]
    pub fn with_window_size(mut self, width: f64, height: f64) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    /// Set the log file path.
    #[must_use]
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.logging.log_file = Some(path.into());
        self
    }

    /// Set the log level (e.g., "info", "debug", "warn").
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }

    /// Set the map background image.
    #[must_use]
    pub fn with_map_image(mut self, image: impl Into<String>) -> Self {
        self.map.image = Some(image.into());
        self
    }

    #[must_use]
    pub fn with_map_center(mut self, center: MapCenter) -> Self {
        self.map.center = center;
        self
    }

    #[must_use]
    pub fn with_map_zoom(mut self, zoom: f64) -> Self {
        self.map.zoom = zoom;
        self
    }

    /// Set the targets file.
    #[must_use]
    pub fn with_targets_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.map.targets = Some(path.into());
        self
    }
}

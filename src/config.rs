//! Application configuration.
//!
//! Handles loading, validating, and merging `exifmap.toml`. Stock defaults are
//! the base layer; a user file only needs the keys it wants to change.
//!
//! ## Config File Location
//!
//! `exifmap.toml` in the working directory is picked up automatically. Pass
//! `--config <path>` to use another file; an explicitly named file must exist.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [input]
//! extensions = ["jpg", "jpeg", "png"]  # Accepted file types (case-insensitive)
//!
//! [display]
//! precision = 6             # Decimal places for coordinates (0-15)
//! max_value_width = 80      # Truncate long values in the terminal table
//!
//! [map]
//! url_template = "https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map={zoom}/{lat}/{lon}"
//! zoom = 15                 # Map zoom level (1-19)
//!
//! [export]
//! file_name = "exif_metadata.csv"
//! ```
//!
//! ## Partial Configuration
//!
//! ```toml
//! # Also accept TIFF and WebP files
//! [input]
//! extensions = ["jpg", "jpeg", "png", "tif", "tiff", "webp"]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::coordinates::Location;
use crate::export;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Config file looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "exifmap.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Application configuration loaded from `exifmap.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Which files are accepted as input.
    pub input: InputConfig,
    /// Terminal rendering of the table and coordinates.
    pub display: DisplayConfig,
    /// Map link for located images.
    pub map: MapConfig,
    /// CSV export settings.
    pub export: ExportConfig,
}

impl AppConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "input.extensions must not be empty".into(),
            ));
        }
        if self.display.precision > 15 {
            return Err(ConfigError::Validation(
                "display.precision must be 0-15".into(),
            ));
        }
        if self.display.max_value_width < 8 {
            return Err(ConfigError::Validation(
                "display.max_value_width must be at least 8".into(),
            ));
        }
        if !self.map.url_template.contains("{lat}") || !self.map.url_template.contains("{lon}") {
            return Err(ConfigError::Validation(
                "map.url_template must contain {lat} and {lon}".into(),
            ));
        }
        if !(1..=19).contains(&self.map.zoom) {
            return Err(ConfigError::Validation("map.zoom must be 1-19".into()));
        }
        let name = self.export.file_name.trim();
        if name.is_empty() || name.contains('/') || name.contains('\\') {
            return Err(ConfigError::Validation(
                "export.file_name must be a plain file name".into(),
            ));
        }
        Ok(())
    }
}

/// Accepted input files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// File extensions accepted as input, without the dot.
    pub extensions: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["jpg".into(), "jpeg".into(), "png".into()],
        }
    }
}

/// Terminal display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Decimal places used when printing coordinates.
    pub precision: usize,
    /// Values longer than this many characters are truncated in the table.
    /// The CSV export is never truncated.
    pub max_value_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            precision: 6,
            max_value_width: 80,
        }
    }
}

/// Map link settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapConfig {
    /// URL with `{lat}`, `{lon}` and optional `{zoom}` placeholders.
    pub url_template: String,
    pub zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            url_template:
                "https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map={zoom}/{lat}/{lon}"
                    .to_string(),
            zoom: 15,
        }
    }
}

impl MapConfig {
    /// Fill the template for a location, coordinates at `precision` decimals.
    pub fn url_for(&self, location: &Location, precision: usize) -> String {
        self.url_template
            .replace("{lat}", &format!("{:.*}", precision, location.latitude))
            .replace("{lon}", &format!("{:.*}", precision, location.longitude))
            .replace("{zoom}", &self.zoom.to_string())
    }
}

/// CSV export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// File name used when `export` gets no `--output`.
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: export::DEFAULT_FILE_NAME.to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(AppConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<AppConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: AppConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the effective configuration.
///
/// - `Some(path)`: that file must exist.
/// - `None`: `exifmap.toml` in `cwd` if present, stock defaults otherwise.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<AppConfig, ConfigError> {
    let overlay = match explicit {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            Some(toml::from_str(&content)?)
        }
        None => load_raw_config(&cwd.join(CONFIG_FILE_NAME))?,
    };
    if overlay.is_some() {
        tracing::debug!("merging user config over stock defaults");
    }
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `exifmap.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# exifmap Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file as ./exifmap.toml or pass --config <path>.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Input
# ---------------------------------------------------------------------------
[input]
# File extensions accepted as input (case-insensitive, without the dot).
# The EXIF reader also understands tif, tiff, webp, heic and heif.
extensions = ["jpg", "jpeg", "png"]

# ---------------------------------------------------------------------------
# Terminal display
# ---------------------------------------------------------------------------
[display]
# Decimal places for latitude/longitude (0-15).
precision = 6

# Longer values are truncated with "..." in the table. CSV exports are
# never truncated.
max_value_width = 80

# ---------------------------------------------------------------------------
# Map link
# ---------------------------------------------------------------------------
[map]
# {lat} and {lon} are required; {zoom} is optional.
url_template = "https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map={zoom}/{lat}/{lon}"

# Zoom level (1-19).
zoom = 15

# ---------------------------------------------------------------------------
# CSV export
# ---------------------------------------------------------------------------
[export]
# File name written by `exifmap export` when --output is not given.
file_name = "exif_metadata.csv"
"##
}

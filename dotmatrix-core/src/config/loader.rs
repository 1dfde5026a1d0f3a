//! TOML configuration loading
//!
//! Expected layout:
//!
//! ```toml
//! [panel]
//! rows = 2
//! columns = 16
//! pixel_size = 4
//! pixel_color = "#1a1a1a"   # optional, defaults to black
//! blink_interval_ms = 300   # optional
//! ```

use alloc::string::String;

use dotmatrix_hal::Color;
use serde::Deserialize;

use super::types::{ConfigError, GridConfig, DEFAULT_BLINK_INTERVAL_MS};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Document {
    panel: PanelSection,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PanelSection {
    rows: u32,
    columns: u32,
    pixel_size: u32,
    #[serde(default)]
    pixel_color: Option<String>,
    #[serde(default)]
    blink_interval_ms: Option<u32>,
}

impl GridConfig {
    /// Parse and validate a panel configuration from TOML
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let doc: Document = toml::from_str(input).map_err(|_| ConfigError::Parse)?;
        let panel = doc.panel;

        let pixel_color = match panel.pixel_color.as_deref() {
            Some(s) => Color::from_hex(s).ok_or(ConfigError::InvalidColor)?,
            None => Color::BLACK,
        };

        let config = GridConfig {
            rows: panel.rows,
            columns: panel.columns,
            pixel_size: panel.pixel_size,
            pixel_color,
            blink_interval_ms: panel.blink_interval_ms.unwrap_or(DEFAULT_BLINK_INTERVAL_MS),
        };
        config.validate()?;

        Ok(config)
    }
}

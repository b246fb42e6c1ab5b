//! Terminal rendering settings.

use serde::Deserialize;

use crate::error::{ConfigError, Result};

const MIN_MAP_WIDTH: usize = 8;
const MIN_MAP_HEIGHT: usize = 4;

/// Size of the world map and the marker drawn on it.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Map width in terminal columns.
    #[serde(default = "default_map_width")]
    pub map_width: usize,
    /// Map height in terminal rows.
    #[serde(default = "default_map_height")]
    pub map_height: usize,
    /// Marker radius in cells; 0 draws a single cell.
    #[serde(default = "default_marker_radius")]
    pub marker_radius: usize,
    /// Name shown next to the marker.
    #[serde(default = "default_label")]
    pub label: String,
}

const fn default_map_width() -> usize {
    72
}

const fn default_map_height() -> usize {
    24
}

const fn default_marker_radius() -> usize {
    1
}

fn default_label() -> String {
    "ISS".into()
}

impl DisplayConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.map_width < MIN_MAP_WIDTH || self.map_height < MIN_MAP_HEIGHT {
            return Err(ConfigError::InvalidValue {
                field: "display",
                reason: format!(
                    "map must be at least {MIN_MAP_WIDTH}x{MIN_MAP_HEIGHT}, got {}x{}",
                    self.map_width, self.map_height
                ),
            }
            .into());
        }
        if self.marker_radius * 2 >= self.map_height {
            return Err(ConfigError::InvalidValue {
                field: "display.marker_radius",
                reason: "marker would cover the whole map".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            map_width: default_map_width(),
            map_height: default_map_height(),
            marker_radius: default_marker_radius(),
            label: default_label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn default_display_is_valid() {
        assert!(DisplayConfig::default().validate().is_ok());
    }

    #[test]
    fn oversized_marker_reports_dotted_field() {
        let config = DisplayConfig {
            map_height: 8,
            marker_radius: 4,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::Config(ConfigError::InvalidValue {
                field: "display.marker_radius",
                ..
            }))
        ));
    }
}

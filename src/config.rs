//! Board configuration: grid, zoom, key bindings and palette.
//!
//! Every field has a default from [`crate::consts`], so a host may supply a
//! partial JSON document and only override what it cares about.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts;

/// Errors produced while loading a [`BoardConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed into a config.
    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunables for a board instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Grid spacing at zoom 1, in pixels. Also the unit for circle radii.
    pub grid_gap: f64,
    /// Floor applied to `grid_gap`.
    pub min_grid_gap: f64,
    /// Floor applied to zoom.
    pub min_zoom: f64,
    /// Zoom change per wheel event.
    pub zoom_step: f64,
    /// Radius of dots placed by clicking, in pixels.
    pub dot_radius: f64,
    pub dot_color: String,
    pub preview_dot_color: String,
    pub background_color: String,
    pub grid_color: String,
    pub axis_color: String,
    pub selection_color: String,
    pub label_color: String,
    /// Key name (as reported by the browser) that enters pan mode while held.
    pub pan_key: String,
    /// Key name that makes marquee selection additive.
    pub additive_key: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            grid_gap: consts::GRID_GAP,
            min_grid_gap: consts::MIN_GRID_GAP,
            min_zoom: consts::MIN_ZOOM,
            zoom_step: consts::ZOOM_STEP,
            dot_radius: consts::DOT_RADIUS,
            dot_color: consts::DOT_COLOR.to_owned(),
            preview_dot_color: consts::PREVIEW_DOT_COLOR.to_owned(),
            background_color: consts::BACKGROUND_COLOR.to_owned(),
            grid_color: consts::GRID_COLOR.to_owned(),
            axis_color: consts::AXIS_COLOR.to_owned(),
            selection_color: consts::SELECTION_COLOR.to_owned(),
            label_color: consts::LABEL_COLOR.to_owned(),
            pan_key: consts::PAN_KEY.to_owned(),
            additive_key: consts::ADDITIVE_KEY.to_owned(),
        }
    }
}

impl BoardConfig {
    /// Parse a config from JSON and normalize it with [`Self::validated`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if `json` is not a valid config document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.validated())
    }

    /// Restore defaults for non-positive or non-finite tunables and apply floors.
    #[must_use]
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        if !is_positive(self.min_grid_gap) {
            self.min_grid_gap = defaults.min_grid_gap;
        }
        if !is_positive(self.min_zoom) {
            self.min_zoom = defaults.min_zoom;
        }
        if !is_positive(self.zoom_step) {
            self.zoom_step = defaults.zoom_step;
        }
        if !is_positive(self.dot_radius) {
            self.dot_radius = defaults.dot_radius;
        }
        if !self.grid_gap.is_finite() {
            self.grid_gap = defaults.grid_gap;
        }
        self.grid_gap = self.grid_gap.max(self.min_grid_gap);
        self
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

//! Viewport configuration.
//!
//! Tunables for layout, zoom limits, overlays and pointer throttling. Values can
//! come from defaults, a TOML file, environment variables, or builder calls.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Configuration for the viewport engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Visual gap between stacked or side-by-side pages, in pixels.
    pub page_gap_px: f32,
    /// Lower zoom bound.
    pub min_zoom: f32,
    /// Upper zoom bound.
    pub max_zoom: f32,
    /// Zoom restored by the reset shortcut.
    pub default_zoom: f32,
    /// Multiplicative zoom step for wheel and keyboard (1.1 = 10%)
    pub zoom_step: f32,
    /// Ruler tick spacing in screen pixels.
    pub ruler_tick_px: f32,
    /// Ruler labelled-tick spacing in screen pixels.
    pub ruler_label_px: f32,
    /// Thickness of each ruler strip.
    pub ruler_thickness_px: f32,
    /// Grid spacing in page units at zoom 1.
    pub base_grid_size: f32,
    /// Down-scale factor for thumbnail mode, independent of zoom.
    pub thumbnail_scale: f32,
    /// Grid columns in thumbnail mode.
    pub thumbnail_columns: usize,
    /// Minimum interval between processed pointer moves.
    pub pointer_throttle_ms: u64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            page_gap_px: 16.0,
            min_zoom: 0.25,
            max_zoom: 4.0,
            default_zoom: 1.0,
            zoom_step: 1.1,
            ruler_tick_px: 50.0,
            ruler_label_px: 100.0,
            ruler_thickness_px: 20.0,
            base_grid_size: 20.0,
            thumbnail_scale: 0.2,
            thumbnail_columns: 4,
            pointer_throttle_ms: 16,
        }
    }
}

impl ViewportConfig {
    /// Builder-style page gap.
    pub fn with_page_gap(mut self, gap_px: f32) -> Self {
        self.page_gap_px = gap_px;
        self
    }

    /// Builder-style zoom bounds.
    pub fn with_zoom_range(mut self, min_zoom: f32, max_zoom: f32) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    /// Builder-style grid size.
    pub fn with_base_grid_size(mut self, size: f32) -> Self {
        self.base_grid_size = size;
        self
    }

    /// Builder-style thumbnail scale and column count.
    pub fn with_thumbnails(mut self, scale: f32, columns: usize) -> Self {
        self.thumbnail_scale = scale;
        self.thumbnail_columns = columns;
        self
    }

    /// Builder-style pointer throttle interval.
    pub fn with_pointer_throttle_ms(mut self, ms: u64) -> Self {
        self.pointer_throttle_ms = ms;
        self
    }

    /// Pointer throttle interval as a duration.
    pub fn pointer_throttle(&self) -> Duration {
        Duration::from_millis(self.pointer_throttle_ms)
    }

    /// Clamp a zoom factor to the configured range.
    pub fn clamp_zoom(&self, zoom: f32) -> f32 {
        if zoom.is_nan() {
            return self.default_zoom;
        }
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_zoom <= 0.0 || self.min_zoom > self.max_zoom {
            return Err(ConfigError::InvalidValue("min_zoom".to_string()));
        }
        if !(self.min_zoom..=self.max_zoom).contains(&self.default_zoom) {
            return Err(ConfigError::InvalidValue("default_zoom".to_string()));
        }
        if self.zoom_step <= 1.0 {
            return Err(ConfigError::InvalidValue("zoom_step".to_string()));
        }
        if self.ruler_tick_px <= 0.0 || self.ruler_label_px < self.ruler_tick_px {
            return Err(ConfigError::InvalidValue("ruler_tick_px".to_string()));
        }
        if self.base_grid_size <= 0.0 {
            return Err(ConfigError::InvalidValue("base_grid_size".to_string()));
        }
        if self.thumbnail_scale <= 0.0 {
            return Err(ConfigError::InvalidValue("thumbnail_scale".to_string()));
        }
        if self.thumbnail_columns == 0 {
            return Err(ConfigError::InvalidValue("thumbnail_columns".to_string()));
        }
        if self.page_gap_px < 0.0 {
            return Err(ConfigError::InvalidValue("page_gap_px".to_string()));
        }
        Ok(())
    }

    /// Loads configuration from environment variables over the defaults.
    ///
    /// Environment variables:
    /// - `PDF_EDITOR_PAGE_GAP_PX`
    /// - `PDF_EDITOR_MIN_ZOOM` / `PDF_EDITOR_MAX_ZOOM` / `PDF_EDITOR_DEFAULT_ZOOM`
    /// - `PDF_EDITOR_GRID_SIZE`
    /// - `PDF_EDITOR_THUMBNAIL_SCALE` / `PDF_EDITOR_THUMBNAIL_COLUMNS`
    /// - `PDF_EDITOR_POINTER_THROTTLE_MS`
    ///
    /// # Errors
    /// Returns an error if any variable does not parse or the result is inconsistent.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        read_env("PDF_EDITOR_PAGE_GAP_PX", &mut config.page_gap_px)?;
        read_env("PDF_EDITOR_MIN_ZOOM", &mut config.min_zoom)?;
        read_env("PDF_EDITOR_MAX_ZOOM", &mut config.max_zoom)?;
        read_env("PDF_EDITOR_DEFAULT_ZOOM", &mut config.default_zoom)?;
        read_env("PDF_EDITOR_GRID_SIZE", &mut config.base_grid_size)?;
        read_env("PDF_EDITOR_THUMBNAIL_SCALE", &mut config.thumbnail_scale)?;
        read_env(
            "PDF_EDITOR_THUMBNAIL_COLUMNS",
            &mut config.thumbnail_columns,
        )?;
        read_env(
            "PDF_EDITOR_POINTER_THROTTLE_MS",
            &mut config.pointer_throttle_ms,
        )?;

        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file; missing keys keep their defaults.
    ///
    /// ```toml
    /// page_gap_px = 24.0
    /// max_zoom = 8.0
    /// thumbnail_columns = 3
    /// ```
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates TOML configuration text.
    ///
    /// # Errors
    /// Returns an error if the text does not parse or the result is inconsistent.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        if let Err(err) = config.validate() {
            log::warn!("rejecting viewport config: {err}");
            return Err(err);
        }
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let toml = toml::to_string(self)?;
        fs::write(path.as_ref(), toml)?;
        Ok(())
    }
}

fn read_env<T: std::str::FromStr>(key: &str, target: &mut T) -> Result<(), ConfigError> {
    if let Ok(value) = std::env::var(key) {
        *target = value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue(key.to_string()))?;
    }
    Ok(())
}

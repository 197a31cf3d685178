//! Editor configuration.

use std::time::Duration;

use framestudio_canvas::SurfaceOptions;
use framestudio_core::{defaults, FrameStudioError, Result, Rgba, Size};
use serde::{Deserialize, Serialize};

/// User-tunable editor settings. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Document width of every frame, in pixels.
    pub canvas_width: u32,
    /// Document height of every frame, in pixels.
    pub canvas_height: u32,
    /// Background fill of new frames.
    pub background: Rgba,
    /// Settling period before a change is saved.
    pub autosave_debounce_ms: u64,
    /// Draw selection controls above the overlay layer.
    pub controls_above_overlay: bool,
    /// Keep z-order of selected objects.
    pub preserve_object_stacking: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: defaults::CANVAS_WIDTH,
            canvas_height: defaults::CANVAS_HEIGHT,
            background: Rgba::WHITE,
            autosave_debounce_ms: defaults::AUTOSAVE_DEBOUNCE_MS,
            controls_above_overlay: true,
            preserve_object_stacking: true,
        }
    }
}

impl EditorConfig {
    /// Parse a JSON config.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let config: Self = serde_json::from_slice(data)
            .map_err(|e| FrameStudioError::Serialization(format!("Invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config from disk.
    pub fn load_from_file(path: &std::path::Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_json(&data)
    }

    fn validate(&self) -> Result<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(FrameStudioError::InvalidParameter(format!(
                "canvas size {}x{} must be non-zero",
                self.canvas_width, self.canvas_height
            )));
        }
        Ok(())
    }

    pub fn canvas_size(&self) -> Size {
        Size::new(self.canvas_width, self.canvas_height)
    }

    pub fn autosave_debounce(&self) -> Duration {
        Duration::from_millis(self.autosave_debounce_ms)
    }

    /// Options handed to the surface backend for each new frame.
    pub fn surface_options(&self) -> SurfaceOptions {
        SurfaceOptions {
            size: self.canvas_size(),
            background: self.background,
            controls_above_overlay: self.controls_above_overlay,
            preserve_object_stacking: self.preserve_object_stacking,
        }
    }
}

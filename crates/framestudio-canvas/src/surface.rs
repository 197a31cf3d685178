//! The graphics-surface contract.
//!
//! The editor never draws by itself. Each frame is backed by a surface from a
//! backend that implements these traits; the registry only creates, renders and
//! disposes them, and the editor shell toggles editing modes on the active one.

use framestudio_core::{defaults, Result, Rgba, Size};
use serde::{Deserialize, Serialize};

use crate::container::ContainerId;

/// Creation options passed to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceOptions {
    /// Document size of the surface.
    pub size: Size,
    /// Background fill.
    pub background: Rgba,
    /// Draw selection controls above the overlay layer.
    pub controls_above_overlay: bool,
    /// Keep z-order of objects when they are selected.
    pub preserve_object_stacking: bool,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            size: Size::new(defaults::CANVAS_WIDTH, defaults::CANVAS_HEIGHT),
            background: Rgba::WHITE,
            controls_above_overlay: true,
            preserve_object_stacking: true,
        }
    }
}

/// Interactive modes a surface can be switched into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditMode {
    /// Freehand drawing with the pointer.
    Drawing,
}

/// A live rendering surface.
pub trait GraphicsSurface {
    /// Document size.
    fn size(&self) -> Size;

    /// Encode the current contents as PNG bytes.
    fn render_to_image(&self) -> Result<Vec<u8>>;
}

/// Editing hooks the shell uses on the active surface.
pub trait EditingSurface: GraphicsSurface {
    fn enable_mode(&mut self, mode: EditMode);

    fn disable_mode(&mut self, mode: EditMode);

    fn is_mode_enabled(&self, mode: EditMode) -> bool;

    /// Whether any object is currently selected.
    fn has_active_selection(&self) -> bool;

    /// Serialize the surface contents for persistence.
    fn serialize_state(&self) -> Result<serde_json::Value>;
}

/// Creates and releases surfaces for a backend.
pub trait SurfaceFactory {
    type Surface: EditingSurface;

    /// Create a surface bound to `container`.
    fn create(&mut self, container: &ContainerId, options: &SurfaceOptions)
        -> Result<Self::Surface>;

    /// Release every resource held by `surface`.
    fn dispose(&mut self, surface: Self::Surface);
}

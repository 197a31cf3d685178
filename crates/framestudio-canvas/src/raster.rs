//! In-memory raster backend.
//!
//! Keeps a flat list of shapes per surface and rasterizes them into an
//! [`RgbaImage`] on demand. Used by the desktop shell and by tests.

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use framestudio_core::{FrameStudioError, Rect, Result, Rgba, Size};
use image::{Pixel, RgbaImage};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::container::ContainerId;
use crate::surface::{EditMode, EditingSurface, GraphicsSurface, SurfaceFactory, SurfaceOptions};

/// A drawable object on a raster surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Rect { rect: Rect, fill: Rgba },
    Stroke { points: Vec<(i32, i32)>, width: u32, color: Rgba },
}

impl Shape {
    /// Whether the point `(x, y)` falls on the shape.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        match self {
            Shape::Rect { rect, .. } => {
                x >= rect.x && x < rect.right() && y >= rect.y && y < rect.bottom()
            }
            Shape::Stroke { points, width, .. } => {
                let reach = ((*width).max(1) / 2) as i32 + 1;
                points
                    .iter()
                    .any(|&(px, py)| (x - px).abs() <= reach && (y - py).abs() <= reach)
            }
        }
    }

    fn paint(&self, canvas: &mut RgbaImage) {
        match self {
            Shape::Rect { rect, fill } => fill_rect(canvas, *rect, *fill),
            Shape::Stroke {
                points,
                width,
                color,
            } => {
                let w = (*width).max(1);
                let half = (w / 2) as i32;
                for &(x, y) in points {
                    fill_rect(canvas, Rect::new(x - half, y - half, w, w), *color);
                }
            }
        }
    }
}

/// Composite `color` over the part of `rect` that lies inside `canvas`.
fn fill_rect(canvas: &mut RgbaImage, rect: Rect, color: Rgba) {
    let Some(r) = rect.clip_to(Size::new(canvas.width(), canvas.height())) else {
        return;
    };
    let src = image::Rgba(color.0);
    for y in r.y..r.bottom() {
        for x in r.x..r.right() {
            canvas.get_pixel_mut(x as u32, y as u32).blend(&src);
        }
    }
}

/// A surface that rasterizes into CPU memory.
#[derive(Debug)]
pub struct RasterSurface {
    container: ContainerId,
    options: SurfaceOptions,
    shapes: Vec<Shape>,
    selection: Option<usize>,
    drawing: bool,
}

impl RasterSurface {
    fn new(container: ContainerId, options: SurfaceOptions) -> Self {
        Self {
            container,
            options,
            shapes: Vec::new(),
            selection: None,
            drawing: false,
        }
    }

    pub fn container(&self) -> &ContainerId {
        &self.container
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Add a shape and return its index.
    pub fn add_shape(&mut self, shape: Shape) -> usize {
        self.shapes.push(shape);
        self.shapes.len() - 1
    }

    /// Record a freehand stroke. Ignored unless drawing mode is on.
    pub fn draw_stroke(&mut self, points: Vec<(i32, i32)>, width: u32, color: Rgba) -> bool {
        if !self.drawing || points.is_empty() {
            return false;
        }
        self.add_shape(Shape::Stroke {
            points,
            width,
            color,
        });
        true
    }

    /// Select the shape at `index`. Out-of-range indices clear the selection.
    pub fn select(&mut self, index: usize) {
        self.selection = (index < self.shapes.len()).then_some(index);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    /// Topmost shape under `(x, y)`.
    pub fn shape_at(&self, x: i32, y: i32) -> Option<usize> {
        self.shapes.iter().rposition(|s| s.contains(x, y))
    }

    /// Rasterize every shape over the background.
    pub fn rasterize(&self) -> RgbaImage {
        let Size { width, height } = self.options.size;
        let background = image::Rgba(self.options.background.0);
        let mut canvas = RgbaImage::from_pixel(width, height, background);
        for shape in &self.shapes {
            shape.paint(&mut canvas);
        }
        canvas
    }
}

impl GraphicsSurface for RasterSurface {
    fn size(&self) -> Size {
        self.options.size
    }

    fn render_to_image(&self) -> Result<Vec<u8>> {
        let size = self.options.size;
        if size.is_empty() {
            return Err(FrameStudioError::Render(format!(
                "{} has an empty surface",
                self.container
            )));
        }
        let mut out = Vec::new();
        self.rasterize()
            .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
            .map_err(|e| FrameStudioError::Render(format!("PNG encoding failed: {}", e)))?;
        Ok(out)
    }
}

impl EditingSurface for RasterSurface {
    fn enable_mode(&mut self, mode: EditMode) {
        match mode {
            EditMode::Drawing => self.drawing = true,
        }
    }

    fn disable_mode(&mut self, mode: EditMode) {
        match mode {
            EditMode::Drawing => self.drawing = false,
        }
    }

    fn is_mode_enabled(&self, mode: EditMode) -> bool {
        match mode {
            EditMode::Drawing => self.drawing,
        }
    }

    fn has_active_selection(&self) -> bool {
        self.selection.is_some()
    }

    fn serialize_state(&self) -> Result<serde_json::Value> {
        serde_json::to_value(&self.shapes).map_err(|e| {
            FrameStudioError::Serialization(format!("Failed to serialize surface: {}", e))
        })
    }
}

/// Shared counters of a [`RasterFactory`].
#[derive(Debug, Clone, Default)]
pub struct FactoryStats {
    created: Arc<AtomicUsize>,
    disposed: Arc<AtomicUsize>,
}

impl FactoryStats {
    pub fn created(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }

    pub fn disposed(&self) -> usize {
        self.disposed.load(Ordering::Relaxed)
    }

    /// Surfaces created and not yet disposed.
    pub fn live(&self) -> usize {
        self.created() - self.disposed()
    }
}

/// Factory for [`RasterSurface`]s.
#[derive(Debug, Default)]
pub struct RasterFactory {
    stats: FactoryStats,
}

impl RasterFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle to the counters that outlives the factory.
    pub fn stats(&self) -> FactoryStats {
        self.stats.clone()
    }

    pub fn live(&self) -> usize {
        self.stats.live()
    }

    pub fn disposed(&self) -> usize {
        self.stats.disposed()
    }
}

impl SurfaceFactory for RasterFactory {
    type Surface = RasterSurface;

    fn create(&mut self, container: &ContainerId, options: &SurfaceOptions) -> Result<RasterSurface> {
        if options.size.is_empty() {
            return Err(FrameStudioError::SurfaceCreation {
                container: container.to_string(),
                reason: format!("invalid size {}x{}", options.size.width, options.size.height),
            });
        }
        self.stats.created.fetch_add(1, Ordering::Relaxed);
        debug!(%container, width = options.size.width, height = options.size.height, "Created raster surface");
        Ok(RasterSurface::new(container.clone(), options.clone()))
    }

    fn dispose(&mut self, surface: RasterSurface) {
        self.stats.disposed.fetch_add(1, Ordering::Relaxed);
        debug!(container = %surface.container, "Disposed raster surface");
    }
}

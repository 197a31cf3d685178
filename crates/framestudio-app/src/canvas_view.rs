//! Central view of the active frame's surface.
//!
//! Rasterizes the surface into a texture and turns pointer input into edits
//! according to the active tool.

use egui::{self, Color32, Pos2, Rect, Vec2};
use framestudio_canvas::{GraphicsSurface, RasterSurface, Shape};
use framestudio_core::{FrameId, Rect as CanvasRect, Rgba, Size};
use framestudio_editor::ActiveTool;
use framestudio_ui::Theme;

const STROKE_WIDTH: u32 = 4;
const SHAPE_SIZE: u32 = 120;

/// What an interaction did to the surface.
#[derive(Debug, Default, Clone, Copy)]
pub struct CanvasOutcome {
    pub content_changed: bool,
    pub selection_changed: bool,
}

#[derive(Default)]
pub struct CanvasView {
    texture: Option<egui::TextureHandle>,
    shown: Option<FrameId>,
    dirty: bool,
    stroke: Vec<(i32, i32)>,
}

/// Largest scale at which `canvas` fits in `available`, never enlarging.
pub fn fit_scale(canvas: Size, available: Vec2) -> f32 {
    if canvas.is_empty() {
        return 1.0;
    }
    (available.x / canvas.width as f32)
        .min(available.y / canvas.height as f32)
        .clamp(0.01, 1.0)
}

/// Map a screen position inside `rect` to canvas pixels.
pub fn to_canvas(rect: Rect, scale: f32, pos: Pos2) -> (i32, i32) {
    let local = (pos - rect.min) / scale;
    (local.x.floor() as i32, local.y.floor() as i32)
}

impl CanvasView {
    /// Re-rasterize on the next frame.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        frame: FrameId,
        surface: &mut RasterSurface,
        tool: ActiveTool,
    ) -> CanvasOutcome {
        let mut outcome = CanvasOutcome::default();
        if self.shown != Some(frame) {
            self.shown = Some(frame);
            self.stroke.clear();
            self.dirty = true;
        }
        self.upload(ui.ctx(), surface);

        let canvas = surface.size();
        let scale = fit_scale(canvas, ui.available_size());
        let display = Vec2::new(canvas.width as f32, canvas.height as f32) * scale;
        let (rect, response) = ui.allocate_exact_size(display, egui::Sense::click_and_drag());

        let painter = ui.painter_at(rect);
        if let Some(texture) = &self.texture {
            painter.image(
                texture.id(),
                rect,
                Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                Color32::WHITE,
            );
        }

        match tool {
            ActiveTool::Draw => {
                if response.dragged() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        self.stroke.push(to_canvas(rect, scale, pos));
                    }
                }
                if response.drag_stopped() {
                    let points = std::mem::take(&mut self.stroke);
                    if surface.draw_stroke(points, STROKE_WIDTH, Rgba::BLACK) {
                        outcome.content_changed = true;
                    }
                }
                // Live stroke
                let live: Vec<Pos2> = self
                    .stroke
                    .iter()
                    .map(|&(x, y)| rect.min + Vec2::new(x as f32, y as f32) * scale)
                    .collect();
                if live.len() > 1 {
                    painter.add(egui::Shape::line(
                        live,
                        egui::Stroke::new(STROKE_WIDTH as f32 * scale, Color32::BLACK),
                    ));
                }
            }
            ActiveTool::Shapes => {
                if let Some(pos) = response.interact_pointer_pos().filter(|_| response.clicked()) {
                    let (x, y) = to_canvas(rect, scale, pos);
                    let half = (SHAPE_SIZE / 2) as i32;
                    let index = surface.add_shape(Shape::Rect {
                        rect: CanvasRect::new(x - half, y - half, SHAPE_SIZE, SHAPE_SIZE),
                        fill: Rgba::rgb(59, 130, 246),
                    });
                    surface.select(index);
                    outcome.content_changed = true;
                    outcome.selection_changed = true;
                }
            }
            _ => {
                if let Some(pos) = response.interact_pointer_pos().filter(|_| response.clicked()) {
                    let (x, y) = to_canvas(rect, scale, pos);
                    let before = surface.selection();
                    match surface.shape_at(x, y) {
                        Some(index) => surface.select(index),
                        None => surface.clear_selection(),
                    }
                    outcome.selection_changed = before != surface.selection();
                }
            }
        }

        if let Some(index) = surface.selection() {
            if let Some(Shape::Rect { rect: r, .. }) = surface.shapes().get(index) {
                let min = rect.min + Vec2::new(r.x as f32, r.y as f32) * scale;
                let size = Vec2::new(r.width as f32, r.height as f32) * scale;
                painter.rect_stroke(
                    Rect::from_min_size(min, size),
                    0.0,
                    egui::Stroke::new(Theme::STROKE_EMPHASIS, Theme::accent()),
                );
            }
        }

        if outcome.content_changed {
            self.dirty = true;
        }
        outcome
    }

    fn upload(&mut self, ctx: &egui::Context, surface: &RasterSurface) {
        if !self.dirty && self.texture.is_some() {
            return;
        }
        let pixels = surface.rasterize();
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [pixels.width() as usize, pixels.height() as usize],
            pixels.as_raw(),
        );
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.texture =
                    Some(ctx.load_texture("active-canvas", image, egui::TextureOptions::LINEAR));
            }
        }
        self.dirty = false;
    }
}

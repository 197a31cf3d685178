//! Frame thumbnails shown on timeline segments.
//!
//! Thumbnails are keyed by frame id rather than by segment rank, so
//! reordering the timeline never shows one frame's picture on another
//! frame's segment.

use std::collections::{HashMap, HashSet};

use framestudio_core::{FrameId, FrameStudioError, Result};
use image::ImageFormat;
use tracing::debug;

/// Decode PNG bytes into an egui image.
pub fn decode_png(bytes: &[u8]) -> Result<egui::ColorImage> {
    let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(|e| FrameStudioError::Render(format!("Failed to decode preview: {}", e)))?
        .to_rgba8();
    let size = [decoded.width() as usize, decoded.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, decoded.as_raw()))
}

/// Uploaded thumbnails and which of them are out of date.
#[derive(Default)]
pub struct PreviewCache {
    textures: HashMap<FrameId, egui::TextureHandle>,
    stale: HashSet<FrameId>,
}

impl PreviewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `frame` has no thumbnail or an outdated one.
    pub fn needs_refresh(&self, frame: FrameId) -> bool {
        !self.textures.contains_key(&frame) || self.stale.contains(&frame)
    }

    /// Decode `png` and upload it as the thumbnail of `frame`.
    pub fn refresh(&mut self, ctx: &egui::Context, frame: FrameId, png: &[u8]) -> Result<()> {
        let image = decode_png(png)?;
        self.store(ctx, frame, image);
        Ok(())
    }

    /// Upload an already decoded thumbnail.
    pub fn store(&mut self, ctx: &egui::Context, frame: FrameId, image: egui::ColorImage) {
        match self.textures.get_mut(&frame) {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                let texture = ctx.load_texture(
                    format!("preview-{}", frame.get()),
                    image,
                    egui::TextureOptions::LINEAR,
                );
                self.textures.insert(frame, texture);
            }
        }
        self.stale.remove(&frame);
        debug!(%frame, "Refreshed preview");
    }

    /// Mark the thumbnail of `frame` as outdated.
    pub fn invalidate(&mut self, frame: FrameId) {
        self.stale.insert(frame);
    }

    /// Drop thumbnails of frames that no longer exist.
    pub fn retain(&mut self, frames: &[FrameId]) {
        self.textures.retain(|f, _| frames.contains(f));
        self.stale.retain(|f| frames.contains(f));
    }

    pub fn texture(&self, frame: FrameId) -> Option<&egui::TextureHandle> {
        self.textures.get(&frame)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

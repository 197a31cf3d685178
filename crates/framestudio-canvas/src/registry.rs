//! Registry of live drawing surfaces, one per frame.
//!
//! Surfaces are acquired on [`CanvasRegistry::register`] and released through
//! [`CanvasRegistry::dispose`] or [`CanvasRegistry::teardown`]. Dropping the
//! registry tears it down, so surfaces are released on every exit path.

use framestudio_core::{FrameId, FrameStudioError, Result};
use tracing::{debug, info};

use crate::container::ContainerId;
use crate::surface::{GraphicsSurface, SurfaceFactory, SurfaceOptions};

/// A frame bound to its live surface and container.
#[derive(Debug)]
pub struct CanvasEntry<S> {
    frame: FrameId,
    container: ContainerId,
    surface: S,
}

impl<S> CanvasEntry<S> {
    pub fn frame(&self) -> FrameId {
        self.frame
    }

    pub fn container(&self) -> &ContainerId {
        &self.container
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

/// Owns every live surface of a session.
pub struct CanvasRegistry<F: SurfaceFactory> {
    factory: F,
    options: SurfaceOptions,
    /// Registration order.
    entries: Vec<CanvasEntry<F::Surface>>,
    active: Option<FrameId>,
}

impl<F: SurfaceFactory> CanvasRegistry<F> {
    /// Create an empty registry that builds surfaces with `factory`.
    pub fn new(factory: F, options: SurfaceOptions) -> Self {
        Self {
            factory,
            options,
            entries: Vec::new(),
            active: None,
        }
    }

    /// Create a surface for `frame` inside `container`.
    ///
    /// The new entry is not activated. Fails if the frame is already
    /// registered or the backend cannot create the surface.
    pub fn register(&mut self, frame: FrameId, container: ContainerId) -> Result<()> {
        if self.contains(frame) {
            return Err(FrameStudioError::DuplicateFrame(frame));
        }
        let surface = self.factory.create(&container, &self.options)?;
        info!(%frame, %container, "Registered surface");
        self.entries.push(CanvasEntry {
            frame,
            container,
            surface,
        });
        Ok(())
    }

    /// Mark `frame` as the active surface.
    pub fn activate(&mut self, frame: FrameId) -> Result<()> {
        if !self.contains(frame) {
            debug!(%frame, "Activate of unknown frame");
            return Err(FrameStudioError::NotFound(frame));
        }
        self.active = Some(frame);
        debug!(%frame, "Activated surface");
        Ok(())
    }

    /// Release the surface of `frame` and forget it.
    pub fn dispose(&mut self, frame: FrameId) -> Result<()> {
        let index = self
            .entries
            .iter()
            .position(|e| e.frame == frame)
            .ok_or(FrameStudioError::NotFound(frame))?;
        let entry = self.entries.remove(index);
        if self.active == Some(frame) {
            self.active = None;
        }
        info!(%frame, container = %entry.container, "Disposing surface");
        self.factory.dispose(entry.surface);
        Ok(())
    }

    /// Release every surface in registration order. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        info!(count = self.entries.len(), "Tearing down canvas registry");
        self.active = None;
        for entry in self.entries.drain(..) {
            self.factory.dispose(entry.surface);
        }
    }

    /// Whether `frame` has a live surface.
    pub fn contains(&self, frame: FrameId) -> bool {
        self.entries.iter().any(|e| e.frame == frame)
    }

    pub fn get(&self, frame: FrameId) -> Option<&CanvasEntry<F::Surface>> {
        self.entries.iter().find(|e| e.frame == frame)
    }

    pub fn get_mut(&mut self, frame: FrameId) -> Option<&mut CanvasEntry<F::Surface>> {
        self.entries.iter_mut().find(|e| e.frame == frame)
    }

    /// The active entry, if any.
    pub fn active(&self) -> Option<&CanvasEntry<F::Surface>> {
        self.active.and_then(|f| self.get(f))
    }

    pub fn active_mut(&mut self) -> Option<&mut CanvasEntry<F::Surface>> {
        let frame = self.active?;
        self.get_mut(frame)
    }

    pub fn active_frame(&self) -> Option<FrameId> {
        self.active
    }

    /// Registered frames in registration order.
    pub fn frames(&self) -> impl Iterator<Item = FrameId> + '_ {
        self.entries.iter().map(|e| e.frame)
    }

    pub fn entries(&self) -> &[CanvasEntry<F::Surface>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn options(&self) -> &SurfaceOptions {
        &self.options
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Render the preview image of `frame`.
    pub fn render_preview(&self, frame: FrameId) -> Result<Vec<u8>> {
        let entry = self.get(frame).ok_or(FrameStudioError::NotFound(frame))?;
        entry.surface.render_to_image()
    }
}

impl<F: SurfaceFactory> Drop for CanvasRegistry<F> {
    fn drop(&mut self) {
        self.teardown();
    }
}

//! Frame lifecycle orchestration.
//!
//! The orchestrator owns the canvas registry and the committed segment list
//! and keeps them in step: every registered frame gets exactly one segment,
//! and exactly one frame is active once the first one exists. The registry is
//! only reachable read-only from outside, so the active marker lives in one
//! place.

use framestudio_canvas::{CanvasRegistry, ContainerId, SurfaceFactory, SurfaceOptions};
use framestudio_core::{FrameId, Result};
use framestudio_timeline::{layout, SegmentList};
use tracing::{debug, info};

/// Adds frames, switches the active one, and reconciles the timeline.
pub struct FrameOrchestrator<F: SurfaceFactory> {
    registry: CanvasRegistry<F>,
    segments: SegmentList,
    next_frame: FrameId,
}

impl<F: SurfaceFactory> FrameOrchestrator<F> {
    /// Create an orchestrator with no frames.
    pub fn new(factory: F, options: SurfaceOptions) -> Self {
        Self::from_registry(CanvasRegistry::new(factory, options))
    }

    /// Take over a registry whose surfaces were created elsewhere, e.g. when
    /// restoring a session. Its frames get segments on the next command.
    pub fn from_registry(registry: CanvasRegistry<F>) -> Self {
        let next_frame = registry
            .frames()
            .max()
            .map_or(FrameId::FIRST, FrameId::next);
        Self {
            registry,
            segments: SegmentList::new(),
            next_frame,
        }
    }

    /// Create a frame with its surface and segment and make it active.
    ///
    /// When the surface cannot be created nothing changes: the id is not
    /// consumed and the previously active frame stays active.
    pub fn add_frame(&mut self) -> Result<FrameId> {
        self.reconcile();

        let frame = self.next_frame;
        self.registry
            .register(frame, ContainerId::for_frame(frame))?;
        self.next_frame = frame.next();

        self.registry.activate(frame)?;
        self.segments = layout::append(&self.segments, frame);

        info!(%frame, total = self.registry.len(), "Added frame");
        Ok(frame)
    }

    /// Make `frame` the active frame. The timeline is not touched.
    pub fn switch_active_frame(&mut self, frame: FrameId) -> Result<()> {
        self.reconcile();
        self.registry.activate(frame)?;
        debug!(%frame, "Switched active frame");
        Ok(())
    }

    /// Append a segment for every registered frame that lacks one.
    ///
    /// Frames are visited in registration order. Returns how many segments
    /// were created; a second call right after returns zero.
    pub fn reconcile(&mut self) -> usize {
        let missing: Vec<FrameId> = self
            .registry
            .frames()
            .filter(|f| !self.segments.contains_frame(*f))
            .collect();
        for frame in &missing {
            self.segments = layout::append(&self.segments, *frame);
        }
        if !missing.is_empty() {
            info!(count = missing.len(), "Reconciled unsegmented frames");
        }
        missing.len()
    }

    /// Replace the committed timeline with the result of a finished gesture.
    ///
    /// The list may predate frames added while the gesture ran; those are
    /// appended again.
    pub fn commit_segments(&mut self, segments: SegmentList) {
        self.segments = layout::repair(&segments);
        self.reconcile();
        debug!(count = self.segments.len(), "Committed timeline");
    }

    /// Release every surface.
    pub fn teardown(&mut self) {
        self.registry.teardown();
    }

    pub fn segments(&self) -> &SegmentList {
        &self.segments
    }

    pub fn active_frame(&self) -> Option<FrameId> {
        self.registry.active_frame()
    }

    pub fn registry(&self) -> &CanvasRegistry<F> {
        &self.registry
    }

    /// Active surface, if any.
    pub fn active_surface(&self) -> Option<&F::Surface> {
        self.registry.active().map(|e| e.surface())
    }

    pub fn active_surface_mut(&mut self) -> Option<&mut F::Surface> {
        self.registry.active_mut().map(|e| e.surface_mut())
    }

    /// Surface of `frame`, active or not.
    pub fn surface_mut(&mut self, frame: FrameId) -> Option<&mut F::Surface> {
        self.registry.get_mut(frame).map(|e| e.surface_mut())
    }

    pub fn frame_count(&self) -> usize {
        self.registry.len()
    }

    /// PNG preview of `frame`.
    pub fn render_preview(&self, frame: FrameId) -> Result<Vec<u8>> {
        self.registry.render_preview(frame)
    }
}

//! Editor shell.
//!
//! Ties the frame orchestrator to tool selection and autosave. The shell
//! starts with one frame and owns every surface until it is torn down.

use std::time::Instant;

use framestudio_canvas::{EditMode, EditingSurface, SurfaceFactory};
use framestudio_core::{FrameId, Result};
use framestudio_timeline::{SegmentList, TimelineFile};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::autosave::{Autosave, EditorDocument, FrameState, SaveRequest, SaveSink};
use crate::config::EditorConfig;
use crate::orchestrator::FrameOrchestrator;
use crate::tool::ActiveTool;

pub struct EditorShell<F: SurfaceFactory, S: SaveSink> {
    orchestrator: FrameOrchestrator<F>,
    tool: ActiveTool,
    autosave: Autosave<S>,
    config: EditorConfig,
    document_id: Uuid,
}

impl<F: SurfaceFactory, S: SaveSink> EditorShell<F, S> {
    /// Create a shell with its first frame active.
    pub fn new(factory: F, sink: S, config: EditorConfig) -> Result<Self> {
        let mut shell = Self {
            orchestrator: FrameOrchestrator::new(factory, config.surface_options()),
            tool: ActiveTool::Select,
            autosave: Autosave::new(sink, config.autosave_debounce()),
            config,
            document_id: Uuid::new_v4(),
        };
        shell.orchestrator.add_frame()?;
        info!(document = %shell.document_id, "Editor ready");
        Ok(shell)
    }

    /// Add a frame, make it active and return to the select tool.
    pub fn add_frame(&mut self) -> Result<FrameId> {
        let previous = self.orchestrator.active_frame();
        let frame = self.orchestrator.add_frame()?;
        if self.tool == ActiveTool::Draw {
            if let Some(previous) = previous {
                self.set_drawing(previous, false);
            }
        }
        self.tool = ActiveTool::Select;
        Ok(frame)
    }

    /// Make `frame` active. Drawing mode follows the active surface.
    pub fn switch_frame(&mut self, frame: FrameId) -> Result<()> {
        let previous = self.orchestrator.active_frame();
        self.orchestrator.switch_active_frame(frame)?;
        if self.tool == ActiveTool::Draw && previous != Some(frame) {
            if let Some(previous) = previous {
                self.set_drawing(previous, false);
            }
            self.set_drawing(frame, true);
        }
        self.sync_selection();
        Ok(())
    }

    /// Select `tool`. Picking the tool that is already active goes back to
    /// the select tool.
    pub fn change_tool(&mut self, tool: ActiveTool) {
        let next = if tool == self.tool {
            ActiveTool::Select
        } else {
            tool
        };
        if next == self.tool {
            return;
        }

        if let Some(frame) = self.orchestrator.active_frame() {
            if self.tool == ActiveTool::Draw {
                self.set_drawing(frame, false);
            }
            if next == ActiveTool::Draw {
                self.set_drawing(frame, true);
            }
        }

        debug!(from = ?self.tool, to = ?next, "Changed tool");
        self.tool = next;
    }

    /// The selection on the active surface went away.
    pub fn on_selection_cleared(&mut self) {
        if self.tool.is_selection_dependent() {
            debug!(tool = ?self.tool, "Selection cleared, back to select");
            self.tool = ActiveTool::Select;
        }
    }

    /// Re-check the active surface's selection against the current tool.
    pub fn sync_selection(&mut self) {
        let selected = self
            .orchestrator
            .active_surface()
            .is_some_and(|s| s.has_active_selection());
        if !selected {
            self.on_selection_cleared();
        }
    }

    /// Replace the committed timeline with the result of a finished gesture.
    pub fn commit_segments(&mut self, segments: SegmentList) {
        self.orchestrator.commit_segments(segments);
    }

    /// Snapshot of the whole editing session.
    pub fn document(&self) -> Result<EditorDocument> {
        let frames = self
            .orchestrator
            .registry()
            .entries()
            .iter()
            .map(|entry| {
                Ok(FrameState {
                    frame: entry.frame(),
                    container: entry.container().clone(),
                    state: entry.surface().serialize_state()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(EditorDocument {
            timeline: TimelineFile::new(self.document_id, self.orchestrator.segments().clone()),
            frames,
            active_frame: self.orchestrator.active_frame(),
        })
    }

    /// Queue an autosave of the current document.
    pub fn notify_content_changed(&mut self, now: Instant) -> Result<()> {
        let request = SaveRequest {
            serialized_state: self.document()?.to_json_string()?,
            width: self.config.canvas_width,
            height: self.config.canvas_height,
        };
        self.autosave.schedule(request, now);
        Ok(())
    }

    /// Deliver a settled autosave. Returns whether one was delivered.
    pub fn poll_autosave(&mut self, now: Instant) -> Result<bool> {
        self.autosave.poll(now)
    }

    pub fn flush_autosave(&mut self) -> Result<bool> {
        self.autosave.flush()
    }

    /// Save anything pending and release every surface.
    pub fn teardown(&mut self) {
        if let Err(e) = self.autosave.flush() {
            warn!(error = %e, "Final autosave failed");
        }
        self.orchestrator.teardown();
        self.tool = ActiveTool::Select;
    }

    fn set_drawing(&mut self, frame: FrameId, enabled: bool) {
        let Some(surface) = self.orchestrator.surface_mut(frame) else {
            return;
        };
        if enabled {
            surface.enable_mode(EditMode::Drawing);
        } else {
            surface.disable_mode(EditMode::Drawing);
        }
    }

    pub fn active_tool(&self) -> ActiveTool {
        self.tool
    }

    pub fn active_frame(&self) -> Option<FrameId> {
        self.orchestrator.active_frame()
    }

    pub fn segments(&self) -> &SegmentList {
        self.orchestrator.segments()
    }

    pub fn orchestrator(&self) -> &FrameOrchestrator<F> {
        &self.orchestrator
    }

    /// Drawing surface of the active frame, for canvas input.
    pub fn active_surface_mut(&mut self) -> Option<&mut F::Surface> {
        self.orchestrator.active_surface_mut()
    }

    pub fn autosave(&self) -> &Autosave<S> {
        &self.autosave
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn document_id(&self) -> Uuid {
        self.document_id
    }
}

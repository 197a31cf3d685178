//! Integration tests for a whole editing session.
//!
//! Runs the editor shell on the raster backend with real file autosave.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use framestudio_canvas::{EditMode, EditingSurface, GraphicsSurface, RasterFactory, Shape};
use framestudio_core::{FrameId, Rect, Result, Rgba, SegmentId, Size};
use framestudio_editor::{
    ActiveTool, EditorConfig, EditorDocument, EditorShell, FileSink, SaveRequest,
};

// ── Helpers ────────────────────────────────────────────────────

struct TempFile(PathBuf);

impl TempFile {
    fn new() -> Self {
        let name = format!("framestudio-session-{}.json", uuid::Uuid::new_v4());
        Self(std::env::temp_dir().join(name))
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

fn config() -> EditorConfig {
    EditorConfig {
        canvas_width: 40,
        canvas_height: 30,
        ..EditorConfig::default()
    }
}

fn shell(file: &TempFile) -> EditorShell<RasterFactory, FileSink> {
    EditorShell::new(RasterFactory::new(), FileSink::new(&file.0), config()).unwrap()
}

fn saved_document(file: &TempFile) -> EditorDocument {
    let data = std::fs::read_to_string(&file.0).unwrap();
    EditorDocument::from_json_str(&data).unwrap()
}

// ── Tools across frames ────────────────────────────────────────

#[test]
fn draw_session_across_frames() {
    let file = TempFile::new();
    let mut shell = shell(&file);

    shell.change_tool(ActiveTool::Draw);
    let surface = shell.active_surface_mut().unwrap();
    assert!(surface.draw_stroke(vec![(1, 1), (2, 2)], 2, Rgba::BLACK));

    shell.add_frame().unwrap();
    assert_eq!(shell.active_tool(), ActiveTool::Select);
    let surface = shell.active_surface_mut().unwrap();
    assert!(!surface.is_mode_enabled(EditMode::Drawing));
    assert!(!surface.draw_stroke(vec![(1, 1)], 2, Rgba::BLACK));
}

#[test]
fn selection_tool_dropped_when_switching_to_empty_frame() {
    let file = TempFile::new();
    let mut shell = shell(&file);
    shell.add_frame().unwrap();

    let surface = shell.active_surface_mut().unwrap();
    let index = surface.add_shape(Shape::Rect {
        rect: Rect::new(0, 0, 5, 5),
        fill: Rgba::BLACK,
    });
    surface.select(index);
    shell.change_tool(ActiveTool::StrokeWidth);

    shell.switch_frame(FrameId(1)).unwrap();
    assert_eq!(shell.active_tool(), ActiveTool::Select);
}

#[test]
fn reselecting_a_tool_returns_to_select() {
    let file = TempFile::new();
    let mut shell = shell(&file);
    shell.change_tool(ActiveTool::Text);
    shell.change_tool(ActiveTool::Text);
    assert_eq!(shell.active_tool(), ActiveTool::Select);
}

// ── Autosave ───────────────────────────────────────────────────

#[test]
fn autosave_writes_restorable_document() {
    let file = TempFile::new();
    let mut shell = shell(&file);
    let t0 = Instant::now();

    shell.add_frame().unwrap();
    let retimed = shell.segments().retime(SegmentId(2), 60.0);
    shell.commit_segments(retimed);
    shell
        .active_surface_mut()
        .unwrap()
        .add_shape(Shape::Rect {
            rect: Rect::new(2, 2, 4, 4),
            fill: Rgba::rgb(0, 128, 0),
        });
    shell.notify_content_changed(t0).unwrap();

    assert!(!shell.poll_autosave(t0 + Duration::from_millis(100)).unwrap());
    assert!(!file.0.exists());
    assert!(shell.poll_autosave(t0 + Duration::from_millis(500)).unwrap());

    let doc = saved_document(&file);
    assert_eq!(doc.timeline.document_id, shell.document_id());
    assert_eq!(doc.active_frame, Some(FrameId(2)));
    assert_eq!(doc.timeline.segments.get(SegmentId(2)).unwrap().time, 30.0);
    assert_eq!(doc.frames.len(), 2);
    assert_eq!(doc.frames[1].container.as_str(), "frame-2");
    assert_eq!(doc.frames[1].state[0]["type"], "rect");
}

#[test]
fn burst_of_changes_saves_latest_state_once() {
    let file = TempFile::new();
    let mut shell = shell(&file);
    let t0 = Instant::now();

    for step in 0..5u64 {
        shell.add_frame().unwrap();
        shell
            .notify_content_changed(t0 + Duration::from_millis(step * 100))
            .unwrap();
        assert!(!shell.poll_autosave(t0 + Duration::from_millis(step * 100 + 50)).unwrap());
    }
    assert!(shell.poll_autosave(t0 + Duration::from_millis(900)).unwrap());
    assert_eq!(shell.autosave().saved(), 1);
    assert_eq!(saved_document(&file).frames.len(), 6);
}

#[test]
fn teardown_flushes_pending_save_and_releases_surfaces() {
    let file = TempFile::new();
    let mut shell = shell(&file);
    shell.add_frame().unwrap();
    shell.notify_content_changed(Instant::now()).unwrap();
    shell.teardown();

    assert_eq!(saved_document(&file).frames.len(), 2);
    assert_eq!(shell.orchestrator().registry().factory().live(), 0);
}

// ── Configuration ──────────────────────────────────────────────

#[test]
fn config_file_drives_surface_size() {
    let file = TempFile::new();
    std::fs::write(&file.0, br#"{"canvas_width": 64, "canvas_height": 48}"#).unwrap();
    let config = EditorConfig::load_from_file(&file.0).unwrap();

    let sink = |_: SaveRequest| -> Result<()> { Ok(()) };
    let shell = EditorShell::new(RasterFactory::new(), sink, config).unwrap();
    let surface = shell.orchestrator().active_surface().unwrap();
    assert_eq!(surface.size(), Size::new(64, 48));
    assert!(!shell.orchestrator().render_preview(FrameId(1)).unwrap().is_empty());
}

//! Integration tests for frame lifecycle.
//!
//! Drives the orchestrator with the raster backend and with a factory that
//! fails on demand.

use std::cell::Cell;
use std::rc::Rc;

use framestudio_canvas::{
    CanvasRegistry, ContainerId, FactoryStats, RasterFactory, RasterSurface, SurfaceFactory,
    SurfaceOptions,
};
use framestudio_core::{FrameId, FrameStudioError, Result, SegmentId, Size};
use framestudio_editor::FrameOrchestrator;
use framestudio_timeline::layout;

// ── Helpers ────────────────────────────────────────────────────

/// Raster factory that refuses to create surfaces while `failing` is set.
struct FlakyFactory {
    inner: RasterFactory,
    failing: Rc<Cell<bool>>,
}

impl SurfaceFactory for FlakyFactory {
    type Surface = RasterSurface;

    fn create(
        &mut self,
        container: &ContainerId,
        options: &SurfaceOptions,
    ) -> Result<RasterSurface> {
        if self.failing.get() {
            return Err(FrameStudioError::SurfaceCreation {
                container: container.to_string(),
                reason: "context lost".into(),
            });
        }
        self.inner.create(container, options)
    }

    fn dispose(&mut self, surface: RasterSurface) {
        self.inner.dispose(surface);
    }
}

fn options() -> SurfaceOptions {
    SurfaceOptions {
        size: Size::new(24, 32),
        ..SurfaceOptions::default()
    }
}

fn orchestrator() -> (FrameOrchestrator<RasterFactory>, FactoryStats) {
    let factory = RasterFactory::new();
    let stats = factory.stats();
    (FrameOrchestrator::new(factory, options()), stats)
}

fn flaky() -> (FrameOrchestrator<FlakyFactory>, Rc<Cell<bool>>, FactoryStats) {
    let inner = RasterFactory::new();
    let stats = inner.stats();
    let failing = Rc::new(Cell::new(false));
    let factory = FlakyFactory {
        inner,
        failing: Rc::clone(&failing),
    };
    (FrameOrchestrator::new(factory, options()), failing, stats)
}

// ── Adding and switching ───────────────────────────────────────

#[test]
fn three_frames_three_entries_three_segments() {
    let (mut orch, stats) = orchestrator();
    for _ in 0..3 {
        orch.add_frame().unwrap();
    }
    assert_eq!(orch.registry().len(), 3);
    assert_eq!(orch.segments().len(), 3);
    assert_eq!(orch.active_frame(), Some(FrameId(3)));
    assert_eq!(stats.live(), 3);

    let frames: Vec<_> = orch.segments().frames().collect();
    assert_eq!(frames, vec![FrameId(1), FrameId(2), FrameId(3)]);
}

#[test]
fn switching_keeps_every_surface_alive() {
    let (mut orch, stats) = orchestrator();
    orch.add_frame().unwrap();
    orch.add_frame().unwrap();
    orch.switch_active_frame(FrameId(1)).unwrap();
    orch.switch_active_frame(FrameId(2)).unwrap();
    assert_eq!(stats.created(), 2);
    assert_eq!(stats.disposed(), 0);
    assert_eq!(orch.registry().active_frame(), Some(FrameId(2)));
}

#[test]
fn switching_to_unknown_frame_reports_not_found() {
    let (mut orch, _) = orchestrator();
    orch.add_frame().unwrap();
    let err = orch.switch_active_frame(FrameId(5)).unwrap_err();
    assert!(err.is_reference_miss());
    assert_eq!(orch.active_frame(), Some(FrameId(1)));
}

#[test]
fn segment_follows_its_frame_after_reorder() {
    let (mut orch, _) = orchestrator();
    for _ in 0..3 {
        orch.add_frame().unwrap();
    }
    let reordered = orch.segments().reorder(SegmentId(3), 0.0);
    orch.commit_segments(reordered);
    let first = orch.segments().as_slice()[0].frame();
    assert_eq!(first, FrameId(3));
    // The preview of the first segment is the third frame's picture.
    let png = orch.render_preview(first).unwrap();
    assert_eq!(&png[1..4], b"PNG");
}

// ── Failure handling ───────────────────────────────────────────

#[test]
fn failed_surface_leaves_state_untouched() {
    let (mut orch, failing, stats) = flaky();
    orch.add_frame().unwrap();
    let before = orch.segments().clone();

    failing.set(true);
    let err = orch.add_frame().unwrap_err();
    assert!(matches!(err, FrameStudioError::SurfaceCreation { .. }));
    assert_eq!(orch.active_frame(), Some(FrameId(1)));
    assert_eq!(orch.segments(), &before);
    assert_eq!(orch.frame_count(), 1);

    failing.set(false);
    // The failed attempt did not consume an id.
    assert_eq!(orch.add_frame().unwrap(), FrameId(2));
    assert_eq!(stats.live(), 2);
}

// ── Reconciliation ─────────────────────────────────────────────

#[test]
fn reconcile_is_idempotent() {
    let mut registry = CanvasRegistry::new(RasterFactory::new(), options());
    registry
        .register(FrameId(1), ContainerId::for_frame(FrameId(1)))
        .unwrap();
    registry
        .register(FrameId(7), ContainerId::new("imported"))
        .unwrap();
    registry
        .register(FrameId(8), ContainerId::new("imported-2"))
        .unwrap();
    let mut orch = FrameOrchestrator::from_registry(registry);
    assert_eq!(orch.reconcile(), 3);
    let once = orch.segments().clone();
    assert_eq!(orch.reconcile(), 0);
    assert_eq!(orch.segments(), &once);
    assert!(layout::check_invariants(&once).is_ok());
    // New frames continue after the highest adopted id.
    assert_eq!(orch.add_frame().unwrap(), FrameId(9));
}

#[test]
fn overflowing_width_never_reaches_the_timeline() {
    let (mut orch, _) = orchestrator();
    orch.add_frame().unwrap();
    orch.add_frame().unwrap();
    let resized = orch.segments().retime(SegmentId(1), 1.5e308);
    orch.commit_segments(resized);
    let before = orch.segments().clone();
    // A second huge width would push the last segment past f64::MAX.
    let overflow = orch.segments().retime(SegmentId(2), 1.5e308);
    orch.commit_segments(overflow);
    assert_eq!(orch.segments(), &before);
    assert_eq!(orch.segments().get(SegmentId(2)).unwrap().width(), 200.0);
    assert!(layout::check_invariants(orch.segments()).is_ok());
    // Adding a frame after the huge segment still lays out.
    orch.add_frame().unwrap();
    assert!(orch.segments().iter().all(|s| s.position.is_finite()));
}

#[test]
fn committing_a_stale_list_restores_missing_segments() {
    let (mut orch, _) = orchestrator();
    orch.add_frame().unwrap();
    let stale = orch.segments().clone();
    orch.add_frame().unwrap();
    orch.commit_segments(stale);
    assert_eq!(orch.segments().len(), 2);
    assert!(orch.segments().contains_frame(FrameId(2)));
}

// ── Teardown ───────────────────────────────────────────────────

#[test]
fn dropping_orchestrator_disposes_each_surface_once() {
    let (mut orch, stats) = orchestrator();
    for _ in 0..4 {
        orch.add_frame().unwrap();
    }
    orch.teardown();
    orch.teardown();
    drop(orch);
    assert_eq!(stats.created(), 4);
    assert_eq!(stats.disposed(), 4);
}

#[test]
fn drop_without_teardown_still_releases() {
    let (mut orch, stats) = orchestrator();
    orch.add_frame().unwrap();
    orch.add_frame().unwrap();
    drop(orch);
    assert_eq!(stats.live(), 0);
}

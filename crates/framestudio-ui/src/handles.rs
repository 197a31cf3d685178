//! Pointer hit testing on timeline segments.

use egui::{CursorIcon, Pos2, Rect, Vec2};
use framestudio_timeline::SCALE;

/// Width of the grab zone on each side of a segment, in points.
pub const HANDLE_WIDTH: f32 = 6.0;

/// Narrowest width a resize may produce: one time unit.
pub const MIN_WIDTH: f64 = SCALE;

/// Which edge of a segment is being resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleEdge {
    Left,
    Right,
}

/// What part of a segment the pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentHit {
    /// Anywhere inside the segment away from its edges.
    Body,
    /// One of the resize handles.
    Handle(HandleEdge),
}

/// Hit test `pos` against the segment drawn in `segment_rect`.
pub fn hit_test(segment_rect: Rect, pos: Pos2, handle_width: f32) -> Option<SegmentHit> {
    if !segment_rect.contains(pos) {
        return None;
    }

    let left = Rect::from_min_size(
        segment_rect.min,
        Vec2::new(handle_width, segment_rect.height()),
    );
    if left.contains(pos) {
        return Some(SegmentHit::Handle(HandleEdge::Left));
    }

    let right = Rect::from_min_size(
        Pos2::new(segment_rect.right() - handle_width, segment_rect.top()),
        Vec2::new(handle_width, segment_rect.height()),
    );
    if right.contains(pos) {
        return Some(SegmentHit::Handle(HandleEdge::Right));
    }

    Some(SegmentHit::Body)
}

/// Width after dragging `edge` by `delta` length units.
///
/// Either edge changes the width only; the layout decides where the segment
/// ends up once the resize is committed.
pub fn resized_width(edge: HandleEdge, original_width: f64, delta: f64) -> f64 {
    let width = match edge {
        HandleEdge::Left => original_width - delta,
        HandleEdge::Right => original_width + delta,
    };
    width.max(MIN_WIDTH)
}

/// Cursor shown over a resize handle.
pub fn handle_cursor(edge: HandleEdge) -> CursorIcon {
    match edge {
        HandleEdge::Left => CursorIcon::ResizeWest,
        HandleEdge::Right => CursorIcon::ResizeEast,
    }
}

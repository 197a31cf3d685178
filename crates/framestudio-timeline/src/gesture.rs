//! Drag and resize gestures over a committed timeline.
//!
//! A gesture snapshots the committed list when it starts. Intermediate
//! pointer events only touch a preview copy; the terminal event computes the
//! committed result from the snapshot. Dropping or cancelling a session leaves
//! the committed list exactly as it was.

use framestudio_core::SegmentId;

use crate::layout;
use crate::segment::SegmentList;

/// What the pointer is doing to the segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Moving the segment to a new rank.
    Drag,
    /// Dragging an edge to change the duration.
    Resize,
}

/// An in-progress drag or resize.
#[derive(Debug, Clone)]
pub struct GestureSession {
    kind: GestureKind,
    segment: SegmentId,
    snapshot: SegmentList,
    preview: SegmentList,
    /// Last pointer offset of a drag, or last width of a resize.
    last_value: Option<f64>,
}

impl GestureSession {
    /// Start dragging `segment`. `None` if the segment does not exist.
    pub fn begin_drag(committed: &SegmentList, segment: SegmentId) -> Option<Self> {
        Self::begin(GestureKind::Drag, committed, segment)
    }

    /// Start resizing `segment`. `None` if the segment does not exist.
    pub fn begin_resize(committed: &SegmentList, segment: SegmentId) -> Option<Self> {
        Self::begin(GestureKind::Resize, committed, segment)
    }

    fn begin(kind: GestureKind, committed: &SegmentList, segment: SegmentId) -> Option<Self> {
        committed.get(segment)?;
        Some(Self {
            kind,
            segment,
            snapshot: committed.clone(),
            preview: committed.clone(),
            last_value: None,
        })
    }

    pub fn kind(&self) -> GestureKind {
        self.kind
    }

    /// The segment under the pointer.
    pub fn segment(&self) -> SegmentId {
        self.segment
    }

    /// Transient state for drawing. Never commit this.
    pub fn preview(&self) -> &SegmentList {
        &self.preview
    }

    /// Last pointer offset of a drag or last width of a resize. `None`
    /// until the pointer moves.
    pub fn last_value(&self) -> Option<f64> {
        self.last_value
    }

    /// Where a dragged segment should be drawn, if it has moved.
    pub fn drag_offset(&self) -> Option<f64> {
        match self.kind {
            GestureKind::Drag => self.last_value.map(|x| x.max(0.0)),
            GestureKind::Resize => None,
        }
    }

    /// Record an intermediate drag position.
    pub fn drag_to(&mut self, x: f64) {
        if self.kind == GestureKind::Drag {
            self.last_value = Some(x);
        }
    }

    /// Record an intermediate width and refresh the preview.
    pub fn resize_to(&mut self, width: f64) {
        if self.kind == GestureKind::Resize {
            self.last_value = Some(width);
            self.preview = layout::preview_retime(&self.snapshot, self.segment, width);
        }
    }

    /// End a drag at `x`. Ending a resize this way cancels it.
    pub fn finish_drag(self, x: f64) -> SegmentList {
        match self.kind {
            GestureKind::Drag => self.commit(x),
            GestureKind::Resize => self.cancel(),
        }
    }

    /// End a resize at `width`. Ending a drag this way cancels it.
    pub fn finish_resize(self, width: f64) -> SegmentList {
        match self.kind {
            GestureKind::Resize => self.commit(width),
            GestureKind::Drag => self.cancel(),
        }
    }

    /// Abandon the gesture and return the pre-gesture list.
    pub fn cancel(self) -> SegmentList {
        self.snapshot
    }

    fn commit(self, value: f64) -> SegmentList {
        match self.kind {
            GestureKind::Drag => layout::reorder(&self.snapshot, self.segment, value),
            GestureKind::Resize => layout::retime(&self.snapshot, self.segment, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use framestudio_core::FrameId;

    fn two() -> SegmentList {
        SegmentList::new().append(FrameId(1)).append(FrameId(2))
    }

    #[test]
    fn unknown_segment_does_not_start() {
        assert!(GestureSession::begin_drag(&two(), SegmentId(5)).is_none());
        assert!(GestureSession::begin_resize(&two(), SegmentId(5)).is_none());
    }

    #[test]
    fn resize_preview_does_not_push() {
        let mut g = GestureSession::begin_resize(&two(), SegmentId(1)).unwrap();
        g.resize_to(120.0);
        g.resize_to(50.0);
        assert_eq!(g.last_value(), Some(50.0));
        assert_eq!(g.preview().as_slice()[0].time, 25.0);
        assert_eq!(g.preview().as_slice()[1].position, 210.0);
        assert_eq!(g.cancel(), two());
    }

    #[test]
    fn resize_commit_recomputes() {
        let mut g = GestureSession::begin_resize(&two(), SegmentId(1)).unwrap();
        g.resize_to(80.0);
        let committed = g.finish_resize(50.0);
        assert_eq!(committed.as_slice()[1].position, 60.0);
    }

    #[test]
    fn commit_ignores_preview_state() {
        let mut g = GestureSession::begin_resize(&two(), SegmentId(1)).unwrap();
        g.resize_to(400.0);
        assert_eq!(g.finish_resize(50.0), two().retime(SegmentId(1), 50.0));
    }

    #[test]
    fn cancel_restores_snapshot() {
        let mut g = GestureSession::begin_resize(&two(), SegmentId(2)).unwrap();
        g.resize_to(10.0);
        assert_eq!(g.cancel(), two());
    }

    #[test]
    fn drag_commit_reorders() {
        let mut g = GestureSession::begin_drag(&two(), SegmentId(2)).unwrap();
        g.drag_to(-30.0);
        assert_eq!(g.kind(), GestureKind::Drag);
        assert_eq!(g.drag_offset(), Some(0.0));
        let committed = g.finish_drag(-30.0);
        let ids: Vec<u32> = committed.iter().map(|s| s.id.0).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn unmoved_drag_has_no_value() {
        let g = GestureSession::begin_drag(&two(), SegmentId(2)).unwrap();
        assert_eq!(g.last_value(), None);
        assert_eq!(g.drag_offset(), None);
    }

    #[test]
    fn mismatched_finish_cancels() {
        let mut g = GestureSession::begin_drag(&two(), SegmentId(2)).unwrap();
        g.drag_to(0.0);
        assert_eq!(g.finish_resize(40.0), two());
    }
}

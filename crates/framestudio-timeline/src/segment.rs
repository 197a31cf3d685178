//! Segment types for the timeline.

use framestudio_core::{FrameId, SegmentId};
use serde::{Deserialize, Serialize};

use crate::{layout, DEFAULT_GAP, DEFAULT_TIME, SCALE};

/// The timeline entry of one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Timeline-local key
    pub id: SegmentId,
    /// Duration in time units
    pub time: f64,
    /// Left offset in length units
    pub position: f64,
    /// Spacing after this segment, in length units
    pub gap: f64,
    /// Owning frame. Fixed for the lifetime of the segment.
    frame: FrameId,
}

impl Segment {
    /// Create a segment with default duration and gap.
    pub fn new(id: SegmentId, frame: FrameId, position: f64) -> Self {
        Self {
            id,
            time: DEFAULT_TIME,
            position,
            gap: DEFAULT_GAP,
            frame,
        }
    }

    /// The frame this segment represents.
    #[inline]
    pub fn frame(&self) -> FrameId {
        self.frame
    }

    /// On-screen length of the segment body.
    #[inline]
    pub fn width(&self) -> f64 {
        self.time * SCALE
    }

    /// Offset at which the following segment starts.
    #[inline]
    pub fn next_position(&self) -> f64 {
        self.position + self.width() + self.gap
    }

    /// Duration label drawn on the segment.
    pub fn time_label(&self) -> String {
        format!("{:.2}s", self.time)
    }
}

/// An ordered snapshot of the timeline.
///
/// Lists are values: every layout command returns a new list and leaves the
/// receiver untouched, so a committed list can be shared while a gesture
/// previews on a copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentList {
    segments: Vec<Segment>,
}

impl SegmentList {
    /// Create an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_vec(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub(crate) fn into_vec(self) -> Vec<Segment> {
        self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the timeline has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments in timeline order.
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// Segments in timeline order, left to right.
    pub fn as_slice(&self) -> &[Segment] {
        &self.segments
    }

    /// The right-most segment.
    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// Find a segment by id.
    pub fn get(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == id)
    }

    /// Index of a segment in timeline order.
    pub fn index_of(&self, id: SegmentId) -> Option<usize> {
        self.segments.iter().position(|s| s.id == id)
    }

    /// Find the segment bound to `frame`.
    pub fn find_by_frame(&self, frame: FrameId) -> Option<&Segment> {
        self.segments.iter().find(|s| s.frame == frame)
    }

    /// Whether `frame` already has a segment.
    pub fn contains_frame(&self, frame: FrameId) -> bool {
        self.find_by_frame(frame).is_some()
    }

    /// Frames in timeline order.
    pub fn frames(&self) -> impl Iterator<Item = FrameId> + '_ {
        self.segments.iter().map(Segment::frame)
    }

    /// Id for the next appended segment.
    pub(crate) fn next_id(&self) -> SegmentId {
        let max = self.segments.iter().map(|s| s.id.0).max().unwrap_or(0);
        SegmentId(max + 1)
    }

    /// End of the last segment body, excluding its trailing gap.
    pub fn total_length(&self) -> f64 {
        self.segments
            .last()
            .map(|s| s.position + s.width())
            .unwrap_or(0.0)
    }

    /// Sum of all segment durations.
    pub fn total_time(&self) -> f64 {
        self.segments.iter().map(|s| s.time).sum()
    }

    /// See [`layout::append`].
    pub fn append(&self, frame: FrameId) -> Self {
        layout::append(self, frame)
    }

    /// See [`layout::reorder`].
    pub fn reorder(&self, id: SegmentId, proposed_x: f64) -> Self {
        layout::reorder(self, id, proposed_x)
    }

    /// See [`layout::retime`].
    pub fn retime(&self, id: SegmentId, new_width: f64) -> Self {
        layout::retime(self, id, new_width)
    }

    /// See [`layout::preview_retime`].
    pub fn preview_retime(&self, id: SegmentId, new_width: f64) -> Self {
        layout::preview_retime(self, id, new_width)
    }
}

impl<'a> IntoIterator for &'a SegmentList {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

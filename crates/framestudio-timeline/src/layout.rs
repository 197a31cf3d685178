//! Layout operations on the segment list.
//!
//! All operations are pure: they take a committed [`SegmentList`] and return
//! a new one. A reference to an unknown segment is a silent miss and returns
//! the input unchanged, since stale pointer handlers are expected.
//!
//! After every committing operation the list satisfies
//! `next.position == prev.position + prev.time * SCALE + prev.gap`.

use framestudio_core::{FrameId, SegmentId};
use thiserror::Error;
use tracing::{debug, warn};

use crate::segment::{Segment, SegmentList};

/// A broken layout invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutViolation {
    /// Segment at `index` sits left of its predecessor.
    #[error("segment at index {index} is out of order")]
    OutOfOrder { index: usize },

    /// Segment does not start where its predecessor ends.
    #[error("{id} at {actual} should start at {expected}")]
    Misplaced {
        id: SegmentId,
        expected: f64,
        actual: f64,
    },

    /// The first segment does not start at zero.
    #[error("first segment starts at {actual}, expected 0")]
    FirstNotAtOrigin { actual: f64 },
}

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() <= EPSILON * a.abs().max(b.abs()).max(1.0)
}

/// Append a default segment for `frame` at the end of the timeline.
pub fn append(segments: &SegmentList, frame: FrameId) -> SegmentList {
    let position = segments.last().map(Segment::next_position).unwrap_or(0.0);
    let segment = Segment::new(segments.next_id(), frame, position);
    debug!(segment = %segment.id, %frame, position, "Appending segment");

    let mut out = segments.clone().into_vec();
    out.push(segment);
    SegmentList::from_vec(out)
}

/// Move a segment to the rank implied by a drag that ended at `proposed_x`.
///
/// The segment is inserted before the first remaining segment whose position
/// is not less than the clamped offset; ties therefore go to the moved
/// segment. Positions are then recomputed from zero, so `proposed_x` only
/// decides the rank.
pub fn reorder(segments: &SegmentList, id: SegmentId, proposed_x: f64) -> SegmentList {
    let Some(index) = segments.index_of(id) else {
        debug!(segment = %id, "Reorder of unknown segment ignored");
        return segments.clone();
    };

    // f64::max maps NaN to the other operand.
    let target = proposed_x.max(0.0);

    let mut out = segments.clone().into_vec();
    let mut moved = out.remove(index);
    moved.position = target;

    let rank = out
        .iter()
        .position(|s| s.position >= moved.position)
        .unwrap_or(out.len());
    debug!(segment = %id, from = index, to = rank, x = target, "Reordering segment");
    out.insert(rank, moved);

    recompute_positions(&SegmentList::from_vec(out))
}

/// Commit a resize: convert `new_width` to a duration and push later segments.
pub fn retime(segments: &SegmentList, id: SegmentId, new_width: f64) -> SegmentList {
    match set_time(segments, id, new_width) {
        Some(updated) => recompute_positions(&updated),
        None => segments.clone(),
    }
}

/// Update a segment's duration without moving any other segment.
///
/// Used while a resize is in progress; the result may break the spacing
/// invariant and must not be committed.
pub fn preview_retime(segments: &SegmentList, id: SegmentId, new_width: f64) -> SegmentList {
    set_time(segments, id, new_width).unwrap_or_else(|| segments.clone())
}

fn set_time(segments: &SegmentList, id: SegmentId, new_width: f64) -> Option<SegmentList> {
    let Some(index) = segments.index_of(id) else {
        debug!(segment = %id, "Resize of unknown segment ignored");
        return None;
    };
    if !new_width.is_finite() || new_width <= 0.0 {
        debug!(segment = %id, width = new_width, "Rejected non-positive width");
        return None;
    }

    let mut out = segments.clone().into_vec();
    out[index].time = new_width / crate::SCALE;
    let end = out.iter().fold(0.0, |cursor, seg| cursor + seg.width() + seg.gap);
    if !end.is_finite() {
        debug!(segment = %id, width = new_width, "Rejected width that overflows the timeline");
        return None;
    }
    Some(SegmentList::from_vec(out))
}

/// Lay every segment out left to right starting at zero, keeping the order.
pub fn recompute_positions(segments: &SegmentList) -> SegmentList {
    let mut out = segments.clone().into_vec();
    let mut cursor = 0.0;
    for seg in &mut out {
        seg.position = cursor;
        cursor = seg.next_position();
    }
    SegmentList::from_vec(out)
}

/// Verify ordering and spacing of a committed list.
pub fn check_invariants(segments: &SegmentList) -> Result<(), LayoutViolation> {
    let slice = segments.as_slice();
    if let Some(first) = slice.first() {
        if !approx_eq(first.position, 0.0) {
            return Err(LayoutViolation::FirstNotAtOrigin {
                actual: first.position,
            });
        }
    }
    for (i, pair) in slice.windows(2).enumerate() {
        let (a, b) = (&pair[0], &pair[1]);
        if b.position < a.position {
            return Err(LayoutViolation::OutOfOrder { index: i + 1 });
        }
        let expected = a.next_position();
        if !approx_eq(b.position, expected) {
            return Err(LayoutViolation::Misplaced {
                id: b.id,
                expected,
                actual: b.position,
            });
        }
    }
    Ok(())
}

/// Return a list that satisfies the layout invariants.
///
/// A violation is a defect: debug builds assert, release builds log and fall
/// back to a full position recompute.
pub fn repair(segments: &SegmentList) -> SegmentList {
    let checked = check_invariants(segments);
    debug_assert!(checked.is_ok(), "timeline layout violated: {checked:?}");
    match checked {
        Ok(()) => segments.clone(),
        Err(violation) => {
            warn!(%violation, "Timeline layout violated, recomputing positions");
            recompute_positions(segments)
        }
    }
}

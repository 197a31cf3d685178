//! Integration tests for the timeline subsystem.
//!
//! Exercises the layout engine through the gesture sessions and the timeline
//! widget's pointer tracking, the way an editing session drives them.

use framestudio_core::{FrameId, SegmentId};
use framestudio_timeline::{layout, GestureSession, SegmentList, TimelineFile, SCALE};
use framestudio_ui::{HandleEdge, PointerGesture, SegmentHit, TimelineAction};

// ── Helpers ────────────────────────────────────────────────────

fn timeline(frames: u32) -> SegmentList {
    (1..=frames).fold(SegmentList::new(), |list, n| layout::append(&list, FrameId(n)))
}

fn positions(list: &SegmentList) -> Vec<f64> {
    list.iter().map(|s| s.position).collect()
}

fn ids(list: &SegmentList) -> Vec<u32> {
    list.iter().map(|s| s.id.0).collect()
}

/// The list a finished pointer gesture asks the editor to commit.
fn apply(list: &SegmentList, action: TimelineAction) -> SegmentList {
    match action {
        TimelineAction::Reorder { committed, .. } | TimelineAction::Retime { committed, .. } => {
            committed
        }
        TimelineAction::SwitchFrame(_) => list.clone(),
    }
}

// ── Worked scenarios ───────────────────────────────────────────

#[test]
fn two_appends_lay_out_left_to_right() {
    let list = timeline(2);
    assert_eq!(positions(&list), vec![0.0, 210.0]);
    assert_eq!(ids(&list), vec![1, 2]);
}

#[test]
fn resizing_first_segment_pulls_second_in() {
    let list = layout::retime(&timeline(2), SegmentId(1), 50.0);
    assert_eq!(list.get(SegmentId(1)).unwrap().time, 25.0);
    assert_eq!(list.get(SegmentId(2)).unwrap().position, 60.0);
}

#[test]
fn dragging_second_to_origin_swaps_order() {
    let list = layout::reorder(&timeline(2), SegmentId(2), 0.0);
    assert_eq!(ids(&list), vec![2, 1]);
    assert_eq!(positions(&list), vec![0.0, 210.0]);
}

// ── Properties ─────────────────────────────────────────────────

#[test]
fn negative_drop_matches_origin_drop() {
    let list = timeline(3);
    assert_eq!(
        layout::reorder(&list, SegmentId(3), -50.0),
        layout::reorder(&list, SegmentId(3), 0.0)
    );
}

#[test]
fn drop_on_exact_position_lands_before() {
    let list = timeline(3);
    let target = list.get(SegmentId(2)).unwrap().position;
    let moved = layout::reorder(&list, SegmentId(3), target);
    assert_eq!(ids(&moved), vec![1, 3, 2]);
}

#[test]
fn unknown_segment_leaves_timeline_unchanged() {
    let list = timeline(2);
    assert_eq!(layout::reorder(&list, SegmentId(42), 10.0), list);
    assert_eq!(layout::retime(&list, SegmentId(42), 10.0), list);
    assert!(GestureSession::begin_drag(&list, SegmentId(42)).is_none());
}

#[test]
fn mixed_edit_sequence_keeps_invariants() {
    let mut list = timeline(4);
    list = layout::retime(&list, SegmentId(2), 37.0);
    list = layout::reorder(&list, SegmentId(4), 5.0);
    list = layout::append(&list, FrameId(5));
    list = layout::retime(&list, SegmentId(5), 400.0);
    list = layout::reorder(&list, SegmentId(1), 10_000.0);
    assert!(layout::check_invariants(&list).is_ok());
    assert_eq!(list.last().unwrap().id, SegmentId(1));
    assert_eq!(list.len(), 5);
}

// ── Pointer gestures ───────────────────────────────────────────

#[test]
fn pointer_drag_commits_through_layout() {
    let list = timeline(3);
    // Grab the third segment in its middle and pull it to the far left.
    let mut gesture = PointerGesture::begin(&list, SegmentId(3), SegmentHit::Body, 520.0).unwrap();
    gesture.update(400.0);
    gesture.update(100.0);
    let action = gesture.finish().unwrap();
    let TimelineAction::Reorder { segment, x, .. } = &action else {
        panic!("expected a reorder");
    };
    assert_eq!((*segment, *x), (SegmentId(3), 0.0));
    let committed = apply(&list, action);
    assert_eq!(ids(&committed), vec![3, 1, 2]);
    assert!(layout::check_invariants(&committed).is_ok());
}

#[test]
fn pointer_resize_previews_then_commits() {
    let list = timeline(2);
    let mut gesture = PointerGesture::begin(
        &list,
        SegmentId(1),
        SegmentHit::Handle(HandleEdge::Right),
        200.0,
    )
    .unwrap();
    gesture.update(300.0);
    let preview = gesture.preview().clone();
    assert_eq!(preview.get(SegmentId(1)).unwrap().width(), 300.0);
    assert_eq!(preview.get(SegmentId(2)).unwrap().position, 210.0);

    let committed = apply(&list, gesture.finish().unwrap());
    assert_eq!(committed.get(SegmentId(1)).unwrap().time, 300.0 / SCALE);
    assert_eq!(committed.get(SegmentId(2)).unwrap().position, 310.0);
}

#[test]
fn left_handle_shrinks_width() {
    let list = timeline(1);
    let mut gesture = PointerGesture::begin(
        &list,
        SegmentId(1),
        SegmentHit::Handle(HandleEdge::Left),
        0.0,
    )
    .unwrap();
    gesture.update(40.0);
    assert_eq!(
        gesture.finish(),
        Some(TimelineAction::Retime {
            segment: SegmentId(1),
            width: 160.0,
            committed: layout::retime(&list, SegmentId(1), 160.0),
        })
    );
}

#[test]
fn unmoved_pointer_commits_nothing() {
    let list = timeline(2);
    let gesture = PointerGesture::begin(&list, SegmentId(2), SegmentHit::Body, 300.0).unwrap();
    assert!(gesture.is_drag());
    assert_eq!(gesture.finish(), None);
}

#[test]
fn cancelled_session_restores_snapshot() {
    let list = timeline(3);
    let mut session = GestureSession::begin_resize(&list, SegmentId(2)).unwrap();
    session.resize_to(20.0);
    assert_ne!(session.preview(), &list);
    assert_eq!(session.cancel(), list);
}

// ── Persistence ────────────────────────────────────────────────

#[test]
fn timeline_file_round_trip_after_edits() {
    let list = layout::reorder(&layout::retime(&timeline(3), SegmentId(1), 80.0), SegmentId(3), 0.0);
    let file = TimelineFile::new(uuid::Uuid::new_v4(), list.clone());
    let json = file.to_json().unwrap();
    let loaded = TimelineFile::from_json(&json).unwrap();
    assert_eq!(loaded.segments, list);
    assert_eq!(loaded.document_id, file.document_id);
}

#[test]
fn hand_edited_positions_are_recomputed_on_load() {
    let file = TimelineFile::new(uuid::Uuid::nil(), timeline(2));
    let mut value = file.to_value().unwrap();
    value["segments"][1]["position"] = serde_json::json!(999.0);
    let loaded = TimelineFile::from_value(value).unwrap();
    assert_eq!(positions(&loaded.segments), vec![0.0, 210.0]);
}

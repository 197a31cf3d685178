//! Timeline strip: one segment per frame, with drag, resize and click.
//!
//! The widget never edits the committed segment list. It previews gestures
//! locally and reports the terminal event as a [`TimelineAction`] carrying
//! the list the gesture session committed.

use crate::handles::{handle_cursor, hit_test, resized_width, HandleEdge, SegmentHit, HANDLE_WIDTH};
use crate::previews::PreviewCache;
use crate::theme::Theme;
use egui::{self, Color32, Pos2, Rect, Rounding, Stroke, Vec2};
use framestudio_core::{FrameId, SegmentId};
use framestudio_timeline::{GestureKind, GestureSession, Segment, SegmentList};

/// Height of a segment block.
pub const SEGMENT_HEIGHT: f32 = 96.0;
const LABEL_INSET: f32 = 10.0;
const HANDLE_DRAW_WIDTH: f32 = 4.0;

// ── Actions ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum TimelineAction {
    /// A segment was clicked; its frame should become active.
    SwitchFrame(FrameId),
    /// A drag ended with the segment's left edge at `x`.
    Reorder {
        segment: SegmentId,
        x: f64,
        committed: SegmentList,
    },
    /// A resize ended with the segment `width` units wide.
    Retime {
        segment: SegmentId,
        width: f64,
        committed: SegmentList,
    },
}

// ── Gesture ────────────────────────────────────────────────────

/// Pointer tracking for one drag or resize.
#[derive(Debug, Clone)]
pub struct PointerGesture {
    session: GestureSession,
    edge: Option<HandleEdge>,
    /// Pointer position when the gesture started, in length units.
    grab: f64,
    /// Segment position (drag) or width (resize) when the gesture started.
    origin: f64,
}

impl PointerGesture {
    /// Start a gesture on `segment`. `None` if it is not on the timeline.
    pub fn begin(
        committed: &SegmentList,
        segment: SegmentId,
        hit: SegmentHit,
        pointer: f64,
    ) -> Option<Self> {
        let current = committed.get(segment)?;
        let (session, edge, origin) = match hit {
            SegmentHit::Body => (
                GestureSession::begin_drag(committed, segment)?,
                None,
                current.position,
            ),
            SegmentHit::Handle(edge) => (
                GestureSession::begin_resize(committed, segment)?,
                Some(edge),
                current.width(),
            ),
        };
        Some(Self {
            session,
            edge,
            grab: pointer,
            origin,
        })
    }

    /// Follow the pointer to `pointer` length units.
    pub fn update(&mut self, pointer: f64) {
        let delta = pointer - self.grab;
        match self.edge {
            None => self.session.drag_to(self.origin + delta),
            Some(edge) => self
                .session
                .resize_to(resized_width(edge, self.origin, delta)),
        }
    }

    /// Commit the gesture, or `None` if the pointer never moved.
    pub fn finish(self) -> Option<TimelineAction> {
        let value = self.session.last_value()?;
        let segment = self.session.segment();
        Some(match self.session.kind() {
            GestureKind::Drag => TimelineAction::Reorder {
                segment,
                x: value,
                committed: self.session.finish_drag(value),
            },
            GestureKind::Resize => TimelineAction::Retime {
                segment,
                width: value,
                committed: self.session.finish_resize(value),
            },
        })
    }

    pub fn segment(&self) -> SegmentId {
        self.session.segment()
    }

    pub fn edge(&self) -> Option<HandleEdge> {
        self.edge
    }

    pub fn is_drag(&self) -> bool {
        self.session.kind() == GestureKind::Drag
    }

    /// Where the dragged segment is drawn while the pointer is down.
    pub fn drag_offset(&self) -> Option<f64> {
        self.session.drag_offset()
    }

    /// List to draw while the gesture runs.
    pub fn preview(&self) -> &SegmentList {
        self.session.preview()
    }
}

// ── State ──────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct TimelineState {
    pub scroll_x: f32,
    pub hovered: Option<SegmentId>,
    gesture: Option<PointerGesture>,
}

impl TimelineState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> Option<&PointerGesture> {
        self.gesture.as_ref()
    }

    /// Drop the in-progress gesture; the committed list was never touched.
    pub fn cancel_gesture(&mut self) {
        if self.gesture.take().is_some() {
            tracing::debug!("Timeline gesture cancelled");
        }
    }
}

// ── Geometry ───────────────────────────────────────────────────

/// Convert a screen x coordinate to timeline length units.
pub fn to_units(lane: Rect, x: f32, scroll_x: f32) -> f64 {
    f64::from(x - lane.left() + scroll_x)
}

/// Screen rectangle of `segment` inside `lane`.
pub fn segment_rect(lane: Rect, segment: &Segment, scroll_x: f32) -> Rect {
    Rect::from_min_size(
        Pos2::new(lane.left() + segment.position as f32 - scroll_x, lane.top()),
        Vec2::new(segment.width() as f32, lane.height()),
    )
}

/// The segment under `pos` and the part of it that was hit.
pub fn segment_at(
    lane: Rect,
    segments: &SegmentList,
    scroll_x: f32,
    pos: Pos2,
) -> Option<(SegmentId, SegmentHit)> {
    segments.iter().rev().find_map(|segment| {
        hit_test(segment_rect(lane, segment, scroll_x), pos, HANDLE_WIDTH)
            .map(|hit| (segment.id, hit))
    })
}

// ── Rendering ──────────────────────────────────────────────────

pub fn show_timeline(
    ui: &mut egui::Ui,
    state: &mut TimelineState,
    segments: &SegmentList,
    active_frame: Option<FrameId>,
    previews: &PreviewCache,
) -> Vec<TimelineAction> {
    let mut actions = Vec::new();

    let size = Vec2::new(ui.available_width(), SEGMENT_HEIGHT + 2.0 * Theme::SPACE_XS);
    let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
    let rect = response.rect;
    painter.rect_filled(rect, 0.0, Theme::lane());
    let lane = rect.shrink2(Vec2::new(0.0, Theme::SPACE_XS));

    // Horizontal scroll
    if response.hovered() && state.gesture.is_none() {
        let delta = ui.input(|i| i.smooth_scroll_delta);
        let max_scroll = (segments.total_length() as f32 - lane.width()).max(0.0);
        state.scroll_x = (state.scroll_x - delta.x - delta.y).clamp(0.0, max_scroll);
    }

    // --- Gesture start ---
    if response.drag_started() {
        if let Some(pos) = response.interact_pointer_pos() {
            if let Some((id, hit)) = segment_at(lane, segments, state.scroll_x, pos) {
                let pointer = to_units(lane, pos.x, state.scroll_x);
                state.gesture = PointerGesture::begin(segments, id, hit, pointer);
            }
        }
    }

    // --- Gesture update ---
    if response.dragged() {
        if let (Some(gesture), Some(pos)) =
            (state.gesture.as_mut(), response.interact_pointer_pos())
        {
            gesture.update(to_units(lane, pos.x, state.scroll_x));
            if let Some(edge) = gesture.edge() {
                ui.ctx().set_cursor_icon(handle_cursor(edge));
            }
        }
    }

    // --- Gesture end ---
    if response.drag_stopped() {
        if let Some(action) = state.gesture.take().and_then(PointerGesture::finish) {
            actions.push(action);
        }
    }
    if state.gesture.is_some() && ui.input(|i| i.key_pressed(egui::Key::Escape)) {
        state.cancel_gesture();
    }

    // --- Click: switch frame ---
    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            if let Some((id, _)) = segment_at(lane, segments, state.scroll_x, pos) {
                if let Some(segment) = segments.get(id) {
                    actions.push(TimelineAction::SwitchFrame(segment.frame()));
                }
            }
        }
    }

    // Hover
    let hover = response
        .hover_pos()
        .filter(|_| response.hovered())
        .and_then(|pos| segment_at(lane, segments, state.scroll_x, pos));
    if state.gesture.is_none() {
        if let Some((_, SegmentHit::Handle(edge))) = hover {
            ui.ctx().set_cursor_icon(handle_cursor(edge));
        }
    }
    state.hovered = hover.map(|(id, _)| id);

    // --- Segments ---
    let painter = painter.with_clip_rect(rect);
    let shown = state.gesture.as_ref().map_or(segments, |g| g.preview());
    let dragged = state
        .gesture
        .as_ref()
        .filter(|g| g.is_drag())
        .map(|g| (g.segment(), g.drag_offset()));

    let mut on_top = None;
    for segment in shown {
        let mut seg_rect = segment_rect(lane, segment, state.scroll_x);
        if let Some((id, offset)) = dragged {
            if id == segment.id {
                if let Some(x) = offset {
                    seg_rect = seg_rect.translate(Vec2::new((x - segment.position) as f32, 0.0));
                }
                on_top = Some((segment, seg_rect));
                continue;
            }
        }
        if seg_rect.right() < rect.left() || seg_rect.left() > rect.right() {
            continue;
        }
        let look = SegmentLook {
            active: active_frame == Some(segment.frame()),
            hovered: state.hovered == Some(segment.id),
            dragging: false,
        };
        draw_segment(&painter, seg_rect, segment, look, previews);
    }
    if let Some((segment, seg_rect)) = on_top {
        let look = SegmentLook {
            active: active_frame == Some(segment.frame()),
            hovered: true,
            dragging: true,
        };
        draw_segment(&painter, seg_rect, segment, look, previews);
    }

    if segments.is_empty() {
        painter.text(
            lane.center(),
            egui::Align2::CENTER_CENTER,
            "No frames yet",
            egui::FontId::proportional(Theme::FONT_SM),
            Theme::t3(),
        );
    }

    actions
}

// ── Sub-components ─────────────────────────────────────────────

#[derive(Clone, Copy)]
struct SegmentLook {
    active: bool,
    hovered: bool,
    dragging: bool,
}

fn draw_segment(
    painter: &egui::Painter,
    rect: Rect,
    segment: &Segment,
    look: SegmentLook,
    previews: &PreviewCache,
) {
    let rounding = Rounding::same(Theme::RADIUS_LG);
    let body = rect.shrink(Theme::STROKE_DRAG / 2.0);

    painter.rect_filled(body, rounding, Theme::bg3());
    if let Some(texture) = previews.texture(segment.frame()) {
        painter.image(
            texture.id(),
            body,
            Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
            Color32::WHITE,
        );
    }
    if look.active {
        painter.rect_filled(body, rounding, Theme::accent_subtle());
    }

    let border = if look.dragging {
        Theme::STROKE_DRAG
    } else {
        Theme::STROKE_EMPHASIS
    };
    painter.rect_stroke(body, rounding, Stroke::new(border, Theme::accent()));

    // Duration badge
    let galley = painter.layout_no_wrap(
        segment.time_label(),
        egui::FontId::proportional(Theme::FONT_XS),
        Color32::WHITE,
    );
    let anchor = Pos2::new(body.right() - LABEL_INSET, body.top() + LABEL_INSET);
    let label_rect = egui::Align2::RIGHT_TOP.anchor_size(anchor, galley.size());
    painter.rect_filled(label_rect.expand(Theme::SPACE_XS), 2.0, Theme::badge());
    painter.galley(label_rect.min, galley, Color32::WHITE);

    // Resize handles
    if look.hovered {
        let handle_color = Theme::with_alpha(Theme::accent(), 160);
        let left = Rect::from_min_size(body.min, Vec2::new(HANDLE_DRAW_WIDTH, body.height()));
        let right = Rect::from_min_size(
            Pos2::new(body.right() - HANDLE_DRAW_WIDTH, body.top()),
            Vec2::new(HANDLE_DRAW_WIDTH, body.height()),
        );
        painter.rect_filled(
            left,
            Rounding {
                nw: Theme::RADIUS_LG,
                sw: Theme::RADIUS_LG,
                ne: 0.0,
                se: 0.0,
            },
            handle_color,
        );
        painter.rect_filled(
            right,
            Rounding {
                nw: 0.0,
                sw: 0.0,
                ne: Theme::RADIUS_LG,
                se: Theme::RADIUS_LG,
            },
            handle_color,
        );
    }
}

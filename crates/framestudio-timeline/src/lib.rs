//! FrameStudio Timeline - Segment model and layout engine
//!
//! Every frame of a document is represented on the timeline by one segment:
//! - Segments are laid out left to right, separated by a fixed gap
//! - Dragging a segment changes its rank, never its literal offset
//! - Resizing a segment changes its duration and pushes later segments
//! - Gestures preview on a scratch copy and commit once at the end

pub mod gesture;
pub mod layout;
pub mod segment;
pub mod serialization;

pub use gesture::{GestureKind, GestureSession};
pub use layout::LayoutViolation;
pub use segment::{Segment, SegmentList};
pub use serialization::TimelineFile;

/// Length units per time unit on the timeline.
pub const SCALE: f64 = 2.0;

/// Duration given to a freshly appended segment.
pub const DEFAULT_TIME: f64 = 100.0;

/// Gap rendered after a freshly appended segment.
pub const DEFAULT_GAP: f64 = 10.0;

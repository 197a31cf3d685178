//! FrameStudio UI - egui widgets for the frame editor
//!
//! Provides UI components:
//! - Timeline strip with drag, resize and click
//! - Frame thumbnails
//! - Tool sidebar and selection toolbar

pub mod handles;
pub mod previews;
pub mod sidebar;
pub mod theme;
pub mod timeline;

pub use handles::{HandleEdge, SegmentHit};
pub use previews::PreviewCache;
pub use theme::Theme;
pub use timeline::{show_timeline, PointerGesture, TimelineAction, TimelineState};

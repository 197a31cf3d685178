//! FrameStudio Core - Foundation types for the multi-frame editor
//!
//! This crate provides the fundamental types shared by every FrameStudio crate:
//! - Identifiers for frames and timeline segments
//! - The common error type
//! - Geometry (sizes, rectangles)
//! - RGBA colors

pub mod color;
pub mod error;
pub mod geometry;
pub mod ids;

pub use color::Rgba;
pub use error::{FrameStudioError, Result};
pub use geometry::{Rect, Size};
pub use ids::{FrameId, SegmentId};

/// Default document dimensions for a new frame.
pub mod defaults {
    /// Default canvas width in pixels.
    pub const CANVAS_WIDTH: u32 = 900;

    /// Default canvas height in pixels.
    pub const CANVAS_HEIGHT: u32 = 1200;

    /// Settling period for the autosave debouncer, in milliseconds.
    pub const AUTOSAVE_DEBOUNCE_MS: u64 = 500;
}

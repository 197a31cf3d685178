//! Error types for FrameStudio.

use thiserror::Error;

use crate::ids::FrameId;

/// Main error type for FrameStudio operations.
#[derive(Error, Debug)]
pub enum FrameStudioError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Frame not found: {0}")]
    NotFound(FrameId),

    #[error("Frame already registered: {0}")]
    DuplicateFrame(FrameId),

    #[error("Surface creation failed for {container}: {reason}")]
    SurfaceCreation { container: String, reason: String },

    #[error("Render error: {0}")]
    Render(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl FrameStudioError {
    /// True for errors caused by a stale reference to a frame.
    ///
    /// Callers driving the UI treat these as benign misses.
    pub fn is_reference_miss(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type alias for FrameStudio operations.
pub type Result<T> = std::result::Result<T, FrameStudioError>;

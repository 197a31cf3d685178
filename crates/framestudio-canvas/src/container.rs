//! Container ids.

use framestudio_core::FrameId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of the on-screen container that hosts a frame's surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerId(String);

impl ContainerId {
    /// The container of `frame`, `frame-{n}`.
    pub fn for_frame(frame: FrameId) -> Self {
        Self(format!("frame-{}", frame.get()))
    }

    /// A container with an arbitrary id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

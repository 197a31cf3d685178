//! Identifiers for frames and timeline segments.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a drawable frame.
///
/// Frame ids are positive and handed out sequentially from 1 in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameId(pub u32);

impl FrameId {
    /// The first frame of every session.
    pub const FIRST: Self = Self(1);

    /// The id allocated after this one.
    #[inline]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Raw numeric value.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame #{}", self.0)
    }
}

/// Timeline-local key of a segment.
///
/// Distinct from [`FrameId`]; the association between the two is held
/// explicitly on each segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(pub u32);

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "segment #{}", self.0)
    }
}

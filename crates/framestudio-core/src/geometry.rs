//! Geometric primitives.

use serde::{Deserialize, Serialize};

/// Pixel dimensions of a surface or document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True if either dimension is zero.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

fn extent(len: u32) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

/// Axis-aligned integer rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive), saturating at `i32::MAX`.
    #[inline]
    pub fn right(self) -> i32 {
        self.x.saturating_add(extent(self.width))
    }

    /// Bottom edge (exclusive), saturating at `i32::MAX`.
    #[inline]
    pub fn bottom(self) -> i32 {
        self.y.saturating_add(extent(self.height))
    }

    /// Clip this rectangle to `0..size`. Returns `None` when nothing remains.
    pub fn clip_to(self, size: Size) -> Option<Rect> {
        let x0 = self.x.max(0);
        let y0 = self.y.max(0);
        let x1 = self.right().min(extent(size.width));
        let y1 = self.bottom().min(extent(size.height));
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect::new(x0, y0, (x1 - x0) as u32, (y1 - y0) as u32))
    }
}

//! Minimal layout geometry used for viewport proximity checks.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width.max(0.0)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height.max(0.0)
    }

    /// Grow the rectangle by `margin` on every side.
    pub fn expand(&self, margin: RootMargin) -> Self {
        let m = margin.0.max(0.0);
        Self {
            x: self.x - m,
            y: self.y - m,
            width: self.width.max(0.0) + 2.0 * m,
            height: self.height.max(0.0) + 2.0 * m,
        }
    }

    /// Edge contact counts as an intersection, matching how browsers report
    /// zero-area entries as intersecting.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }
}

/// Distance in pixels by which the viewport is grown before proximity checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RootMargin(pub f32);

impl RootMargin {
    pub const ZERO: RootMargin = RootMargin(0.0);

    pub const fn px(value: f32) -> Self {
        RootMargin(value)
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        RootMargin(200.0)
    }
}

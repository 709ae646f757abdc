//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Browser tab identifier as handed out by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TabId(pub u32);

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tab#{}", self.0)
    }
}

/// Visible area of the page, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Viewport as a rectangle anchored at the origin
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

/// Axis-aligned bounding box in viewport coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }

    /// Overlapping area of two rectangles, empty when they don't meet
    pub fn intersection(&self, other: &Rect) -> Rect {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Rect::new(left, top, (right - left).max(0.0), (bottom - top).max(0.0))
    }

    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// The four corners pulled `inset` pixels toward the centre
    pub fn inset_corners(&self, inset: f64) -> [(f64, f64); 4] {
        let dx = inset.min(self.width / 2.0);
        let dy = inset.min(self.height / 2.0);
        [
            (self.left + dx, self.top + dy),
            (self.right() - dx, self.top + dy),
            (self.left + dx, self.bottom() - dy),
            (self.right() - dx, self.bottom() - dy),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersection() {
        let viewport = Viewport::new(800.0, 600.0).rect();
        assert!(Rect::new(10.0, 10.0, 50.0, 20.0).intersects(&viewport));
        assert!(!Rect::new(10.0, 700.0, 50.0, 20.0).intersects(&viewport));
        assert!(!Rect::new(-60.0, 10.0, 50.0, 20.0).intersects(&viewport));
    }

    #[test]
    fn test_intersection_clips_to_viewport() {
        let viewport = Viewport::new(800.0, 600.0).rect();
        let clipped = Rect::new(-10.0, -10.0, 900.0, 700.0).intersection(&viewport);
        assert_eq!(clipped, viewport);
        assert_eq!(clipped.center(), (400.0, 300.0));
        assert!(Rect::new(900.0, 0.0, 50.0, 50.0).intersection(&viewport).is_empty());
    }

    #[test]
    fn test_inset_corners_stay_inside() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        for (x, y) in rect.inset_corners(1.0) {
            assert!(rect.contains(x, y));
        }
    }
}

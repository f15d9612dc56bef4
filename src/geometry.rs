//! Screen geometry in logical pixels.
//!
//! The placement engine works on plain `f32` values so it can be driven and
//! tested without a window. Conversions to and from GPUI's
//! `Bounds<Pixels>` / `Size<Pixels>` / `Point<Pixels>` live here as well.

use crate::error::{ensure_finite, ensure_non_negative, OverlayResult};
use gpui::{point, px, size, Bounds, Pixels};

/// A point in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero in both dimensions.
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Reject NaN, infinite, or negative dimensions.
    pub fn validate(&self) -> OverlayResult<()> {
        ensure_non_negative("width", self.width)?;
        ensure_non_negative("height", self.height)
    }
}

/// An axis-aligned rectangle: top-left origin plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn left(&self) -> f32 {
        self.origin.x
    }

    pub fn top(&self) -> f32 {
        self.origin.y
    }

    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }

    /// Origin may be negative (partially off-screen triggers), size may not.
    pub fn validate(&self) -> OverlayResult<()> {
        ensure_finite("x", self.origin.x)?;
        ensure_finite("y", self.origin.y)?;
        self.size.validate()
    }
}

/// Reading direction of the host UI.
///
/// Only changes which way the popover prefers to open: right-to-left layouts
/// open toward the left. Coordinates stay physical (`left`/`top`) either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl LayoutDirection {
    pub fn is_rtl(self) -> bool {
        matches!(self, Self::RightToLeft)
    }
}

// ============================================================================
// GPUI conversions
// ============================================================================

impl From<gpui::Point<Pixels>> for Point {
    fn from(p: gpui::Point<Pixels>) -> Self {
        Self::new(f32::from(p.x), f32::from(p.y))
    }
}

impl From<Point> for gpui::Point<Pixels> {
    fn from(p: Point) -> Self {
        point(px(p.x), px(p.y))
    }
}

impl From<gpui::Size<Pixels>> for Size {
    fn from(s: gpui::Size<Pixels>) -> Self {
        Self::new(f32::from(s.width), f32::from(s.height))
    }
}

impl From<Size> for gpui::Size<Pixels> {
    fn from(s: Size) -> Self {
        size(px(s.width), px(s.height))
    }
}

impl From<Bounds<Pixels>> for Rect {
    fn from(b: Bounds<Pixels>) -> Self {
        Self {
            origin: b.origin.into(),
            size: b.size.into(),
        }
    }
}

impl From<Rect> for Bounds<Pixels> {
    fn from(r: Rect) -> Self {
        Bounds::new(r.origin.into(), r.size.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
    }

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(99.0, 49.0)));
        assert!(!r.contains(Point::new(100.0, 10.0)));
        assert!(!r.contains(Point::new(-1.0, 10.0)));
    }

    #[test]
    fn test_rect_validate() {
        assert!(Rect::new(-5.0, 0.0, 10.0, 10.0).validate().is_ok());
        assert!(Rect::new(0.0, f32::NAN, 10.0, 10.0).validate().is_err());
        assert!(Rect::new(0.0, 0.0, -10.0, 10.0).validate().is_err());
    }

    #[test]
    fn test_gpui_bounds_conversion() {
        let rect = Rect::new(4.0, 8.0, 120.0, 48.0);
        let bounds: Bounds<Pixels> = rect.into();
        assert_eq!(Rect::from(bounds), rect);
    }

    #[test]
    fn test_size_is_empty() {
        assert!(Size::zero().is_empty());
        assert!(Size::new(10.0, 0.0).is_empty());
        assert!(!Size::new(10.0, 1.0).is_empty());
    }
}

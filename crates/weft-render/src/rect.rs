//! Axis-aligned rectangles for viewports and element bounds.

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    /// Contains every point; the viewport before one is set.
    pub const UNBOUNDED: Rect = Rect {
        left: f64::NEG_INFINITY,
        top: f64::NEG_INFINITY,
        right: f64::INFINITY,
        bottom: f64::INFINITY,
    };

    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Overlap test; touching edges count as intersecting.
    pub fn intersects(&self, other: &Rect) -> bool {
        let left = self.left.max(other.left);
        let right = self.right.min(other.right);
        let top = self.top.max(other.top);
        let bottom = self.bottom.min(other.bottom);
        right - left >= 0.0 && bottom - top >= 0.0
    }

    /// Expand on every side by `margin` (shrinks if negative).
    pub fn grow(&self, margin: f64) -> Rect {
        Rect::new(
            self.left - margin,
            self.top - margin,
            self.right + margin,
            self.bottom + margin,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects() {
        let a = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::from_xywh(5.0, 5.0, 10.0, 10.0)));
        assert!(a.intersects(&Rect::from_xywh(10.0, 0.0, 5.0, 5.0)));
        assert!(!a.intersects(&Rect::from_xywh(10.5, 0.0, 5.0, 5.0)));
        assert!(Rect::UNBOUNDED.intersects(&a));
    }

    #[test]
    fn test_grow() {
        let r = Rect::from_xywh(0.0, 0.0, 10.0, 10.0).grow(2.0);
        assert_eq!(r, Rect::new(-2.0, -2.0, 12.0, 12.0));
        assert_eq!(r.width(), 14.0);
    }
}

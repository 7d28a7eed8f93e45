//! Rectangles and insets.

use cgmath::{Point2, Vector2, Zero};

/// A rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Rectangle origin.
    pub origin: Point2<f64>,

    /// Rectangle size.
    pub size: Vector2<f64>,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(origin: Point2<f64>, size: Vector2<f64>) -> Rect {
        Rect { origin, size }
    }

    /// Returns a zero-sized rectangle at the origin.
    pub fn zero() -> Rect {
        Rect {
            origin: Point2::new(0., 0.),
            size: Vector2::zero(),
        }
    }

    /// Shrinks the rectangle by the given insets.
    ///
    /// The size never becomes negative.
    pub fn inset(&self, insets: EdgeInsets) -> Rect {
        let size = Vector2::new(
            (self.size.x - insets.left - insets.right).max(0.),
            (self.size.y - insets.top - insets.bottom).max(0.),
        );
        Rect {
            origin: Point2::new(self.origin.x + insets.left, self.origin.y + insets.top),
            size,
        }
    }
}

/// Insets from each edge of a rectangle.
///
/// The y-axis points down, so `top` is the edge with the smallest y.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeInsets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl EdgeInsets {
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> EdgeInsets {
        EdgeInsets {
            top,
            left,
            bottom,
            right,
        }
    }

    /// The same inset on every edge.
    pub fn uniform(value: f64) -> EdgeInsets {
        EdgeInsets::new(value, value, value, value)
    }
}

#[test]
fn test_inset() {
    let rect = Rect::new(Point2::new(10., 10.), Vector2::new(100., 40.));
    let inner = rect.inset(EdgeInsets::new(5., 10., 5., 10.));
    assert_eq!(inner.origin, Point2::new(20., 15.));
    assert_eq!(inner.size, Vector2::new(80., 30.));

    let collapsed = rect.inset(EdgeInsets::uniform(50.));
    assert_eq!(collapsed.size, Vector2::new(0., 0.));
}

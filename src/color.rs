//! Colors.

/// An RGBA color with components in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0., 0., 0.);
    pub const WHITE: Color = Color::rgb(1., 1., 1.);
    pub const CLEAR: Color = Color::rgba(0., 0., 0., 0.);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Color {
        Color { r, g, b, a: 1. }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Color {
        Color { r, g, b, a }
    }

    /// Returns the same color with its alpha multiplied by `opacity`.
    pub fn with_opacity(self, opacity: f64) -> Color {
        Color {
            a: self.a * opacity.max(0.).min(1.),
            ..self
        }
    }
}

#[test]
fn test_with_opacity_clamps() {
    let c = Color::rgb(0.2, 0.4, 0.6).with_opacity(2.);
    assert_eq!(c.a, 1.);
    let c = Color::rgba(0.2, 0.4, 0.6, 0.5).with_opacity(0.5);
    assert_eq!(c.a, 0.25);
}

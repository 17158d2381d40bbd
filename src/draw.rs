//! Draw command definitions recorded by the composer.
//!
//! Commands carry local coordinates; the composer snapshots the active
//! transform and viewport clip into a [`Primitive`] when a command is
//! recorded, and the external renderer consumes the finished list after the
//! tick. The engine never rasterizes anything itself.

use crate::geometry::{Circle, Rect, Region, Vec2};
use crate::transform::Transform;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

/// Border definition for shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    /// Border width in logical pixels
    pub width: f32,
    /// Border color
    pub color: Color,
}

impl Border {
    pub fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

/// Drop shadow definition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    /// Shadow offset in logical pixels
    pub offset: Vec2,
    /// Blur radius in logical pixels
    pub blur: f32,
    /// Shadow color
    pub color: Color,
}

impl Shadow {
    pub fn new(offset: Vec2, blur: f32, color: Color) -> Self {
        Self {
            offset,
            blur,
            color,
        }
    }
}

/// Text anchor relative to the given position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    TopLeft,
    TopRight,
    Center,
    BottomCenter,
}

/// Opaque handle to a sprite or animation owned by the external renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteId(pub u32);

/// A single draw operation in local coordinates.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// Rounded rectangle with optional border and shadow.
    RoundedRect {
        rect: Rect,
        color: Color,
        /// Corner radius in logical pixels
        radius: f32,
        border: Option<Border>,
        shadow: Option<Shadow>,
    },

    /// Rectangle with a vertical gradient.
    GradientRect { rect: Rect, top: Color, bottom: Color },

    /// Circle with optional border.
    Circle {
        circle: Circle,
        color: Color,
        border: Option<Border>,
    },

    /// Line segment.
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
        /// Round end caps instead of butt caps
        round_cap: bool,
    },

    /// Filled boolean-combination shape. An empty region draws nothing.
    Region { region: Region, color: Color },

    /// Outline of a boolean-combination shape.
    RegionFrame {
        region: Region,
        width: f32,
        color: Color,
    },

    /// Text anchored at a position.
    Text {
        text: String,
        pos: Vec2,
        /// Font size in logical pixels
        size: f32,
        color: Color,
        align: Align,
    },

    /// Sprite or animation frame, resolved by the external renderer.
    Sprite { id: SpriteId, rect: Rect },
}

impl DrawCommand {
    /// Create a simple rounded rectangle.
    pub fn rounded_rect(rect: Rect, color: Color, radius: f32) -> Self {
        Self::RoundedRect {
            rect,
            color,
            radius,
            border: None,
            shadow: None,
        }
    }

    /// Create a filled circle.
    pub fn circle(circle: Circle, color: Color) -> Self {
        Self::Circle {
            circle,
            color,
            border: None,
        }
    }
}

/// A recorded draw operation: the command plus the transform and clip that
/// were active when it was issued.
#[derive(Debug, Clone)]
pub struct Primitive {
    pub command: DrawCommand,
    /// Composed local→device transform at record time
    pub transform: Transform,
    /// Device-space viewport rectangle, when one was active
    pub clip: Option<Rect>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        let color = Color::from_hex(0xFF0000);
        assert_eq!(color.r, 1.0);
        assert_eq!(color.g, 0.0);
        assert_eq!(color.b, 0.0);
        assert_eq!(color.a, 1.0);

        let color = Color::from_hex(0x708090);
        assert!((color.r - 112.0 / 255.0).abs() < 1e-6);
        assert!((color.g - 128.0 / 255.0).abs() < 1e-6);
        assert!((color.b - 144.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_color_with_alpha() {
        let color = Color::WHITE.with_alpha(0.3);
        assert_eq!(color.r, 1.0);
        assert_eq!(color.a, 0.3);
    }

    #[test]
    fn test_color_default_is_transparent() {
        assert_eq!(Color::default(), Color::TRANSPARENT);
    }
}

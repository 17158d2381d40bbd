//! Color palette shared by the build-phase panels.

use crate::draw::Color;

/// Fixed palette for the stage UI. Panels read from this instead of
/// hardcoding colors so the whole screen can be retinted at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Panel backdrop fill
    pub base: Color,
    /// Primary control fill
    pub main: Color,
    /// Highlight for active/selected controls
    pub accent: Color,
    /// Borders and text
    pub sub: Color,
    /// Drop shadows
    pub shadow: Color,
    /// Translucent canvas interior
    pub canvas: Color,
    /// Canvas edge fade, opaque end
    pub canvas_fade_out: Color,
    /// Canvas edge fade, transparent end
    pub canvas_fade_in: Color,
    /// Allied markers on the minimap
    pub ally: Color,
    /// Enemy markers on the minimap, also used for alerts
    pub enemy: Color,
}

impl Default for Theme {
    fn default() -> Self {
        let slate = Color::from_hex(0x708090);
        Self {
            base: Color::from_hex(0x696969),
            main: slate,
            accent: Color::from_hex(0xB0C4DE),
            sub: Color::BLACK,
            shadow: Color::BLACK.with_alpha(0.3),
            canvas: Color::WHITE.with_alpha(0.3),
            canvas_fade_out: slate.with_alpha(0.2),
            canvas_fade_in: slate.with_alpha(0.0),
            ally: Color::from_hex(0x008000),
            enemy: Color::from_hex(0xFF0000),
        }
    }
}

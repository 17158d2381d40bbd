//! Pointer state tracking and hit-test outcomes.
//!
//! The embedder feeds the tracked [`Pointer`] once per tick with the device
//! position and the set of held buttons; press/release edges are derived by
//! comparing against the previous tick. Hit testing itself lives on
//! [`crate::composer::Composer`], which projects the pointer into the active
//! frame before calling [`HitShape::contains`].

use bitflags::bitflags;

use crate::geometry::{Circle, Polygon, Rect, Region, RoundedRect, Vec2};

bitflags! {
    /// Set of pointer buttons
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct PointerButtons: u8 {
        const LEFT = 0b001;
        const RIGHT = 0b010;
        const MIDDLE = 0b100;
    }
}

impl Default for PointerButtons {
    fn default() -> Self {
        Self::empty()
    }
}

/// Tracked pointer device state, updated once per tick.
#[derive(Debug, Clone, Default)]
pub struct Pointer {
    pos: Option<Vec2>,
    held: PointerButtons,
    pressed: PointerButtons,
    released: PointerButtons,
}

impl Pointer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the device state for this tick. `pos` is `None` when the
    /// pointer has left the surface. Press/release edges are computed
    /// against the previous tick's held set.
    pub fn begin_tick(&mut self, pos: Option<Vec2>, held: PointerButtons) {
        self.pressed = held.difference(self.held);
        self.released = self.held.difference(held);
        self.held = held;
        self.pos = pos;
    }

    /// Device-space pointer position, if the pointer is on the surface.
    pub fn position(&self) -> Option<Vec2> {
        self.pos
    }

    /// Level-triggered: true every tick the buttons are held.
    pub fn is_down(&self, buttons: PointerButtons) -> bool {
        self.held.intersects(buttons)
    }

    /// Edge-triggered: true only on the tick the press occurred.
    pub fn just_pressed(&self, buttons: PointerButtons) -> bool {
        self.pressed.intersects(buttons)
    }

    /// Edge-triggered: true only on the tick the release occurred.
    pub fn just_released(&self, buttons: PointerButtons) -> bool {
        self.released.intersects(buttons)
    }
}

/// Outcome of testing one shape against the pointer for one tick.
///
/// `left_clicked`/`right_clicked` are edge-triggered; `hover` and
/// `left_pressed` are level-triggered. Results are only valid for the tick
/// they were computed on: panel geometry may move between ticks, so a stored
/// result goes stale immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitResult {
    /// Pointer is inside the shape this tick
    pub hover: bool,
    /// Left button is held with the pointer inside the shape
    pub left_pressed: bool,
    /// Left button went down this tick with the pointer inside the shape
    pub left_clicked: bool,
    /// Right button went down this tick with the pointer inside the shape
    pub right_clicked: bool,
}

impl HitResult {
    /// No interaction at all.
    pub const NONE: HitResult = HitResult {
        hover: false,
        left_pressed: false,
        left_clicked: false,
        right_clicked: false,
    };
}

/// Shapes that can be hit-tested in the active frame.
pub trait HitShape {
    /// Point containment in the shape's local coordinates.
    fn contains(&self, p: Vec2) -> bool;
}

impl HitShape for Rect {
    fn contains(&self, p: Vec2) -> bool {
        Rect::contains(self, p)
    }
}

impl HitShape for RoundedRect {
    fn contains(&self, p: Vec2) -> bool {
        RoundedRect::contains(self, p)
    }
}

impl HitShape for Circle {
    fn contains(&self, p: Vec2) -> bool {
        Circle::contains(self, p)
    }
}

impl HitShape for Polygon {
    fn contains(&self, p: Vec2) -> bool {
        Polygon::contains(self, p)
    }
}

impl HitShape for Region {
    fn contains(&self, p: Vec2) -> bool {
        Region::contains(self, p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_edges() {
        let mut pointer = Pointer::new();

        pointer.begin_tick(Some(Vec2::ZERO), PointerButtons::LEFT);
        assert!(pointer.just_pressed(PointerButtons::LEFT));
        assert!(pointer.is_down(PointerButtons::LEFT));

        // Held across the next tick: the edge is gone, the level stays
        pointer.begin_tick(Some(Vec2::ZERO), PointerButtons::LEFT);
        assert!(!pointer.just_pressed(PointerButtons::LEFT));
        assert!(pointer.is_down(PointerButtons::LEFT));

        pointer.begin_tick(Some(Vec2::ZERO), PointerButtons::empty());
        assert!(pointer.just_released(PointerButtons::LEFT));
        assert!(!pointer.is_down(PointerButtons::LEFT));
    }

    #[test]
    fn test_independent_buttons() {
        let mut pointer = Pointer::new();
        pointer.begin_tick(Some(Vec2::ZERO), PointerButtons::LEFT);
        pointer.begin_tick(
            Some(Vec2::ZERO),
            PointerButtons::LEFT | PointerButtons::RIGHT,
        );
        assert!(pointer.just_pressed(PointerButtons::RIGHT));
        assert!(!pointer.just_pressed(PointerButtons::LEFT));
    }

    #[test]
    fn test_position_lost_keeps_edges() {
        let mut pointer = Pointer::new();
        pointer.begin_tick(None, PointerButtons::LEFT);
        assert_eq!(pointer.position(), None);
        assert!(pointer.just_pressed(PointerButtons::LEFT));
    }
}

//! Interpolation helpers for time-driven values.

use crate::draw::Color;
use crate::geometry::Vec2;

/// Trait for types that can be animated by interpolating between values
pub trait Animatable: Clone + PartialEq {
    /// Linear interpolation between two values.
    /// t = 0.0 returns `from`, t = 1.0 returns `to`.
    fn lerp(from: &Self, to: &Self, t: f32) -> Self;
}

impl Animatable for f32 {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        from + (to - from) * t
    }
}

impl Animatable for Vec2 {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        Vec2::new(
            from.x + (to.x - from.x) * t,
            from.y + (to.y - from.y) * t,
        )
    }
}

impl Animatable for Color {
    fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        Color {
            r: from.r + (to.r - from.r) * t,
            g: from.g + (to.g - from.g) * t,
            b: from.b + (to.b - from.b) * t,
            a: from.a + (to.a - from.a) * t,
        }
    }
}

/// Move `current` toward `target` by the interpolation amount `t`, usually
/// `dt * rate`. The amount is clamped so a large tick lands exactly on the
/// target instead of overshooting, which keeps the motion frame-rate
/// independent.
pub fn step_toward<T: Animatable>(current: &T, target: &T, t: f32) -> T {
    T::lerp(current, target, t.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_lerp() {
        assert_eq!(f32::lerp(&0.0, &10.0, 0.0), 0.0);
        assert_eq!(f32::lerp(&0.0, &10.0, 0.5), 5.0);
        assert_eq!(f32::lerp(&0.0, &10.0, 1.0), 10.0);
    }

    #[test]
    fn test_vec2_lerp() {
        let mid = Vec2::lerp(&Vec2::ZERO, &Vec2::new(10.0, 20.0), 0.5);
        assert_eq!(mid, Vec2::new(5.0, 10.0));
    }

    #[test]
    fn test_color_lerp() {
        let mid = Color::lerp(&Color::BLACK, &Color::WHITE, 0.5);
        assert_eq!(mid.r, 0.5);
        assert_eq!(mid.g, 0.5);
        assert_eq!(mid.b, 0.5);
    }

    #[test]
    fn test_step_toward() {
        // One tick of 0.1s at rate 8/s covers 80% of the distance
        let blended = step_toward(&0.0, &1.0, 0.1 * 8.0);
        assert!((blended - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_step_toward_clamps_large_ticks() {
        let blended = step_toward(&0.0, &1.0, 2.5);
        assert_eq!(blended, 1.0);
    }
}

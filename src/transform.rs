//! 2D affine transforms used by the frame stack.

use crate::geometry::Vec2;

/// A 2D affine transform stored as two rows of three columns:
///
/// ```text
/// | a  b  tx |
/// | c  d  ty |
/// ```
///
/// Composes parent→child along the frame stack and maps local coordinates
/// to device coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Row-major: `[a, b, tx, c, d, ty]`
    pub data: [f32; 6],
}

impl Transform {
    /// Identity transform (no transformation)
    pub const IDENTITY: Self = Self {
        data: [
            1.0, 0.0, 0.0, // row 0
            0.0, 1.0, 0.0, // row 1
        ],
    };

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Create a translation transform
    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            data: [1.0, 0.0, x, 0.0, 1.0, y],
        }
    }

    /// Create a 2D rotation transform
    pub fn rotate(angle_radians: f32) -> Self {
        let cos = angle_radians.cos();
        let sin = angle_radians.sin();
        Self {
            data: [cos, -sin, 0.0, sin, cos, 0.0],
        }
    }

    pub fn rotate_degrees(angle_degrees: f32) -> Self {
        Self::rotate(angle_degrees.to_radians())
    }

    /// Create a uniform scale transform
    pub fn scale(s: f32) -> Self {
        Self::scale_xy(s, s)
    }

    /// Create a non-uniform scale transform
    pub fn scale_xy(sx: f32, sy: f32) -> Self {
        Self {
            data: [sx, 0.0, 0.0, 0.0, sy, 0.0],
        }
    }

    pub fn tx(&self) -> f32 {
        self.data[2]
    }

    pub fn ty(&self) -> f32 {
        self.data[5]
    }

    /// Compose this transform with another: `self * other`.
    /// Applies `other` first, then `self`.
    pub fn then(&self, other: &Transform) -> Transform {
        let [a1, b1, t1, c1, d1, e1] = self.data;
        let [a2, b2, t2, c2, d2, e2] = other.data;
        Transform {
            data: [
                a1 * a2 + b1 * c2,
                a1 * b2 + b1 * d2,
                a1 * t2 + b1 * e2 + t1,
                c1 * a2 + d1 * c2,
                c1 * b2 + d1 * d2,
                c1 * t2 + d1 * e2 + e1,
            ],
        }
    }

    /// Compute the inverse of this transform. A degenerate transform
    /// (zero determinant) inverts to identity.
    pub fn inverse(&self) -> Transform {
        let [a, b, tx, c, d, ty] = self.data;

        let det = a * d - b * c;
        if det.abs() < 1e-10 {
            return Self::IDENTITY;
        }
        let inv_det = 1.0 / det;

        Transform {
            data: [
                d * inv_det,
                -b * inv_det,
                (-d * tx + b * ty) * inv_det,
                -c * inv_det,
                a * inv_det,
                (c * tx - a * ty) * inv_det,
            ],
        }
    }

    /// Map a point through this transform.
    pub fn apply(&self, p: Vec2) -> Vec2 {
        let [a, b, tx, c, d, ty] = self.data;
        Vec2::new(a * p.x + b * p.y + tx, c * p.x + d * p.y + ty)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_identity() {
        let t = Transform::identity();
        assert_eq!(t, Transform::IDENTITY);
        assert!(t.is_identity());
    }

    #[test]
    fn test_translate() {
        let t = Transform::translate(10.0, 20.0);
        let p = t.apply(Vec2::ZERO);
        assert!(approx_eq(p.x, 10.0));
        assert!(approx_eq(p.y, 20.0));

        let p2 = t.apply(Vec2::new(5.0, 5.0));
        assert!(approx_eq(p2.x, 15.0));
        assert!(approx_eq(p2.y, 25.0));
    }

    #[test]
    fn test_rotate() {
        let t = Transform::rotate_degrees(90.0);
        let p = t.apply(Vec2::new(1.0, 0.0));
        assert!(approx_eq(p.x, 0.0));
        assert!(approx_eq(p.y, 1.0));
    }

    #[test]
    fn test_scale() {
        let t = Transform::scale(2.0);
        let p = t.apply(Vec2::new(3.0, 4.0));
        assert!(approx_eq(p.x, 6.0));
        assert!(approx_eq(p.y, 8.0));
    }

    #[test]
    fn test_compose() {
        // scale.then(translate): first translate, then scale
        // Point (0,0) -> translate -> (10,0) -> scale -> (20,0)
        let translate = Transform::translate(10.0, 0.0);
        let scale = Transform::scale(2.0);
        let composed = scale.then(&translate);
        let p = composed.apply(Vec2::ZERO);
        assert!(approx_eq(p.x, 20.0));
        assert!(approx_eq(p.y, 0.0));
    }

    #[test]
    fn test_inverse_roundtrip() {
        for t in [
            Transform::translate(10.0, 20.0),
            Transform::rotate_degrees(45.0),
            Transform::scale(2.0),
            Transform::translate(3.0, -7.0).then(&Transform::rotate_degrees(30.0)),
        ] {
            let composed = t.then(&t.inverse());
            let p = composed.apply(Vec2::new(3.0, 4.0));
            assert!(approx_eq(p.x, 3.0));
            assert!(approx_eq(p.y, 4.0));
        }
    }

    #[test]
    fn test_degenerate_inverse() {
        let t = Transform::scale(0.0);
        assert_eq!(t.inverse(), Transform::IDENTITY);
    }
}

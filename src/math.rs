//! Linear algebra helpers for the 2D quad renderer
//!
//! Vectors and matrices come straight from glam. This module only adds the
//! transform vocabulary the game uses: right-multiplied translate/scale,
//! the y-down orthographic projection and the per-quad model matrix.

pub use glam::{Mat4, Vec2, Vec3, Vec4};

/// Right-multiplied transform builders.
///
/// `m.translate_by(p)` is `m * T(p)`, so the last transform applied in a
/// chain is the first one a vertex sees.
pub trait Transform {
    fn translate_by(self, pos: Vec2) -> Self;
    fn scale_by(self, size: Vec3) -> Self;
}

impl Transform for Mat4 {
    #[inline]
    fn translate_by(self, pos: Vec2) -> Self {
        self * Mat4::from_translation(pos.extend(0.0))
    }

    #[inline]
    fn scale_by(self, size: Vec3) -> Self {
        self * Mat4::from_scale(size)
    }
}

/// Orthographic projection for a `width` x `height` field with the origin in
/// the top-left corner and y growing downward. Depth range is [-1, 1].
pub fn ortho(width: f32, height: f32) -> Mat4 {
    Mat4::orthographic_rh_gl(0.0, width, height, 0.0, -1.0, 1.0)
}

/// Model matrix mapping the unit square onto a box at `pos` with `size`.
///
/// The z scale is zero: every quad lives on the z = 0 plane.
pub fn model_matrix(pos: Vec2, size: Vec2) -> Mat4 {
    Mat4::IDENTITY
        .translate_by(pos)
        .scale_by(Vec3::new(size.x, size.y, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn mat4_strategy() -> impl Strategy<Value = Mat4> {
        prop::array::uniform16(-4.0f32..4.0).prop_map(|a| Mat4::from_cols_array(&a))
    }

    #[test]
    fn test_vector_ops_are_componentwise() {
        let a = Vec2::new(2.0, 6.0);
        let b = Vec2::new(4.0, 3.0);
        assert_eq!(a + b, Vec2::new(6.0, 9.0));
        assert_eq!(a - b, Vec2::new(-2.0, 3.0));
        assert_eq!(a * b, Vec2::new(8.0, 18.0));
        assert_eq!(a / b, Vec2::new(0.5, 2.0));

        let c = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(c * Vec3::splat(2.0), Vec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_translate_composes_on_the_right() {
        let m = Mat4::from_scale(Vec3::new(2.0, 3.0, 1.0));
        let t = Mat4::from_translation(Vec3::new(5.0, 7.0, 0.0));
        assert_eq!(m.translate_by(Vec2::new(5.0, 7.0)), m * t);
    }

    #[test]
    fn test_mul_is_not_commutative() {
        let t = Mat4::IDENTITY.translate_by(Vec2::new(10.0, 0.0));
        let s = Mat4::IDENTITY.scale_by(Vec3::new(2.0, 2.0, 1.0));
        assert_ne!(t * s, s * t);
    }

    #[test]
    fn test_model_matrix_maps_unit_square() {
        let m = model_matrix(Vec2::new(35.0, 20.0), Vec2::new(24.0, 4.0));
        let origin = m.transform_point3(Vec3::ZERO);
        let far = m.transform_point3(Vec3::new(1.0, 1.0, 0.0));
        assert!(origin.abs_diff_eq(Vec3::new(35.0, 20.0, 0.0), 1e-5));
        assert!(far.abs_diff_eq(Vec3::new(59.0, 24.0, 0.0), 1e-5));
    }

    #[test]
    fn test_ortho_maps_field_corners() {
        let p = ortho(320.0, 180.0);
        let top_left = p.project_point3(Vec3::ZERO);
        let bottom_right = p.project_point3(Vec3::new(320.0, 180.0, 0.0));
        assert!(top_left.abs_diff_eq(Vec3::new(-1.0, 1.0, 0.0), 1e-5));
        assert!(bottom_right.abs_diff_eq(Vec3::new(1.0, -1.0, 0.0), 1e-5));
    }

    proptest! {
        #[test]
        fn prop_identity_is_neutral(m in mat4_strategy()) {
            prop_assert_eq!(Mat4::IDENTITY * m, m);
            prop_assert_eq!(m * Mat4::IDENTITY, m);
        }

        #[test]
        fn prop_mul_is_associative(a in mat4_strategy(), b in mat4_strategy(), c in mat4_strategy()) {
            prop_assert!(((a * b) * c).abs_diff_eq(a * (b * c), 1e-2));
        }
    }
}

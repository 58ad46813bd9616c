//! Form-matrix builders. Every builder returns a fresh column-major 4x4 matrix;
//! `to_cols_array()` yields the 16 floats in upload order.

use crate::{Mat4, Vec3};

/// Column-major 4x4 transform as uploaded to `uFormMatrix`.
pub type FormMatrix = Mat4;

/// Identity with (dx, dy, dz) at flat indices 12, 13, 14.
#[inline]
pub fn translation(dx: f32, dy: f32, dz: f32) -> FormMatrix {
    Mat4::from_translation(Vec3::new(dx, dy, dz))
}

/// Diagonal (sx, sy, sz, 1).
#[inline]
pub fn scale(sx: f32, sy: f32, sz: f32) -> FormMatrix {
    Mat4::from_scale(Vec3::new(sx, sy, sz))
}

/// Identity plus `cot(angle)` at flat index 1 (column 0, row 1), so
/// `y' = y + x * cot(angle)`.
///
/// Not guarded: `angle = n * PI` divides by (nearly) zero and yields an
/// infinite or huge entry.
#[inline]
pub fn shear(angle: f32) -> FormMatrix {
    let cot = 1.0 / angle.tan();
    #[rustfmt::skip]
    let cols = [
        1.0, cot, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ];
    Mat4::from_cols_array(&cols)
}

/// Right-handed rotation about +X (radians).
#[inline]
pub fn rotate_x(angle: f32) -> FormMatrix {
    Mat4::from_rotation_x(angle)
}

/// Right-handed rotation about +Y (radians).
#[inline]
pub fn rotate_y(angle: f32) -> FormMatrix {
    Mat4::from_rotation_y(angle)
}

/// Right-handed rotation about +Z (radians): `rotate_z(PI / 2)` maps +X to +Y.
///
/// The flat literals of the WebGL helper this replaces are the transpose of
/// this matrix, i.e. a rotation by `-angle`. Negate the angle when porting
/// scenes from it. The same holds for [`rotate_x`] and [`rotate_y`].
#[inline]
pub fn rotate_z(angle: f32) -> FormMatrix {
    Mat4::from_rotation_z(angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, FRAC_PI_6};

    const EPS: f32 = 1e-5;

    #[test]
    fn translation_lands_in_last_column() {
        let a = translation(1.5, -2.0, 3.25).to_cols_array();
        assert_eq!(&a[12..15], &[1.5, -2.0, 3.25]);
        assert_eq!(a[15], 1.0);
        assert_eq!(translation(1.5, -2.0, 3.25).transform_point3(Vec3::ZERO), Vec3::new(1.5, -2.0, 3.25));
    }

    #[test]
    fn scale_is_diagonal() {
        let a = scale(2.0, 3.0, 4.0).to_cols_array();
        for (i, v) in a.iter().enumerate() {
            let expected = match i {
                0 => 2.0,
                5 => 3.0,
                10 => 4.0,
                15 => 1.0,
                _ => 0.0,
            };
            assert_eq!(*v, expected, "entry {i}");
        }
    }

    #[test]
    fn shear_only_touches_index_one() {
        let identity = Mat4::IDENTITY.to_cols_array();
        for angle in [FRAC_PI_6, FRAC_PI_4, FRAC_PI_3, FRAC_PI_2, 2.0, -1.0] {
            let a = shear(angle).to_cols_array();
            for i in 0..16 {
                if i == 1 {
                    assert!((a[1] - 1.0 / angle.tan()).abs() < EPS, "angle {angle}");
                } else {
                    assert_eq!(a[i], identity[i], "angle {angle}, entry {i}");
                }
            }
        }
    }

    #[test]
    fn shear_of_zero_is_not_finite() {
        assert!(!shear(0.0).to_cols_array()[1].is_finite());
    }

    #[test]
    fn rotations_cancel_with_their_inverse() {
        for angle in [0.0, 0.3, FRAC_PI_2, 2.5, -4.0] {
            for rot in [rotate_x, rotate_y, rotate_z] {
                let m = rot(angle) * rot(-angle);
                assert!(m.abs_diff_eq(Mat4::IDENTITY, EPS), "angle {angle}");
            }
        }
    }

    #[test]
    fn rotations_are_right_handed() {
        let y = rotate_x(FRAC_PI_2).transform_vector3(Vec3::Y);
        assert!(y.abs_diff_eq(Vec3::Z, EPS));
        let z = rotate_y(FRAC_PI_2).transform_vector3(Vec3::Z);
        assert!(z.abs_diff_eq(Vec3::X, EPS));
        let x = rotate_z(FRAC_PI_2).transform_vector3(Vec3::X);
        assert!(x.abs_diff_eq(Vec3::Y, EPS));
    }

    #[test]
    fn negated_angles_match_transposed_literals() {
        let angle = 0.6f32;
        let (sa, ca) = angle.sin_cos();
        #[rustfmt::skip]
        let x_literal = [
            1.0, 0.0, 0.0, 0.0,
            0.0,  ca, -sa, 0.0,
            0.0,  sa,  ca, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        #[rustfmt::skip]
        let y_literal = [
             ca, 0.0,  sa, 0.0,
            0.0, 1.0, 0.0, 0.0,
            -sa, 0.0,  ca, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        #[rustfmt::skip]
        let z_literal = [
             ca, -sa, 0.0, 0.0,
             sa,  ca, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        let cases: [(fn(f32) -> FormMatrix, [f32; 16]); 3] = [
            (rotate_x as fn(f32) -> FormMatrix, x_literal),
            (rotate_y as fn(f32) -> FormMatrix, y_literal),
            (rotate_z as fn(f32) -> FormMatrix, z_literal),
        ];
        for (rot, literal) in cases {
            let literal = Mat4::from_cols_array(&literal);
            assert!(rot(-angle).abs_diff_eq(literal, EPS));
            assert!(rot(angle).abs_diff_eq(literal.transpose(), EPS));
        }
    }

    #[test]
    fn rotation_x_layout() {
        let (s, c) = 0.7f32.sin_cos();
        let a = rotate_x(0.7).to_cols_array();
        assert!((a[5] - c).abs() < EPS);
        assert!((a[6] - s).abs() < EPS);
        assert!((a[9] + s).abs() < EPS);
        assert!((a[10] - c).abs() < EPS);
        assert_eq!(a[0], 1.0);
    }
}

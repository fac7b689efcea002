//! Vector and transform helpers
//!
//! Everything here is a pure function over [`Vector3`]. Rotations follow the
//! right-handed convention and take angles in radians.

use crate::{Error, Result};
use glam::DVec3;

/// Three-component `f64` vector used for points, directions, colors and angles
pub type Vector3 = DVec3;

/// Euclidean length of a 3D vector
#[inline]
pub fn length(v: Vector3) -> f64 {
    v.length()
}

/// Euclidean length of a 2D vector given as two scalars
///
/// Revolution-symmetric primitives (the torus) use this to avoid building a
/// throwaway third coordinate.
#[inline]
pub fn length2(x: f64, y: f64) -> f64 {
    x.hypot(y)
}

#[inline]
pub fn dot(a: Vector3, b: Vector3) -> f64 {
    a.dot(b)
}

/// Scale `v` to unit length
///
/// Fails with [`Error::DegenerateVector`] when `v` has zero (or non-finite)
/// length.
pub fn normalize(v: Vector3) -> Result<Vector3> {
    let len = length(v);
    if len > 0.0 && len.is_finite() {
        Ok(v / len)
    } else {
        Err(Error::DegenerateVector)
    }
}

/// Component-wise maximum against a scalar
#[inline]
pub fn max_scalar(v: Vector3, m: f64) -> Vector3 {
    v.max(Vector3::splat(m))
}

/// Rotate around the X axis
pub fn rot_x(v: Vector3, angle: f64) -> Vector3 {
    let (s, c) = angle.sin_cos();
    Vector3::new(v.x, c * v.y - s * v.z, s * v.y + c * v.z)
}

/// Rotate around the Y axis
pub fn rot_y(v: Vector3, angle: f64) -> Vector3 {
    let (s, c) = angle.sin_cos();
    Vector3::new(c * v.x + s * v.z, v.y, -s * v.x + c * v.z)
}

/// Rotate around the Z axis
pub fn rot_z(v: Vector3, angle: f64) -> Vector3 {
    let (s, c) = angle.sin_cos();
    Vector3::new(c * v.x - s * v.y, s * v.x + c * v.y, v.z)
}

/// Apply Z, then Y, then X rotation by the angles stored in `t`
///
/// The order is fixed; changing it changes the resulting orientation.
pub fn rot_xyz(v: Vector3, t: Vector3) -> Vector3 {
    rot_x(rot_y(rot_z(v, t.z), t.y), t.x)
}

/// Undo [`rot_xyz`]: X, then Y, then Z rotation by the negated angles
pub fn rot_xyz_inverse(v: Vector3, t: Vector3) -> Vector3 {
    rot_z(rot_y(rot_x(v, -t.x), -t.y), -t.z)
}

/// Translate `v` by `t`
#[inline]
pub fn affine(v: Vector3, t: Vector3) -> Vector3 {
    v + t
}

/// Rotate the x/y components by an angle of `k * v.y`
pub fn twist(v: Vector3, k: f64) -> Vector3 {
    let (s, c) = (k * v.y).sin_cos();
    Vector3::new(c * v.x - s * v.y, s * v.x + c * v.y, v.z)
}

/// Wrap each coordinate into `[-cell/2, cell/2)`, tiling space infinitely
///
/// Axes whose cell size is not positive are left untouched.
pub fn repeat(v: Vector3, cell: Vector3) -> Vector3 {
    Vector3::new(
        wrap_axis(v.x, cell.x),
        wrap_axis(v.y, cell.y),
        wrap_axis(v.z, cell.z),
    )
}

fn wrap_axis(x: f64, cell: f64) -> f64 {
    if cell > 0.0 {
        (x + cell * 0.5).rem_euclid(cell) - cell * 0.5
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn length2_matches_pythagoras() {
        assert_relative_eq!(length2(3.0, 4.0), 5.0);
        assert_relative_eq!(length(Vector3::new(2.0, 3.0, 6.0)), 7.0);
    }

    #[test]
    fn normalize_produces_unit_parallel_vector() {
        for v in [
            Vector3::new(3.0, -4.0, 12.0),
            Vector3::new(1e-7, 0.0, 0.0),
            Vector3::new(-250.0, 13.5, 0.25),
        ] {
            let n = normalize(v).unwrap();
            assert_relative_eq!(length(n), 1.0, epsilon = 1e-6);
            // Same direction: positive dot, no perpendicular component
            assert!(dot(n, v) > 0.0);
            assert!(n.cross(v).length() <= 1e-9 * v.length());
        }
    }

    #[test]
    fn normalize_rejects_zero_vector() {
        assert!(matches!(
            normalize(Vector3::ZERO),
            Err(Error::DegenerateVector)
        ));
    }

    #[test]
    fn axis_rotations_are_right_handed() {
        assert!(rot_z(Vector3::X, FRAC_PI_2).abs_diff_eq(Vector3::Y, 1e-12));
        assert!(rot_x(Vector3::Y, FRAC_PI_2).abs_diff_eq(Vector3::Z, 1e-12));
        assert!(rot_y(Vector3::Z, FRAC_PI_2).abs_diff_eq(Vector3::X, 1e-12));
    }

    #[test]
    fn rot_xyz_inverse_round_trips() {
        let t = Vector3::new(0.7, -1.3, 2.9);
        for v in [
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(-0.5, 0.0, 4.25),
            Vector3::new(10.0, -10.0, 0.1),
        ] {
            assert!(rot_xyz(rot_xyz_inverse(v, t), t).abs_diff_eq(v, 1e-9));
            assert!(rot_xyz_inverse(rot_xyz(v, t), t).abs_diff_eq(v, 1e-9));
        }
    }

    #[test]
    fn rot_xyz_applies_z_first() {
        let v = Vector3::X;
        let t = Vector3::new(FRAC_PI_2, 0.0, FRAC_PI_2);
        // Z takes X to Y, then X takes Y to Z
        assert!(rot_xyz(v, t).abs_diff_eq(Vector3::Z, 1e-12));
        // The opposite order would leave X at Y instead
        assert!(rot_z(rot_x(v, t.x), t.z).abs_diff_eq(Vector3::Y, 1e-12));
    }

    #[test]
    fn affine_translates() {
        let v = affine(Vector3::new(1.0, 2.0, 3.0), Vector3::new(-1.0, 0.5, 0.0));
        assert_eq!(v, Vector3::new(0.0, 2.5, 3.0));
    }

    #[test]
    fn twist_is_identity_at_zero_height_and_rate() {
        let v = Vector3::new(0.4, 0.0, -2.0);
        assert_eq!(twist(v, 3.0), v);
        let w = Vector3::new(0.4, 1.5, -2.0);
        assert_eq!(twist(w, 0.0), w);
    }

    #[test]
    fn twist_preserves_z() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_relative_eq!(twist(v, 0.3).z, 3.0);
    }

    #[test]
    fn repeat_wraps_into_half_open_cell() {
        let cell = Vector3::new(2.0, 4.0, 1.0);
        for v in [
            Vector3::new(0.5, 0.5, 0.25),
            Vector3::new(7.3, -9.9, 3.6),
            Vector3::new(-1.0, 2.0, -0.5),
        ] {
            let r = repeat(v, cell);
            for (c, h) in [(r.x, 1.0), (r.y, 2.0), (r.z, 0.5)] {
                assert!(c >= -h && c < h, "{c} outside [-{h}, {h})");
            }
        }
        // Points inside the central cell are unchanged
        let inside = Vector3::new(0.5, -1.0, 0.25);
        assert!(repeat(inside, cell).abs_diff_eq(inside, 1e-12));
    }

    #[test]
    fn repeat_skips_axes_without_cell() {
        let v = Vector3::new(5.0, 5.0, 5.0);
        let r = repeat(v, Vector3::new(2.0, 0.0, -1.0));
        assert_relative_eq!(r.x, -1.0);
        assert_relative_eq!(r.y, 5.0);
        assert_relative_eq!(r.z, 5.0);
    }

    #[test]
    fn max_scalar_clamps_each_component() {
        let v = max_scalar(Vector3::new(-1.0, 0.5, -0.1), 0.0);
        assert_eq!(v, Vector3::new(0.0, 0.5, 0.0));
    }
}

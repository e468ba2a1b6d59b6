//! Ellipse rotation angle from the Khachiyan rotation matrix.
//!
//! The downstream renderer takes a single angle in degrees. It is read off the
//! first row of `Vᵀ` through a fixed sign/magnitude case table on
//! `rot_00 = deg(Vᵀ[0][0])` and `rot_01 = deg(Vᵀ[0][1])`. Note that `deg` is
//! applied to the matrix entries themselves (direction cosines), not to an
//! angle.
//!
//! Inputs the table does not cover (either component exactly zero, i.e. an
//! axis-aligned frame) fall back to the major-axis direction from `atan2`.

use super::types::EnclosingEllipse;

/// Which branch of the case table produced the angle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationCase {
    /// `rot_01 < 0`, `rot_00 < 0` → `rot_00`.
    BothNegative,
    /// `rot_01 > 0`, `rot_00 < 0`, `|rot_01| > |rot_00|` → `-rot_00`.
    MixedSteep,
    /// `rot_01 > 0`, `rot_00 < 0`, `|rot_01| <= |rot_00|` → `-(90 + rot_01)`.
    MixedShallow,
    /// `rot_01 < 0`, `rot_00 > 0` → `rot_00`.
    NegativePositive,
    /// `rot_01 > 0`, `rot_00 > 0` → `-rot_00`.
    BothPositive,
    /// A zero component; angle taken from the major axis via `atan2`.
    AxisAligned,
}

/// Apply the case table. `None` when a component is zero (or NaN).
pub fn normalize_rotation(rot_00: f64, rot_01: f64) -> Option<(RotationCase, f64)> {
    if rot_01 < 0.0 && rot_00 < 0.0 {
        Some((RotationCase::BothNegative, rot_00))
    } else if rot_01 > 0.0 && rot_00 < 0.0 {
        if rot_01.abs() > rot_00.abs() {
            Some((RotationCase::MixedSteep, -rot_00))
        } else {
            Some((RotationCase::MixedShallow, -(90.0 + rot_01)))
        }
    } else if rot_01 < 0.0 && rot_00 > 0.0 {
        Some((RotationCase::NegativePositive, rot_00))
    } else if rot_01 > 0.0 && rot_00 > 0.0 {
        Some((RotationCase::BothPositive, -rot_00))
    } else {
        None
    }
}

/// Direction of the major axis (`radii[1]`, second row of `Vᵀ`) in degrees, in (-90, 90].
pub fn major_axis_degrees(e: &EnclosingEllipse) -> f64 {
    let deg = e.rotation[(1, 1)].atan2(e.rotation[(1, 0)]).to_degrees();
    if deg > 90.0 {
        deg - 180.0
    } else if deg <= -90.0 {
        deg + 180.0
    } else {
        deg
    }
}

/// Renderer angle (degrees) for an ellipse, plus the branch that produced it.
pub fn ellipse_rotation(e: &EnclosingEllipse) -> (RotationCase, f64) {
    let rot_00 = e.rotation[(0, 0)].to_degrees();
    let rot_01 = e.rotation[(0, 1)].to_degrees();
    normalize_rotation(rot_00, rot_01)
        .unwrap_or_else(|| (RotationCase::AxisAligned, major_axis_degrees(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{matrix, vector, Matrix2};

    fn check(rot_00: f64, rot_01: f64, case: RotationCase, expected: f64) {
        let (c, angle) = normalize_rotation(rot_00, rot_01).expect("covered case");
        assert_eq!(c, case);
        assert_eq!(angle, expected);
    }

    #[test]
    fn both_negative_passes_rot00_through() {
        check(-30.0, -45.0, RotationCase::BothNegative, -30.0);
    }

    #[test]
    fn mixed_steep_negates_rot00() {
        check(-20.0, 50.0, RotationCase::MixedSteep, 20.0);
    }

    #[test]
    fn mixed_shallow_offsets_rot01() {
        check(-50.0, 20.0, RotationCase::MixedShallow, -110.0);
        // Equal magnitudes fall into the shallow branch.
        check(-40.0, 40.0, RotationCase::MixedShallow, -130.0);
    }

    #[test]
    fn negative_positive_passes_rot00_through() {
        check(35.0, -10.0, RotationCase::NegativePositive, 35.0);
    }

    #[test]
    fn both_positive_negates_rot00() {
        check(12.5, 40.0, RotationCase::BothPositive, -12.5);
    }

    #[test]
    fn literal_matrix_entries_in_degrees() {
        // Vᵀ row (cos 60°, -sin 60°) → rot_00 ≈ 28.65, rot_01 ≈ -49.62.
        let th = 60f64.to_radians();
        let e = EnclosingEllipse {
            center: vector![0.0, 0.0],
            radii: vector![1.0, 2.0],
            rotation: matrix![th.cos(), -th.sin(); th.sin(), th.cos()],
            shape: Matrix2::identity(),
        };
        let (case, angle) = ellipse_rotation(&e);
        assert_eq!(case, RotationCase::NegativePositive);
        assert!((angle - 0.5f64.to_degrees()).abs() < 1e-9);
    }

    #[test]
    fn zero_component_uses_major_axis() {
        assert!(normalize_rotation(0.0, 57.29).is_none());
        assert!(normalize_rotation(-57.29, 0.0).is_none());
        // Minor axis along x, major along y.
        let e = EnclosingEllipse {
            center: vector![0.0, 0.0],
            radii: vector![1.0, 2.0],
            rotation: Matrix2::identity(),
            shape: Matrix2::identity(),
        };
        let (case, angle) = ellipse_rotation(&e);
        assert_eq!(case, RotationCase::AxisAligned);
        assert!((angle - 90.0).abs() < 1e-12);
    }
}

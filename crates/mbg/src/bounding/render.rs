//! Polygon rings for curved bounding geometry.
//!
//! Rings are CCW, without a repeated closing vertex. The vertex count is the
//! smallest one whose chord sagitta stays within `tolerance` of the true arc
//! (measured on the larger radius), with at least `MIN_SEGMENTS` vertices.

use std::f64::consts::TAU;

use super::error::MbgError;
use super::types::Point2;

const MIN_SEGMENTS: usize = 8;
const MAX_SEGMENTS: usize = 1 << 16;

/// Number of ring vertices for radius `r` at sagitta tolerance `tolerance`.
pub fn segment_count(r: f64, tolerance: f64) -> Result<usize, MbgError> {
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return Err(MbgError::invalid("render tolerance must be finite and > 0"));
    }
    if !r.is_finite() || r < 0.0 {
        return Err(MbgError::invalid("radius must be finite and >= 0"));
    }
    if tolerance >= r {
        return Ok(MIN_SEGMENTS);
    }
    // Sagitta of a chord spanning angle θ is r(1 - cos(θ/2)).
    let theta = 2.0 * (1.0 - tolerance / r).acos();
    let n = (TAU / theta).ceil() as usize;
    Ok(n.clamp(MIN_SEGMENTS, MAX_SEGMENTS))
}

pub fn circle_polygon(center: Point2, radius: f64, tolerance: f64) -> Result<Vec<Point2>, MbgError> {
    ellipse_polygon(center, radius, radius, 0.0, tolerance)
}

/// Ellipse with semi-axis `major` along direction `angle_deg` (CCW from +x)
/// and semi-axis `minor` perpendicular to it.
pub fn ellipse_polygon(
    center: Point2,
    major: f64,
    minor: f64,
    angle_deg: f64,
    tolerance: f64,
) -> Result<Vec<Point2>, MbgError> {
    let n = segment_count(major.max(minor), tolerance)?;
    let (s, c) = angle_deg.to_radians().sin_cos();
    Ok((0..n)
        .map(|k| {
            let t = TAU * k as f64 / n as f64;
            let (x, y) = (major * t.cos(), minor * t.sin());
            center + Point2::new(c * x - s * y, s * x + c * y)
        })
        .collect())
}

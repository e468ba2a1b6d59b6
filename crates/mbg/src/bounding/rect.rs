//! Minimum-area oriented bounding rectangle (rotating calipers).
//!
//! The optimal rectangle is flush with one hull edge, so each edge direction
//! (reduced modulo π/2) is a candidate frame. Points are projected into the
//! frame, the axis-aligned extent there gives a candidate, and the smallest
//! area wins. Equal areas keep the earlier edge.
//!
//! Code cross-refs: `util::convex_hull`, `types::OrientedRectangle`

use std::f64::consts::FRAC_PI_2;

use super::error::MbgError;
use super::types::{MbgCfg, OrientedRectangle, Point2};
use super::util::{convex_hull, ensure_polygonal};

/// Candidate frame: rotation angle plus the extent of the projected points.
#[derive(Clone, Copy, Debug)]
struct Frame {
    angle: f64,
    min: Point2,
    max: Point2,
}

impl Frame {
    fn project(points: &[Point2], angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut min = Point2::repeat(f64::INFINITY);
        let mut max = Point2::repeat(f64::NEG_INFINITY);
        for p in points {
            let q = Point2::new(c * p.x + s * p.y, -s * p.x + c * p.y);
            min = min.inf(&q);
            max = max.sup(&q);
        }
        Self { angle, min, max }
    }

    #[inline]
    fn area(&self) -> f64 {
        let ext = self.max - self.min;
        ext.x * ext.y
    }

    /// Map a point of the rotated frame back to world coordinates.
    #[inline]
    fn unrotate(&self, x: f64, y: f64) -> Point2 {
        let (s, c) = self.angle.sin_cos();
        Point2::new(c * x - s * y, s * x + c * y)
    }
}

/// Edge direction reduced into [0, π/2).
#[inline]
fn edge_angle(edge: Point2) -> f64 {
    let a = edge.y.atan2(edge.x).rem_euclid(FRAC_PI_2).abs();
    // rem_euclid may round up to the modulus itself.
    if a >= FRAC_PI_2 {
        0.0
    } else {
        a
    }
}

/// Minimum-area rectangle enclosing `points` at any orientation.
///
/// The input is reduced to its convex hull first, so hull vertices in any
/// order (or raw vertices) are accepted. Fails with `DegenerateInput` for
/// fewer than three distinct points or collinear input.
pub fn min_area_rect(points: &[Point2], cfg: &MbgCfg) -> Result<OrientedRectangle, MbgError> {
    ensure_polygonal(points, cfg.collinear_eps)?;
    let hull = convex_hull(points);
    let n = hull.len();

    let mut best: Option<Frame> = None;
    for i in 0..n {
        let edge = hull[(i + 1) % n] - hull[i];
        if edge.norm_squared() == 0.0 {
            continue;
        }
        let frame = Frame::project(&hull, edge_angle(edge));
        if best.as_ref().is_none_or(|b| frame.area() < b.area()) {
            best = Some(frame);
        }
    }
    let f = best.ok_or_else(|| MbgError::degenerate("hull has no edges"))?;

    let ext = f.max - f.min;
    let mid = (f.min + f.max) * 0.5;
    Ok(OrientedRectangle {
        angle: f.angle,
        area: f.area(),
        width: ext.x,
        height: ext.y,
        center: f.unrotate(mid.x, mid.y),
        corners: [
            f.unrotate(f.min.x, f.min.y),
            f.unrotate(f.max.x, f.min.y),
            f.unrotate(f.max.x, f.max.y),
            f.unrotate(f.min.x, f.max.y),
        ],
    })
}

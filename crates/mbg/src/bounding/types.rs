//! Value types shared by the solvers and the coordinator.
//!
//! - `MbgCfg`: tolerances and iteration caps, validated once per request.
//! - `PointSet`: non-empty, finite input cloud (usually hull vertices).
//! - `OrientedRectangle`, `EnclosingBall`, `EnclosingEllipse`: immutable solver results.
//!
//! Code cross-refs: `rect::min_area_rect`, `ball::min_enclosing_ball`,
//! `ellipse::min_volume_ellipse`, `coordinator::compute`

use std::fmt;
use std::str::FromStr;

use nalgebra::{Matrix2, Vector2};

use super::error::MbgError;

/// A 2D point. Coordinates are finite for every point admitted by `PointSet`.
pub type Point2 = Vector2<f64>;

/// Solver configuration (tolerances, caps, render resolution).
#[derive(Clone, Copy, Debug)]
pub struct MbgCfg {
    /// Khachiyan stopping threshold on the norm of the weight update.
    pub tolerance: f64,
    /// Khachiyan iteration cap; exceeding it yields `MbgError::Convergence`.
    pub max_iter: usize,
    /// Seed for the ball solver's insertion order. `None` keeps input order.
    pub ball_seed: Option<u64>,
    /// Max distance between a true arc and its polygon chord when rendering.
    pub render_tolerance: f64,
    /// Relative area threshold below which a point set counts as collinear.
    pub collinear_eps: f64,
}

impl Default for MbgCfg {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            max_iter: 100_000,
            ball_seed: Some(0x5eed),
            render_tolerance: 0.001,
            collinear_eps: 1e-12,
        }
    }
}

impl MbgCfg {
    pub fn validate(&self) -> Result<(), MbgError> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(MbgError::invalid("tolerance must be finite and > 0"));
        }
        if self.max_iter == 0 {
            return Err(MbgError::invalid("max_iter must be >= 1"));
        }
        if !(self.render_tolerance.is_finite() && self.render_tolerance > 0.0) {
            return Err(MbgError::invalid("render_tolerance must be finite and > 0"));
        }
        if !(self.collinear_eps.is_finite() && self.collinear_eps >= 0.0) {
            return Err(MbgError::invalid("collinear_eps must be finite and >= 0"));
        }
        Ok(())
    }
}

/// Non-empty sequence of finite points.
#[derive(Clone, Debug, PartialEq)]
pub struct PointSet {
    points: Vec<Point2>,
}

impl PointSet {
    pub fn new(points: Vec<Point2>) -> Result<Self, MbgError> {
        if points.is_empty() {
            return Err(MbgError::degenerate("point set is empty"));
        }
        if let Some(i) = points
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(MbgError::degenerate(format!(
                "point {i} has a non-finite coordinate"
            )));
        }
        Ok(Self { points })
    }

    pub fn from_xy(coords: &[(f64, f64)]) -> Result<Self, MbgError> {
        Self::new(coords.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    #[inline]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// False for every constructed set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_points(self) -> Vec<Point2> {
        self.points
    }
}

/// Requested minimum bounding geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GeomKind {
    ConvexHull,
    Envelope,
    #[default]
    RectangleArea,
    Circle,
    Ellipse,
}

impl GeomKind {
    pub const ALL: [GeomKind; 5] = [
        GeomKind::ConvexHull,
        GeomKind::Envelope,
        GeomKind::RectangleArea,
        GeomKind::Circle,
        GeomKind::Ellipse,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GeomKind::ConvexHull => "convex_hull",
            GeomKind::Envelope => "envelope",
            GeomKind::RectangleArea => "rectangle_area",
            GeomKind::Circle => "circle",
            GeomKind::Ellipse => "ellipse",
        }
    }
}

impl fmt::Display for GeomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeomKind {
    type Err = MbgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeomKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| MbgError::invalid(format!("unknown geometry type '{s}'")))
    }
}

/// Minimum-area rectangle at arbitrary orientation.
///
/// Invariant: `corners` wind counterclockwise, starting at the corner with
/// minimal coordinates in the rotated frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientedRectangle {
    /// Rotation of the rectangle's frame in radians, in [0, π/2).
    pub angle: f64,
    pub area: f64,
    /// Extent along the rotated x-axis.
    pub width: f64,
    /// Extent along the rotated y-axis.
    pub height: f64,
    pub center: Point2,
    pub corners: [Point2; 4],
}

impl OrientedRectangle {
    #[inline]
    pub fn angle_degrees(&self) -> f64 {
        self.angle.to_degrees()
    }

    /// Membership with slack `eps` on every edge.
    pub fn contains_eps(&self, p: Point2, eps: f64) -> bool {
        let (s, c) = self.angle.sin_cos();
        let d = p - self.center;
        let u = c * d.x + s * d.y;
        let v = -s * d.x + c * d.y;
        u.abs() <= 0.5 * self.width + eps && v.abs() <= 0.5 * self.height + eps
    }
}

/// Smallest enclosing circle.
///
/// The squared radius is the stored quantity; `radius()` is the only place a
/// square root is taken.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnclosingBall {
    pub center: Point2,
    pub radius_sq: f64,
}

impl EnclosingBall {
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius_sq.max(0.0).sqrt()
    }

    #[inline]
    pub fn contains_eps(&self, p: Point2, eps: f64) -> bool {
        (p - self.center).norm() <= self.radius() + eps
    }
}

/// Minimum-volume enclosing ellipse `{x : (x-c)ᵀ A (x-c) <= 1}`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnclosingEllipse {
    pub center: Point2,
    /// Semi-axis lengths `1/sqrt(s_i)` in singular-value order (not re-sorted).
    pub radii: Vector2<f64>,
    /// Right singular vectors of `A` as rows; row `i` is the axis of `radii[i]`.
    pub rotation: Matrix2<f64>,
    /// Shape matrix `A`.
    pub shape: Matrix2<f64>,
}

impl EnclosingEllipse {
    /// Quadratic form `(p-c)ᵀ A (p-c)`; at most 1 inside the ellipse.
    #[inline]
    pub fn level(&self, p: Point2) -> f64 {
        let d = p - self.center;
        d.dot(&(self.shape * d))
    }

    #[inline]
    pub fn contains_eps(&self, p: Point2, eps: f64) -> bool {
        self.level(p) <= 1.0 + eps
    }

    /// `(major, minor)` following the downstream convention: `radii[1]` is
    /// passed as the major distance, `radii[0]` as the minor one.
    #[inline]
    pub fn major_minor(&self) -> (f64, f64) {
        (self.radii[1], self.radii[0])
    }

    #[inline]
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.radii[0] * self.radii[1]
    }
}

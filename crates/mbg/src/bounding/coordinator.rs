//! Dispatch a `GeometryRequest` to its solver and shape the result for rendering.
//!
//! - `convex_hull` and `envelope` need no optimization: hull vertices and the
//!   axis-aligned extent are returned directly.
//! - `rectangle_area`, `circle`, `ellipse` run the matching solver; the circle's
//!   squared radius is converted here, and the ellipse angle goes through the
//!   rotation case table.
//!
//! Each call is independent. Errors are returned unchanged (no fallback
//! geometry); `compute_feature` attaches the feature label.

use super::ball::min_enclosing_ball;
use super::ellipse::min_volume_ellipse;
use super::error::{FeatureError, MbgError};
use super::rect::min_area_rect;
use super::render::{circle_polygon, ellipse_polygon};
use super::rotation::{ellipse_rotation, RotationCase};
use super::types::{EnclosingEllipse, GeomKind, MbgCfg, OrientedRectangle, Point2, PointSet};
use super::util::{convex_hull, ensure_polygonal, envelope};

/// One input feature or group plus the geometry wanted for it.
#[derive(Clone, Debug)]
pub struct GeometryRequest {
    pub points: PointSet,
    pub kind: GeomKind,
}

impl GeometryRequest {
    pub fn new(points: PointSet, kind: GeomKind) -> Self {
        Self { points, kind }
    }
}

/// Coordinator output, ready for polygon materialization.
#[derive(Clone, Debug, PartialEq)]
pub enum BoundingGeometry {
    ConvexHull {
        ring: Vec<Point2>,
    },
    Envelope {
        ring: [Point2; 4],
    },
    Rectangle(OrientedRectangle),
    Circle {
        center: Point2,
        radius: f64,
    },
    Ellipse {
        center: Point2,
        major: f64,
        minor: f64,
        /// Renderer angle in degrees.
        angle: f64,
        case: RotationCase,
        solution: EnclosingEllipse,
    },
}

impl BoundingGeometry {
    pub fn kind(&self) -> GeomKind {
        match self {
            BoundingGeometry::ConvexHull { .. } => GeomKind::ConvexHull,
            BoundingGeometry::Envelope { .. } => GeomKind::Envelope,
            BoundingGeometry::Rectangle(_) => GeomKind::RectangleArea,
            BoundingGeometry::Circle { .. } => GeomKind::Circle,
            BoundingGeometry::Ellipse { .. } => GeomKind::Ellipse,
        }
    }

    /// CCW polygon ring; curved kinds are sampled at `tolerance`.
    pub fn polygon(&self, tolerance: f64) -> Result<Vec<Point2>, MbgError> {
        match self {
            BoundingGeometry::ConvexHull { ring } => Ok(ring.clone()),
            BoundingGeometry::Envelope { ring } => Ok(ring.to_vec()),
            BoundingGeometry::Rectangle(r) => Ok(r.corners.to_vec()),
            BoundingGeometry::Circle { center, radius } => {
                circle_polygon(*center, *radius, tolerance)
            }
            BoundingGeometry::Ellipse {
                center,
                major,
                minor,
                angle,
                ..
            } => ellipse_polygon(*center, *major, *minor, *angle, tolerance),
        }
    }
}

/// Compute the requested bounding geometry for one point set.
pub fn compute(req: &GeometryRequest, cfg: &MbgCfg) -> Result<BoundingGeometry, MbgError> {
    cfg.validate()?;
    let points = req.points.points();
    tracing::debug!(kind = %req.kind, points = points.len(), "bounding geometry request");
    match req.kind {
        GeomKind::ConvexHull => {
            ensure_polygonal(points, cfg.collinear_eps)?;
            Ok(BoundingGeometry::ConvexHull {
                ring: convex_hull(points),
            })
        }
        GeomKind::Envelope => {
            let ring = envelope(points).ok_or_else(|| MbgError::degenerate("point set is empty"))?;
            Ok(BoundingGeometry::Envelope { ring })
        }
        GeomKind::RectangleArea => Ok(BoundingGeometry::Rectangle(min_area_rect(points, cfg)?)),
        GeomKind::Circle => {
            let ball = min_enclosing_ball(points, cfg)?;
            Ok(BoundingGeometry::Circle {
                center: ball.center,
                radius: ball.radius(),
            })
        }
        GeomKind::Ellipse => {
            let solution = min_volume_ellipse(points, cfg)?;
            let (major, minor) = solution.major_minor();
            let (case, angle) = ellipse_rotation(&solution);
            Ok(BoundingGeometry::Ellipse {
                center: solution.center,
                major,
                minor,
                angle,
                case,
                solution,
            })
        }
    }
}

/// `compute` with the failing feature/group named in the error.
pub fn compute_feature(
    feature: &str,
    req: &GeometryRequest,
    cfg: &MbgCfg,
) -> Result<BoundingGeometry, FeatureError> {
    compute(req, cfg).map_err(|e| FeatureError::new(feature, e))
}

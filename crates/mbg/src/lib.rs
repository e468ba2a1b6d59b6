//! Minimum bounding geometry for 2D feature point sets.
//!
//! Given the hull vertices of one feature (or one group of features), compute
//! the minimum-area oriented rectangle, the smallest enclosing circle or the
//! minimum-volume enclosing ellipse, and shape the result into a polygon ring
//! for a vector writer. Vector I/O, grouping and export live in the CLI crate.
//!
//! API Policy
//! - The crate is consumed by the `mbg` CLI in this workspace. Breaking changes
//!   are fine when they improve the design; keep the CLI in step.

pub mod bounding;
pub mod sample;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use bounding::{
    compute, compute_feature, BoundingGeometry, FeatureError, GeomKind, GeometryRequest, MbgCfg,
    MbgError, Point2, PointSet,
};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::bounding::{
        compute, compute_feature, convex_hull, envelope, min_area_rect, min_enclosing_ball,
        min_volume_ellipse, BoundingGeometry, EnclosingBall, EnclosingEllipse, FeatureError,
        GeomKind, GeometryRequest, MbgCfg, MbgError, OrientedRectangle, Point2, PointSet,
        RotationCase,
    };
    pub use crate::sample::{draw_cloud, CloudCfg, PointCount, ReplayToken};
    pub use nalgebra::{Matrix2 as Mat2, Vector2 as Vec2};
}

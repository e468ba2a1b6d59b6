//! Minimum bounding geometry (MBG) of 2D point sets.
//!
//! Purpose
//! - Compute, for the hull vertices of one feature or group, the minimum-area
//!   oriented rectangle, the smallest enclosing circle, or the minimum-volume
//!   enclosing ellipse, plus the trivial hull/envelope kinds.
//! - Keep every solver a pure function of `(points, MbgCfg)`: no shared state,
//!   no randomness beyond the fixed ball-solver seed.
//!
//! Layout
//! - `rect` (rotating calipers), `ball` (Welzl), `ellipse` (Khachiyan).
//! - `rotation`: ellipse angle case table; `render`: arc sampling.
//! - `coordinator`: dispatch by `GeomKind`, error context per feature.
//!
//! Code cross-refs: `GeometryRequest`, `BoundingGeometry`, `MbgCfg`, `MbgError`

mod ball;
mod coordinator;
mod ellipse;
mod error;
mod rect;
mod render;
mod rotation;
mod types;
mod util;

pub use ball::{circumscribe, min_enclosing_ball};
pub use coordinator::{compute, compute_feature, BoundingGeometry, GeometryRequest};
pub use ellipse::min_volume_ellipse;
pub use error::{FeatureError, MbgError};
pub use rect::min_area_rect;
pub use render::{circle_polygon, ellipse_polygon, segment_count};
pub use rotation::{ellipse_rotation, major_axis_degrees, normalize_rotation, RotationCase};
pub use types::{
    EnclosingBall, EnclosingEllipse, GeomKind, MbgCfg, OrientedRectangle, Point2, PointSet,
};
pub use util::{convex_hull, envelope};

#[cfg(test)]
mod tests;

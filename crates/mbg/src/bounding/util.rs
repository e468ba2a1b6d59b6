use std::cmp::Ordering;

use super::error::MbgError;
use super::types::Point2;

/// Points closer than this are treated as one vertex.
const DEDUP_EPS: f64 = 1e-12;

#[inline]
pub(crate) fn cross(a: Point2, b: Point2, c: Point2) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

fn lex_cmp(a: &Point2, b: &Point2) -> Ordering {
    a.x.partial_cmp(&b.x)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
}

/// Lexicographically sorted copy with near-duplicates removed.
pub(crate) fn distinct_points(points: &[Point2]) -> Vec<Point2> {
    let mut pts: Vec<_> = points.to_vec();
    pts.sort_by(lex_cmp);
    pts.dedup_by(|a, b| (*a - *b).norm() < DEDUP_EPS);
    pts
}

/// Andrew's monotone chain convex hull (CCW, no repeated closing vertex).
///
/// Collinear boundary points are dropped. Fewer than three distinct input
/// points come back unchanged (sorted, deduplicated); collinear input yields
/// its two extreme points.
pub fn convex_hull(points: &[Point2]) -> Vec<Point2> {
    let pts = distinct_points(points);
    if pts.len() < 3 {
        return pts;
    }
    let mut lower: Vec<Point2> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], *p) <= 0.0 {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<Point2> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], *p) <= 0.0 {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    let mut hull = lower;
    hull.extend(upper);
    hull
}

/// Axis-aligned bounding box as a CCW ring starting at `(min_x, min_y)`.
pub fn envelope(points: &[Point2]) -> Option<[Point2; 4]> {
    let first = points.first()?;
    let (mut lo, mut hi) = (*first, *first);
    for p in &points[1..] {
        lo = lo.inf(p);
        hi = hi.sup(p);
    }
    Some([
        Point2::new(lo.x, lo.y),
        Point2::new(hi.x, lo.y),
        Point2::new(hi.x, hi.y),
        Point2::new(lo.x, hi.y),
    ])
}

/// Reject inputs that cannot span a 2D region: fewer than three distinct
/// points, or all points on one line up to `eps` relative to the squared extent.
pub(crate) fn ensure_polygonal(points: &[Point2], eps: f64) -> Result<(), MbgError> {
    let distinct = distinct_points(points);
    if distinct.len() < 3 {
        return Err(MbgError::degenerate(format!(
            "need at least 3 distinct points, got {}",
            distinct.len()
        )));
    }
    let a = distinct[0];
    let b = distinct
        .iter()
        .copied()
        .max_by(|p, q| {
            (*p - a)
                .norm_squared()
                .partial_cmp(&(*q - a).norm_squared())
                .unwrap_or(Ordering::Equal)
        })
        .unwrap_or(a);
    let scale = (b - a).norm_squared();
    let spread = distinct
        .iter()
        .map(|p| cross(a, b, *p).abs())
        .fold(0.0, f64::max);
    if scale <= 0.0 || spread <= eps * scale {
        return Err(MbgError::degenerate("all points are collinear"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn hull_drops_interior_and_collinear_points() {
        let pts = vec![
            vector![0.0, 0.0],
            vector![2.0, 0.0],
            vector![1.0, 0.0],
            vector![2.0, 2.0],
            vector![0.0, 2.0],
            vector![1.0, 1.0],
            vector![0.0, 0.0],
        ];
        let hull = convex_hull(&pts);
        assert_eq!(hull.len(), 4);
        let area2: f64 = (0..hull.len())
            .map(|i| {
                let p = hull[i];
                let q = hull[(i + 1) % hull.len()];
                p.x * q.y - q.x * p.y
            })
            .sum();
        assert!((area2 - 8.0).abs() < 1e-12, "CCW with area 4");
    }

    #[test]
    fn envelope_of_scattered_points() {
        let pts = vec![vector![1.0, -2.0], vector![-3.0, 0.5], vector![0.0, 4.0]];
        let env = envelope(&pts).unwrap();
        assert_eq!(env[0], vector![-3.0, -2.0]);
        assert_eq!(env[2], vector![1.0, 4.0]);
        assert!(envelope(&[]).is_none());
    }

    #[test]
    fn polygonal_check() {
        let square = [
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![1.0, 1.0],
        ];
        assert!(ensure_polygonal(&square, 1e-12).is_ok());
        let line = [vector![0.0, 0.0], vector![1.0, 1.0], vector![3.0, 3.0]];
        assert!(matches!(
            ensure_polygonal(&line, 1e-12),
            Err(MbgError::DegenerateInput { .. })
        ));
        let twins = [vector![5.0, 5.0], vector![5.0, 5.0], vector![6.0, 5.0]];
        assert!(matches!(
            ensure_polygonal(&twins, 1e-12),
            Err(MbgError::DegenerateInput { .. })
        ));
    }
}

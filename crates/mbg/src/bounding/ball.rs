//! Smallest enclosing circle via Welzl's incremental algorithm.
//!
//! Points are visited in a seeded pseudo-random order (or input order when
//! `MbgCfg::ball_seed` is `None`). The ball only changes when a point falls
//! outside it, and is then rebuilt from a boundary set of one, two or three
//! points through `circumscribe`.
//!
//! Convention: the solver returns the squared radius (`EnclosingBall::radius_sq`);
//! consumers call `EnclosingBall::radius()`.
//!
//! Code cross-refs: `types::EnclosingBall`, `coordinator::compute`

use nalgebra::{Matrix2, Vector2};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::error::MbgError;
use super::types::{EnclosingBall, MbgCfg, Point2};

/// Relative slack for the containment test; keeps round-off from pulling
/// near-duplicate points onto the boundary set.
const CONTAIN_EPS: f64 = 1e-10;
/// Gram determinant below which a three-point boundary counts as collinear.
const GRAM_EPS: f64 = 1e-14;

#[inline]
fn contains(ball: &EnclosingBall, p: Point2) -> bool {
    let r = ball.radius();
    (p - ball.center).norm() <= r + CONTAIN_EPS * (1.0 + r)
}

/// Circumscribed ball of one to three boundary points.
///
/// The center is written as `p0 + Σ λ_k u_k` with unit directions
/// `u_k = (p_k - p0)/|p_k - p0|`; it satisfies `u_k · (c - p0) = |p_k - p0| / 2`,
/// i.e. the Gram system `G λ = b`.
pub fn circumscribe(boundary: &[Point2]) -> Result<EnclosingBall, MbgError> {
    let (&p0, rest) = boundary
        .split_first()
        .ok_or_else(|| MbgError::degenerate("empty boundary set"))?;
    let mut dirs = Vec::with_capacity(rest.len());
    let mut half = Vec::with_capacity(rest.len());
    for p in rest {
        let d = *p - p0;
        let len = d.norm();
        if len == 0.0 {
            return Err(MbgError::singular("circumscribe (coincident boundary points)"));
        }
        dirs.push(d / len);
        half.push(0.5 * len);
    }
    let offset = match dirs.len() {
        0 => Vector2::zeros(),
        1 => dirs[0] * half[0],
        2 => {
            let g = dirs[0].dot(&dirs[1]);
            let gram = Matrix2::new(1.0, g, g, 1.0);
            if gram.determinant().abs() <= GRAM_EPS {
                return Err(MbgError::singular("circumscribe (collinear boundary points)"));
            }
            let lambda = gram
                .try_inverse()
                .ok_or_else(|| MbgError::singular("circumscribe (gram inverse)"))?
                * Vector2::new(half[0], half[1]);
            dirs[0] * lambda.x + dirs[1] * lambda.y
        }
        _ => {
            return Err(MbgError::singular(
                "circumscribe (more than three boundary points)",
            ))
        }
    };
    Ok(EnclosingBall {
        center: p0 + offset,
        radius_sq: offset.norm_squared(),
    })
}

/// Smallest circle containing every point. One point gives a zero-radius ball.
pub fn min_enclosing_ball(points: &[Point2], cfg: &MbgCfg) -> Result<EnclosingBall, MbgError> {
    if points.is_empty() {
        return Err(MbgError::degenerate("point set is empty"));
    }
    let mut pts = points.to_vec();
    if let Some(seed) = cfg.ball_seed {
        pts.shuffle(&mut StdRng::seed_from_u64(seed));
    }

    let mut ball = circumscribe(&pts[..1])?;
    for i in 1..pts.len() {
        if contains(&ball, pts[i]) {
            continue;
        }
        ball = circumscribe(&[pts[i]])?;
        for j in 0..i {
            if contains(&ball, pts[j]) {
                continue;
            }
            ball = circumscribe(&[pts[i], pts[j]])?;
            for k in 0..j {
                if contains(&ball, pts[k]) {
                    continue;
                }
                ball = circumscribe(&[pts[i], pts[j], pts[k]])?;
            }
        }
    }
    Ok(ball)
}

//! Minimum-volume enclosing ellipse (Löwner–John) via Khachiyan's algorithm.
//!
//! Model
//! - Lift points to `q_i = (x_i, y_i, 1)` and iterate on a weight vector `u`
//!   (uniform start). Each step moves weight toward the point with the largest
//!   leverage `M_i = q_iᵀ V⁻¹ q_i`, `V = Σ u_i q_i q_iᵀ`, using the closed-form
//!   step `(M_j - d - 1) / ((d + 1)(M_j - 1))`.
//! - Stop once the Euclidean norm of the weight update is `<= tolerance`.
//! - The weights are translation invariant, so the iteration runs on points
//!   relative to their mean. Raw projected coordinates (~1e6) make `V`
//!   numerically singular.
//! - Center `c = Σ u_i p_i`, shape `A = (1/d) (Σ u_i p_i p_iᵀ - c cᵀ)⁻¹`, and
//!   `A = U diag(s) Vᵀ` gives semi-axes `1/sqrt(s_i)` and rotation `Vᵀ`.
//!
//! Code cross-refs: `types::EnclosingEllipse`, `rotation::normalize_rotation`

use nalgebra::{Matrix2, Matrix3, Vector2, Vector3, SVD};

use super::error::MbgError;
use super::types::{EnclosingEllipse, MbgCfg, Point2};
use super::util::ensure_polygonal;

/// Ambient dimension.
const D: f64 = 2.0;

/// Index of the first maximal entry.
fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        if best.is_none_or(|(_, b)| v > b) {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}

/// Run the Khachiyan weight iteration to the configured tolerance.
///
/// Returns the converged weights and the number of iterations taken.
fn khachiyan_weights(points: &[Point2], cfg: &MbgCfg) -> Result<(Vec<f64>, usize), MbgError> {
    let n = points.len();
    let q: Vec<Vector3<f64>> = points.iter().map(|p| Vector3::new(p.x, p.y, 1.0)).collect();
    let mut u = vec![1.0 / n as f64; n];
    let mut leverage = vec![0.0; n];
    let mut err = 1.0 + cfg.tolerance;
    let mut iterations = 0usize;

    while err > cfg.tolerance {
        if iterations >= cfg.max_iter {
            return Err(MbgError::Convergence {
                iterations,
                residual: err,
            });
        }
        iterations += 1;

        let v = q
            .iter()
            .zip(&u)
            .fold(Matrix3::zeros(), |acc, (qi, &ui)| acc + qi * qi.transpose() * ui);
        let v_inv = v
            .try_inverse()
            .ok_or_else(|| MbgError::singular("khachiyan (V inverse)"))?;
        for (m, qi) in leverage.iter_mut().zip(&q) {
            *m = qi.dot(&(v_inv * qi));
        }
        let j = argmax(&leverage).ok_or_else(|| MbgError::degenerate("point set is empty"))?;
        let max = leverage[j];
        let step = (max - D - 1.0) / ((D + 1.0) * (max - 1.0));
        if !step.is_finite() {
            return Err(MbgError::singular("khachiyan (step size)"));
        }

        let mut delta_sq = 0.0;
        for (i, ui) in u.iter_mut().enumerate() {
            let mut next = (1.0 - step) * *ui;
            if i == j {
                next += step;
            }
            delta_sq += (next - *ui).powi(2);
            *ui = next;
        }
        err = delta_sq.sqrt();
        tracing::trace!(iteration = iterations, residual = err, pivot = j, "khachiyan step");
    }
    Ok((u, iterations))
}

/// Minimum-volume ellipse enclosing `points`, to Khachiyan tolerance `cfg.tolerance`.
///
/// Fails with `DegenerateInput` for fewer than three distinct or collinear
/// points, `SingularConfiguration` if an inversion breaks down, and
/// `Convergence` when `cfg.max_iter` is exhausted.
pub fn min_volume_ellipse(points: &[Point2], cfg: &MbgCfg) -> Result<EnclosingEllipse, MbgError> {
    cfg.validate()?;
    ensure_polygonal(points, cfg.collinear_eps)?;
    let origin = points.iter().sum::<Point2>() / points.len() as f64;
    let local: Vec<Point2> = points.iter().map(|p| p - origin).collect();
    let (u, iterations) = khachiyan_weights(&local, cfg)?;

    let offset: Point2 = local
        .iter()
        .zip(&u)
        .fold(Vector2::zeros(), |acc, (p, &ui)| acc + p * ui);
    let second_moment = local
        .iter()
        .zip(&u)
        .fold(Matrix2::zeros(), |acc, (p, &ui)| acc + p * p.transpose() * ui);
    let scatter = second_moment - offset * offset.transpose();
    let center = origin + offset;
    let shape = scatter
        .try_inverse()
        .ok_or_else(|| MbgError::singular("ellipse shape matrix"))?
        / D;

    let svd = SVD::new(shape, true, true);
    let rotation = svd
        .v_t
        .ok_or_else(|| MbgError::singular("ellipse SVD"))?;
    let s = svd.singular_values;
    if !(s[0] > 0.0 && s[1] > 0.0) {
        return Err(MbgError::singular("ellipse SVD (zero singular value)"));
    }
    let radii = Vector2::new(1.0 / s[0].sqrt(), 1.0 / s[1].sqrt());
    tracing::trace!(iterations, r0 = radii[0], r1 = radii[1], "khachiyan converged");

    Ok(EnclosingEllipse {
        center,
        radii,
        rotation,
        shape,
    })
}

//! Reproducible random point clouds (anisotropic, rotated, offset).
//!
//! Purpose
//! - Feed benches, demos and seeded tests with feature-like point sets whose
//!   bounding geometry is not axis-aligned.
//!
//! Model
//! - Sample `n` points uniformly in the unit disk, stretch by `(sx, sy)`,
//!   rotate by `angle`, translate by `center`.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bounding::Point2;

/// Point count distribution.
#[derive(Clone, Copy, Debug)]
pub enum PointCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl PointCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            PointCount::Fixed(n) => n.max(1),
            PointCount::Uniform { min, max } => {
                let lo = min.max(1);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Cloud sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct CloudCfg {
    pub count: PointCount,
    /// Semi-axes of the stretched disk.
    pub stretch: Vector2<f64>,
    /// Rotation in radians.
    pub angle: f64,
    pub center: Point2,
    /// Random rotation in [0, 2π) instead of `angle`?
    pub random_angle: bool,
}

impl Default for CloudCfg {
    fn default() -> Self {
        Self {
            count: PointCount::Fixed(64),
            stretch: Vector2::new(3.0, 1.0),
            angle: 0.0,
            center: Point2::zeros(),
            random_angle: true,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a point cloud for `tok`. Identical tokens give identical clouds.
pub fn draw_cloud(cfg: CloudCfg, tok: ReplayToken) -> Vec<Point2> {
    let mut rng = tok.to_std_rng();
    let n = cfg.count.sample(&mut rng);
    let angle = if cfg.random_angle {
        rng.gen::<f64>() * std::f64::consts::TAU
    } else {
        cfg.angle
    };
    let (s, c) = angle.sin_cos();
    (0..n)
        .map(|_| {
            let r = rng.gen::<f64>().sqrt();
            let th = rng.gen::<f64>() * std::f64::consts::TAU;
            let x = cfg.stretch.x * r * th.cos();
            let y = cfg.stretch.y * r * th.sin();
            cfg.center + Vector2::new(c * x - s * y, s * x + c * y)
        })
        .collect()
}

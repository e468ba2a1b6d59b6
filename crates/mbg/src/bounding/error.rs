//! Error taxonomy for the bounding-geometry solvers.
//!
//! Every variant is final for the input it concerns: callers get no partial
//! geometry and the solvers never retry with relaxed settings.

use std::fmt;

/// Errors surfaced by the solvers and the coordinator.
#[derive(Clone, Debug, PartialEq)]
pub enum MbgError {
    /// Too few distinct points, all points collinear, or non-finite coordinates.
    DegenerateInput { reason: String },
    /// A linear solve or matrix inversion had no (numerically) unique solution.
    SingularConfiguration { context: &'static str },
    /// Khachiyan iteration hit the cap before the weight delta dropped below tolerance.
    Convergence { iterations: usize, residual: f64 },
    /// Rejected configuration value.
    InvalidConfig { reason: String },
}

impl MbgError {
    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateInput {
            reason: reason.into(),
        }
    }

    pub(crate) fn singular(context: &'static str) -> Self {
        Self::SingularConfiguration { context }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for MbgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateInput { reason } => write!(f, "degenerate input: {reason}"),
            Self::SingularConfiguration { context } => {
                write!(f, "singular configuration in {context}")
            }
            Self::Convergence {
                iterations,
                residual,
            } => write!(
                f,
                "no convergence after {iterations} iterations (residual {residual:.3e})"
            ),
            Self::InvalidConfig { reason } => write!(f, "invalid config: {reason}"),
        }
    }
}

impl std::error::Error for MbgError {}

/// An [`MbgError`] tagged with the feature or group that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureError {
    pub feature: String,
    pub source: MbgError,
}

impl FeatureError {
    pub fn new(feature: impl Into<String>, source: MbgError) -> Self {
        Self {
            feature: feature.into(),
            source,
        }
    }
}

impl fmt::Display for FeatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot compute minimum bounding geometry for <{}>: {}",
            self.feature, self.source
        )
    }
}

impl std::error::Error for FeatureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

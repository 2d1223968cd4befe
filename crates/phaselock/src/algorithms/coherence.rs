//! Pairwise similarity measures between grid-point series.
//!
//! Each measure is symmetric in its two arguments. Adjacency matrices built
//! from them have a zeroed diagonal.

// External dependencies
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::math::stats::{covariance, pearson};

/// Pairwise similarity measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CoherenceMeasure {
    /// Mean phase coherence `|<exp(i(φ1 - φ2))>|²` (expects continuous phases).
    #[default]
    MeanPhaseCoherence,

    /// Mutual information under a Gaussian assumption, `-ln(1 - r²)/2`.
    GaussianMutualInformation,

    /// Sample covariance (ddof = 1).
    Covariance,

    /// Pearson correlation coefficient.
    Correlation,

    /// L1 distance.
    L1,

    /// L2 distance.
    L2,
}

impl CoherenceMeasure {
    /// True when the measure is computed on unwrapped phases.
    pub fn needs_continuous_phase(&self) -> bool {
        matches!(self, Self::MeanPhaseCoherence)
    }

    /// Evaluate the measure on two equal-length series.
    pub fn compute(&self, a: &[f64], b: &[f64]) -> f64 {
        match self {
            Self::MeanPhaseCoherence => mean_phase_coherence(a, b),
            Self::GaussianMutualInformation => gaussian_mutual_information(a, b),
            Self::Covariance => covariance(a, b, 1),
            Self::Correlation => pearson(a, b),
            Self::L1 => lp_distance(a, b, 1),
            Self::L2 => lp_distance(a, b, 2),
        }
    }
}

/// Squared length of the mean unit phasor of the phase difference.
pub fn mean_phase_coherence(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return f64::NAN;
    }
    let (cos, sin) = a
        .iter()
        .zip(b)
        .fold((0.0, 0.0), |(c, s), (&x, &y)| {
            let d = x - y;
            (c + d.cos(), s + d.sin())
        });
    let (c, s) = (cos / n as f64, sin / n as f64);
    c * c + s * s
}

/// Gaussian mutual information; 0 for perfectly correlated series.
pub fn gaussian_mutual_information(a: &[f64], b: &[f64]) -> f64 {
    let r = pearson(a, b);
    if r >= 1.0 {
        return 0.0;
    }
    -0.5 * (1.0 - r * r).ln()
}

/// `(Σ |a - b|^p)^(1/p)`.
pub fn lp_distance(a: &[f64], b: &[f64], p: i32) -> f64 {
    let sum: f64 = a.iter().zip(b).map(|(&x, &y)| (x - y).abs().powi(p)).sum();
    sum.powf(1.0 / p as f64)
}

//! Phase-conditioned sector statistics.
//!
//! ## Purpose
//!
//! This module partitions the samples of one grid point into equal-width
//! angular sectors by their oscillatory phase and computes the mean and
//! Bessel-corrected variance of the values falling in each sector.
//!
//! ## Design notes
//!
//! * **Explicit edges**: Edges are computed once and passed to every task.
//! * **Boundary policy**: By default a sample exactly on a shared edge counts
//!   in both adjacent sectors. `LeftInclusive` assigns it to one sector only.
//! * **Missing data**: A point whose phase is entirely missing yields all-NaN
//!   statistics. Empty sectors give NaN means; sectors with fewer than two
//!   samples give NaN variances.
//!
//! ## Key concepts
//!
//! * **Edges**: `bins + 1` equally spaced values from `-π` to `π`.
//! * **Summaries**: Spread (max - min over sectors) and mean over sectors.
//!
//! ## Invariants
//!
//! * Output vectors have exactly `bins` entries.
//!
//! ## Non-goals
//!
//! * This module does not compute equiquantal (rank-based) sectors.

// External dependencies
use core::f64::consts::PI;
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::math::stats::{all_nan, linspace, mean, variance};

/// Default number of phase sectors.
pub const DEFAULT_BINS: usize = 8;

// ============================================================================
// Boundary Policy
// ============================================================================

/// Membership rule for samples on a sector edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundaryPolicy {
    /// `lo <= φ <= hi` for every sector.
    #[default]
    BothInclusive,

    /// `lo <= φ < hi`, with the last sector closed at `π`.
    LeftInclusive,
}

impl BoundaryPolicy {
    #[inline]
    fn contains(&self, phi: f64, lo: f64, hi: f64, last: bool) -> bool {
        match self {
            Self::BothInclusive => phi >= lo && phi <= hi,
            Self::LeftInclusive => phi >= lo && (phi < hi || (last && phi <= hi)),
        }
    }
}

// ============================================================================
// Sector Statistics
// ============================================================================

/// `bins + 1` equally spaced sector edges over `[-π, π]`.
pub fn bin_edges(bins: usize) -> Vec<f64> {
    linspace(-PI, PI, bins + 1)
}

/// Per-sector mean and variance of one grid point.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorStatistics {
    /// Sector means.
    pub means: Vec<f64>,

    /// Sector variances (ddof = 1).
    pub variances: Vec<f64>,
}

impl SectorStatistics {
    /// All-NaN statistics for `bins` sectors.
    pub fn missing(bins: usize) -> Self {
        Self {
            means: vec![f64::NAN; bins],
            variances: vec![f64::NAN; bins],
        }
    }
}

/// Bucket `values` by `phase` into the sectors given by `edges`.
pub fn sector_statistics(
    phase: &[f64],
    values: &[f64],
    edges: &[f64],
    policy: BoundaryPolicy,
) -> SectorStatistics {
    let bins = edges.len().saturating_sub(1);
    if all_nan(phase) {
        return SectorStatistics::missing(bins);
    }

    let mut stats = SectorStatistics::missing(bins);
    for (b, edge) in edges.windows(2).enumerate() {
        let members: Vec<f64> = phase
            .iter()
            .zip(values)
            .filter(|&(&phi, _)| policy.contains(phi, edge[0], edge[1], b + 1 == bins))
            .map(|(_, &v)| v)
            .collect();

        stats.means[b] = mean(&members);
        stats.variances[b] = variance(&members, 1);
    }
    stats
}

// ============================================================================
// Summaries
// ============================================================================

/// Difference between the largest and smallest sector value.
///
/// NaN sectors are skipped; all-NaN input gives NaN.
pub fn sector_spread(values: &[f64]) -> f64 {
    let valid = values.iter().copied().filter(|v| !v.is_nan());
    let (lo, hi) = valid.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if lo > hi { f64::NAN } else { hi - lo }
}

/// Mean of the sector values, NaN sectors included.
pub fn sector_mean(values: &[f64]) -> f64 {
    mean(values)
}

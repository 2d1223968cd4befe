//! Result tables and the versioned persistence record.
//!
//! ## Purpose
//!
//! This module defines the arrays handed to downstream significance testing:
//! the per-point sector table of one field, the ensemble table over
//! surrogate families and realizations, and the versioned record wrapping
//! both for an external persistence collaborator.
//!
//! ## Design notes
//!
//! * **Coordinate assembly**: Task results are scattered into NaN-filled
//!   arrays by their grid coordinate; points without a result stay missing.
//! * **Serializable**: All tables derive `serde` traits via `ndarray`'s
//!   serde support.
//! * **Ergonomics**: `BinTable` implements `Display` for a quick summary.
//!
//! ## Key concepts
//!
//! * **Bin table**: `(level, lat, lon, bins)` means and variances.
//! * **Ensemble table**: `(family, realization, level, lat, lon, bins)`.
//!
//! ## Invariants
//!
//! * Means and variances of a table always share one shape.
//!
//! ## Non-goals
//!
//! * This module does not write files.
//! * This module does not perform significance tests.

// External dependencies
use core::fmt::{Display, Formatter, Result as FmtResult};
use ndarray::{Array3, Array4, Array6, Axis, s};
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::algorithms::binning::{BoundaryPolicy, SectorStatistics, sector_mean, sector_spread};
use crate::engine::executor::PointResult;
use crate::primitives::errors::PhaseLockError;
use crate::primitives::field::GridPoint;

/// Format version written into every `ResultRecord`.
pub const RECORD_VERSION: u32 = 1;

// ============================================================================
// Surrogate Families
// ============================================================================

/// Surrogate algorithm family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurrogateKind {
    /// Fourier surrogate with one angle vector shared by the whole field.
    Fourier,

    /// Fourier surrogate with independent angles per grid point.
    FourierSpatial,

    /// Multifractal Haar-cascade surrogate.
    Multifractal,

    /// AR residual-resampling surrogate.
    Autoregressive,
}

impl SurrogateKind {
    /// Every family, in the order the ensemble table uses by default.
    pub const ALL: [SurrogateKind; 4] = [
        Self::Multifractal,
        Self::Fourier,
        Self::FourierSpatial,
        Self::Autoregressive,
    ];

    /// Short label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fourier => "FT",
            Self::FourierSpatial => "FTS",
            Self::Multifractal => "MF",
            Self::Autoregressive => "AR",
        }
    }
}

impl Display for SurrogateKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.label())
    }
}

// ============================================================================
// Series Assembly
// ============================================================================

/// Scatter per-point series into a `(time, level, lat, lon)` array.
pub fn assemble_series(
    time_len: usize,
    grid: [usize; 3],
    results: Vec<PointResult<Vec<f64>>>,
) -> Result<Array4<f64>, PhaseLockError> {
    let mut out = Array4::from_elem((time_len, grid[0], grid[1], grid[2]), f64::NAN);
    for PointResult { point, value } in results {
        if value.len() != time_len {
            return Err(PhaseLockError::ShapeMismatch {
                expected: time_len,
                got: value.len(),
            });
        }
        for (t, v) in value.into_iter().enumerate() {
            out[[t, point.level, point.lat, point.lon]] = v;
        }
    }
    Ok(out)
}

// ============================================================================
// Bin Table
// ============================================================================

/// Per-point sector statistics of one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinTable {
    /// Sector means, `(level, lat, lon, bins)`.
    pub means: Array4<f64>,

    /// Sector variances, `(level, lat, lon, bins)`.
    pub variances: Array4<f64>,
}

impl BinTable {
    /// All-NaN table for `grid` with `bins` sectors.
    pub fn new(grid: [usize; 3], bins: usize) -> Self {
        let shape = (grid[0], grid[1], grid[2], bins);
        Self {
            means: Array4::from_elem(shape, f64::NAN),
            variances: Array4::from_elem(shape, f64::NAN),
        }
    }

    /// Assemble a table from per-point task results.
    pub fn from_results(
        grid: [usize; 3],
        bins: usize,
        results: Vec<PointResult<SectorStatistics>>,
    ) -> Self {
        let mut table = Self::new(grid, bins);
        for PointResult { point, value } in results {
            table.insert(point, &value);
        }
        table
    }

    /// Store one point's statistics.
    pub fn insert(&mut self, point: GridPoint, stats: &SectorStatistics) {
        for (b, (&m, &v)) in stats.means.iter().zip(&stats.variances).enumerate() {
            self.means[[point.level, point.lat, point.lon, b]] = m;
            self.variances[[point.level, point.lat, point.lon, b]] = v;
        }
    }

    /// Number of sectors.
    pub fn bins(&self) -> usize {
        self.means.shape()[3]
    }

    /// Spatial `(level, lat, lon)` shape.
    pub fn grid(&self) -> [usize; 3] {
        let s = self.means.shape();
        [s[0], s[1], s[2]]
    }

    /// Sector means of one point.
    pub fn point_means(&self, point: GridPoint) -> Vec<f64> {
        self.means
            .slice(s![point.level, point.lat, point.lon, ..])
            .to_vec()
    }

    /// Sector variances of one point.
    pub fn point_variances(&self, point: GridPoint) -> Vec<f64> {
        self.variances
            .slice(s![point.level, point.lat, point.lon, ..])
            .to_vec()
    }

    /// Number of points whose sector means are entirely missing.
    pub fn missing_points(&self) -> usize {
        self.means
            .lanes(Axis(3))
            .into_iter()
            .filter(|lane| lane.iter().all(|v| v.is_nan()))
            .count()
    }

    /// Surface-style `(lat, lon, bins)` means of one level.
    pub fn level_means(&self, level: usize) -> Array3<f64> {
        self.means.index_axis(Axis(0), level).to_owned()
    }

    /// Per-point spread (max - min) of the sector means.
    pub fn mean_spread(&self) -> Array3<f64> {
        self.means.map_axis(Axis(3), |lane| sector_spread(&lane.to_vec()))
    }

    /// Per-point spread (max - min) of the sector variances.
    pub fn variance_spread(&self) -> Array3<f64> {
        self.variances
            .map_axis(Axis(3), |lane| sector_spread(&lane.to_vec()))
    }

    /// Per-point average of the sector means.
    pub fn mean_over_bins(&self) -> Array3<f64> {
        self.means.map_axis(Axis(3), |lane| sector_mean(&lane.to_vec()))
    }
}

impl Display for BinTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let [levels, lats, lons] = self.grid();
        writeln!(f, "Summary:")?;
        writeln!(f, "  Grid:           {levels} x {lats} x {lons}")?;
        writeln!(f, "  Sectors:        {}", self.bins())?;
        writeln!(f, "  Missing points: {}", self.missing_points())?;
        Ok(())
    }
}

// ============================================================================
// Ensemble Table
// ============================================================================

/// Sector statistics of every surrogate realization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleTable {
    /// Family of each entry along axis 0.
    pub families: Vec<SurrogateKind>,

    /// Means, `(family, realization, level, lat, lon, bins)`.
    pub means: Array6<f64>,

    /// Variances, `(family, realization, level, lat, lon, bins)`.
    pub variances: Array6<f64>,
}

impl EnsembleTable {
    /// All-NaN ensemble table.
    pub fn new(
        families: Vec<SurrogateKind>,
        realizations: usize,
        grid: [usize; 3],
        bins: usize,
    ) -> Self {
        let shape = [families.len(), realizations, grid[0], grid[1], grid[2], bins];
        Self {
            families,
            means: Array6::from_elem(shape, f64::NAN),
            variances: Array6::from_elem(shape, f64::NAN),
        }
    }

    /// Number of realizations per family.
    pub fn realizations(&self) -> usize {
        self.means.shape()[1]
    }

    /// Store the table of one realization.
    pub fn insert(&mut self, family: usize, realization: usize, table: &BinTable) {
        self.means
            .slice_mut(s![family, realization, .., .., .., ..])
            .assign(&table.means);
        self.variances
            .slice_mut(s![family, realization, .., .., .., ..])
            .assign(&table.variances);
    }

    /// Table of one realization.
    pub fn realization(&self, family: usize, realization: usize) -> BinTable {
        BinTable {
            means: self
                .means
                .slice(s![family, realization, .., .., .., ..])
                .to_owned(),
            variances: self
                .variances
                .slice(s![family, realization, .., .., .., ..])
                .to_owned(),
        }
    }
}

// ============================================================================
// Persistence Record
// ============================================================================

/// Versioned bundle of analysis outputs for an external writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Format version, `RECORD_VERSION` when written by this crate.
    pub version: u32,

    /// Oscillation period the phases were extracted at.
    pub period: f64,

    /// Edge membership rule used for binning.
    pub boundary_policy: BoundaryPolicy,

    /// Statistics of the observed field.
    pub data: BinTable,

    /// Statistics of the surrogate ensemble, if one was run.
    pub ensemble: Option<EnsembleTable>,
}

impl ResultRecord {
    /// Wrap analysis outputs in a record of the current version.
    pub fn new(
        period: f64,
        boundary_policy: BoundaryPolicy,
        data: BinTable,
        ensemble: Option<EnsembleTable>,
    ) -> Self {
        Self {
            version: RECORD_VERSION,
            period,
            boundary_policy,
            data,
            ensemble,
        }
    }

    /// Reject records written by a different format version.
    pub fn check_version(&self) -> Result<(), PhaseLockError> {
        if self.version != RECORD_VERSION {
            return Err(PhaseLockError::InvalidInput(format!(
                "record version {} (expected {RECORD_VERSION})",
                self.version
            )));
        }
        Ok(())
    }
}

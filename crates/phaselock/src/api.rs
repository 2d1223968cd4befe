//! High-level API for surrogate generation and phase analysis.
//!
//! ## Purpose
//!
//! This module provides the user-facing entry points: fluent builders that
//! collect configuration, validate it, and produce a `SurrogateGenerator` or
//! a `PhaseAnalysis`.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builders with sensible defaults for all optional parameters.
//! * **Validated**: Parameters are validated when `.build()` is called.
//! * **Deferred errors**: Setting a parameter twice is reported by `.build()`.
//!
//! ### Configuration Flow
//!
//! 1. Create a builder via `Surrogates::new()` or `Analysis::new()`.
//! 2. Chain configuration methods (`.seed()`, `.period()`, etc.).
//! 3. Call `.build()` and pass a `GridExecutor` to the operations.

// Internal dependencies
use crate::adapters::analysis::AnalysisConfig;
use crate::adapters::surrogates::SurrogateConfig;
use crate::algorithms::wavelet::WaveletConfig;
use crate::engine::validator::Validator;
use crate::math::morlet::DEFAULT_K0;

// Publicly re-exported types
pub use crate::adapters::analysis::{PhaseAnalysis, PhaseField, adjacency_matrix};
pub use crate::adapters::seasonality::{SeasonalDecomposition, Seasonality};
pub use crate::adapters::surrogates::{
    ArPreparation, SurrogateGenerator, add_seasonality, center, remove_seasonality,
};
pub use crate::algorithms::autoregressive::{ArModel, InformationCriterion};
pub use crate::algorithms::binning::BoundaryPolicy;
pub use crate::algorithms::coherence::CoherenceMeasure;
pub use crate::engine::executor::{GridExecutor, PairTask, PointResult, PointTask, Sequential};
pub use crate::engine::output::{BinTable, EnsembleTable, ResultRecord, SurrogateKind};
pub use crate::primitives::errors::PhaseLockError;
pub use crate::primitives::field::{Field, GridPoint};

// ============================================================================
// Surrogate Builder
// ============================================================================

/// Fluent builder for surrogate generation.
#[derive(Debug, Clone, Default)]
pub struct SurrogateBuilder {
    /// RNG seed for reproducible realizations.
    pub seed: Option<u64>,

    /// Coarsest cascade scale that is shuffled (default: 2).
    pub randomise_from_scale: Option<usize>,

    /// AR order search range (default: (1, 1)).
    pub order_range: Option<(usize, usize)>,

    /// AR order selection criterion (default: Sbc).
    pub criterion: Option<InformationCriterion>,

    /// Discarded AR simulation steps (default: 100).
    pub burn_in: Option<usize>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl SurrogateBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the generator's RNG.
    pub fn seed(mut self, seed: u64) -> Self {
        if self.seed.is_some() {
            self.duplicate_param = Some("seed");
        }
        self.seed = Some(seed);
        self
    }

    /// Set the coarsest cascade scale that is shuffled.
    pub fn randomise_from_scale(mut self, scale: usize) -> Self {
        if self.randomise_from_scale.is_some() {
            self.duplicate_param = Some("randomise_from_scale");
        }
        self.randomise_from_scale = Some(scale);
        self
    }

    /// Set the AR order search range `[min, max]`.
    pub fn order_range(mut self, min: usize, max: usize) -> Self {
        if self.order_range.is_some() {
            self.duplicate_param = Some("order_range");
        }
        self.order_range = Some((min, max));
        self
    }

    /// Set the AR order selection criterion.
    pub fn criterion(mut self, criterion: InformationCriterion) -> Self {
        if self.criterion.is_some() {
            self.duplicate_param = Some("criterion");
        }
        self.criterion = Some(criterion);
        self
    }

    /// Set the number of discarded AR simulation steps.
    pub fn burn_in(mut self, steps: usize) -> Self {
        if self.burn_in.is_some() {
            self.duplicate_param = Some("burn_in");
        }
        self.burn_in = Some(steps);
        self
    }

    /// Validate the configuration and create an unbound generator.
    pub fn build<'a>(self) -> Result<SurrogateGenerator<'a>, PhaseLockError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let defaults = SurrogateConfig::default();
        let scale = self
            .randomise_from_scale
            .unwrap_or(defaults.randomise_from_scale);
        Validator::validate_scale(scale)?;

        let (min_order, max_order) = self
            .order_range
            .unwrap_or((defaults.min_order, defaults.max_order));
        Validator::validate_order_range(min_order, max_order)?;

        Ok(SurrogateGenerator::new(SurrogateConfig {
            seed: self.seed,
            randomise_from_scale: scale,
            min_order,
            max_order,
            criterion: self.criterion.unwrap_or(defaults.criterion),
            burn_in: self.burn_in.unwrap_or(defaults.burn_in),
        }))
    }
}

// ============================================================================
// Analysis Builder
// ============================================================================

/// Fluent builder for the phase analysis pipeline.
#[derive(Debug, Clone, Default)]
pub struct AnalysisBuilder {
    /// Target oscillation period, in units of `dt` (required).
    pub period: Option<f64>,

    /// Sampling interval (default: 1).
    pub dt: Option<f64>,

    /// Morlet wavenumber (default: 6).
    pub k0: Option<f64>,

    /// Zero-pad before transforming (default: false).
    pub pad: Option<bool>,

    /// Number of phase sectors (default: 8).
    pub bins: Option<usize>,

    /// Sector edge membership (default: BothInclusive).
    pub boundary_policy: Option<BoundaryPolicy>,

    /// Samples discarded at each end (default: 0).
    pub guard_band: Option<usize>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl AnalysisBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the oscillation period.
    pub fn period(mut self, period: f64) -> Self {
        if self.period.is_some() {
            self.duplicate_param = Some("period");
        }
        self.period = Some(period);
        self
    }

    /// Set the sampling interval.
    pub fn dt(mut self, dt: f64) -> Self {
        if self.dt.is_some() {
            self.duplicate_param = Some("dt");
        }
        self.dt = Some(dt);
        self
    }

    /// Set the Morlet wavenumber.
    pub fn k0(mut self, k0: f64) -> Self {
        if self.k0.is_some() {
            self.duplicate_param = Some("k0");
        }
        self.k0 = Some(k0);
        self
    }

    /// Zero-pad series to a power of two before transforming.
    pub fn pad(mut self, pad: bool) -> Self {
        if self.pad.is_some() {
            self.duplicate_param = Some("pad");
        }
        self.pad = Some(pad);
        self
    }

    /// Set the number of phase sectors.
    pub fn bins(mut self, bins: usize) -> Self {
        if self.bins.is_some() {
            self.duplicate_param = Some("bins");
        }
        self.bins = Some(bins);
        self
    }

    /// Set the sector edge membership rule.
    pub fn boundary_policy(mut self, policy: BoundaryPolicy) -> Self {
        if self.boundary_policy.is_some() {
            self.duplicate_param = Some("boundary_policy");
        }
        self.boundary_policy = Some(policy);
        self
    }

    /// Set the number of samples discarded at each end.
    pub fn guard_band(mut self, samples: usize) -> Self {
        if self.guard_band.is_some() {
            self.duplicate_param = Some("guard_band");
        }
        self.guard_band = Some(samples);
        self
    }

    /// Validate the configuration and create the pipeline.
    pub fn build(self) -> Result<PhaseAnalysis, PhaseLockError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let period = self.period.unwrap_or(f64::NAN);
        Validator::validate_period(period)?;

        let dt = self.dt.unwrap_or(1.0);
        Validator::validate_dt(dt)?;

        let k0 = self.k0.unwrap_or(DEFAULT_K0);
        Validator::validate_wavenumber(k0)?;

        let mut config = AnalysisConfig::new(period);
        if let Some(bins) = self.bins {
            Validator::validate_bins(bins)?;
            config.bins = bins;
        }
        config.wavelet = WaveletConfig {
            period,
            dt,
            k0,
            pad: self.pad.unwrap_or(false),
        };
        config.boundary_policy = self.boundary_policy.unwrap_or_default();
        config.guard_band = self.guard_band.unwrap_or(0);

        Ok(PhaseAnalysis::new(config))
    }
}

//! # phaselock: surrogate ensembles and phase-conditioned statistics
//!
//! Tools for testing whether phase-locked patterns in gridded climate fields
//! are statistically significant: extract the instantaneous phase of a
//! narrow-band oscillation with a Morlet wavelet, bucket the field's values
//! into phase sectors, and repeat the same pipeline on large ensembles of
//! surrogate realizations that preserve chosen properties of the data.
//!
//! ## Surrogate families
//!
//! | Family           | Preserves                                   |
//! |------------------|---------------------------------------------|
//! | `Fourier`        | Power spectra and cross-point covariance    |
//! | `FourierSpatial` | Power spectra of each point                 |
//! | `Multifractal`   | Hierarchical coarse-to-fine cascade         |
//! | `Autoregressive` | Fitted AR(p) dynamics and residual marginal |
//!
//! ## Quick Start
//!
//! ```rust
//! use phaselock::prelude::*;
//!
//! let n = 256;
//! let series: Vec<f64> = (0..n)
//!     .map(|t| (2.0 * std::f64::consts::PI * t as f64 / 32.0).sin())
//!     .collect();
//! let field = Field::from_station(series)?;
//!
//! // Phase-conditioned means at a 32-sample period
//! let analysis = Analysis::new().period(32.0).guard_band(32).build()?;
//! let table = analysis.analyse(&field, &Sequential)?;
//! assert_eq!(table.bins(), 8);
//!
//! // One Fourier surrogate of the same field
//! let mut surrogates = Surrogates::new().seed(42).build()?;
//! surrogates.bind(&field);
//! let realization = surrogates.generate(Fourier, &Sequential)?;
//! assert_eq!(realization.time_len(), n);
//! # Result::<(), PhaseLockError>::Ok(())
//! ```
//!
//! ## Execution
//!
//! Every grid operation takes a [`GridExecutor`](prelude::GridExecutor).
//! This crate ships the in-process `Sequential` executor; the `fastPhaselock`
//! crate provides a thread pool and a queue strategy with identical results.
//!
//! ## Logging
//!
//! The crate emits records through the `log` facade (zero-coefficient
//! clamps, failed AR fits, ensemble progress). Installing a logger is up to
//! the application.

// Layer 1: Primitives - data structures and basic utilities.
mod primitives;

// Layer 2: Math - pure mathematical functions.
mod math;

// Layer 3: Algorithms - per-series surrogate and phase algorithms.
mod algorithms;

// Layer 4: Engine - execution, validation and result tables.
mod engine;

// Layer 5: Adapters - whole-field generators and pipelines.
mod adapters;

// High-level fluent API.
mod api;

// Standard phaselock prelude.
pub mod prelude {
    pub use crate::api::{
        AnalysisBuilder as Analysis, ArModel, ArPreparation, BinTable,
        BoundaryPolicy::BothInclusive,
        BoundaryPolicy::LeftInclusive,
        CoherenceMeasure, EnsembleTable, Field, GridExecutor, GridPoint,
        InformationCriterion::Fpe,
        InformationCriterion::Sbc,
        PhaseAnalysis, PhaseField, PhaseLockError, ResultRecord, SeasonalDecomposition,
        Seasonality, Sequential, SurrogateBuilder as Surrogates, SurrogateGenerator,
        SurrogateKind,
        SurrogateKind::Autoregressive,
        SurrogateKind::Fourier,
        SurrogateKind::FourierSpatial,
        SurrogateKind::Multifractal,
        add_seasonality, adjacency_matrix, center, remove_seasonality,
    };
}

// Internal modules for development, testing and the parallel extension.
//
// This module re-exports internal modules so that `fastPhaselock` and the
// integration tests can reach the building blocks directly.
#[doc(hidden)]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod adapters {
        pub use crate::adapters::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}

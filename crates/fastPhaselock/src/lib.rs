//! # fastPhaselock: parallel grid execution for phaselock
//!
//! Multi-threaded executors for the `phaselock` surrogate and phase-statistics
//! pipeline. Per-point work (phase extraction, sector statistics, surrogate
//! generation) runs on a `rayon` pool built once; pairwise adjacency runs on
//! a bounded `crossbeam-channel` queue with sentinel shutdown, per-task error
//! reporting and an optional result timeout.
//!
//! Results are identical to sequential evaluation: all randomness is drawn
//! before fan-out.
//!
//! ## Quick Start
//!
//! ```rust
//! use fastPhaselock::prelude::*;
//! use ndarray::Array3;
//!
//! let data = Array3::from_shape_fn((128, 2, 3), |(t, i, j)| {
//!     (t as f64 * 0.2 + i as f64 + j as f64).sin()
//! });
//! let field = data.to_field(&[10.0, 20.0], &[0.0, 5.0, 10.0])?;
//!
//! let pool = WorkerPool::new(2)?;
//! let analysis = Analysis::new().period(32.0).guard_band(16).build()?;
//! let mut surrogates = Surrogates::new().seed(7).build()?;
//! surrogates.bind(&field);
//!
//! let ensemble = analysis.surrogate_ensemble(&mut surrogates, &[Fourier], 3, None, &pool)?;
//! assert_eq!(ensemble.realizations(), 3);
//! # Result::<(), PhaseLockError>::Ok(())
//! ```

#![allow(non_snake_case)]

// Layer 4: Engine - parallel executors.
mod engine;

// High-level API re-exports.
mod api;

// Input data handling.
mod input;

// Standard fastPhaselock prelude.
pub mod prelude {
    pub use crate::api::{
        Analysis, ArModel, ArPreparation, BinTable,
        BoundaryPolicy::{BothInclusive, LeftInclusive},
        CoherenceMeasure, EnsembleTable, Field, FieldInput, GridExecutor, GridPoint,
        InformationCriterion::{Fpe, Sbc},
        PairTask, PhaseAnalysis, PhaseField, PhaseLockError, PointResult, PointTask, ResultRecord,
        SeasonalDecomposition, Seasonality, Sequential, SurrogateGenerator, SurrogateKind,
        SurrogateKind::{Autoregressive, Fourier, FourierSpatial, Multifractal},
        Surrogates, WorkerPool, add_seasonality, adjacency_matrix, center, remove_seasonality,
    };
}

// Internal modules for development and testing.
#[doc(hidden)]
pub mod internals {
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod input {
        pub use crate::input::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}

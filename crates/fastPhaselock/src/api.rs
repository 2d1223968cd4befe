//! High-level API for parallel surrogate ensembles and phase analysis.
//!
//! ## Purpose
//!
//! This module re-exports the `phaselock` builders and result types together
//! with the parallel `WorkerPool`, so applications depend on one crate.
//!
//! ### Configuration Flow
//!
//! 1. Build a `WorkerPool` once: `WorkerPool::new(8)?`.
//! 2. Build a generator and/or analysis via `Surrogates::new()` / `Analysis::new()`.
//! 3. Pass `&pool` to every grid operation.

// Publicly re-exported types
pub use crate::engine::executor::WorkerPool;
pub use crate::input::FieldInput;
pub use phaselock::prelude::{
    Analysis, ArModel, ArPreparation, BinTable, CoherenceMeasure, EnsembleTable, Field,
    GridExecutor, GridPoint, PhaseAnalysis, PhaseField, PhaseLockError, ResultRecord,
    SeasonalDecomposition, Seasonality, Sequential, SurrogateGenerator, SurrogateKind,
    Surrogates, add_seasonality, adjacency_matrix, center, remove_seasonality,
};
pub use phaselock::internals::algorithms::autoregressive::InformationCriterion;
pub use phaselock::internals::algorithms::binning::BoundaryPolicy;
pub use phaselock::internals::engine::executor::{PairTask, PointResult, PointTask};

//! Grid execution: fan per-point and per-pair tasks out and collect results.
//!
//! ## Purpose
//!
//! This module defines the `GridExecutor` trait through which every grid
//! computation in the crate runs (phase extraction, conditional statistics,
//! surrogate generation, adjacency), and the sequential in-process executor.
//! Parallel executors implementing the same trait live in `fastPhaselock`.
//!
//! ## Design notes
//!
//! * **Owned tasks**: Each task owns its argument (a copied series slice and
//!   every parameter it needs) and returns an owned result tagged with its
//!   coordinate. Executors never share mutable state with tasks.
//! * **Order-insensitive**: Results may come back in any order; callers
//!   reassemble them by coordinate.
//! * **Deterministic**: Randomness is drawn by the caller before fan-out, so
//!   every executor produces the same assembled output.
//!
//! ## Key concepts
//!
//! * **Bulk**: `map_points` takes the full task list in one call.
//! * **Queue**: `map_pairs` consumes a lazily produced task stream of known
//!   length, for combinatorial task counts.
//!
//! ## Invariants
//!
//! * Exactly one result is returned per task.
//!
//! ## Non-goals
//!
//! * This module does not build thread pools.
//! * This module does not assemble results into arrays (see `output`).

// Internal dependencies
use crate::primitives::errors::PhaseLockError;
use crate::primitives::field::GridPoint;

// ============================================================================
// Tasks and Results
// ============================================================================

/// One per-point unit of work.
#[derive(Debug, Clone, PartialEq)]
pub struct PointTask<A> {
    /// Coordinate the result belongs to.
    pub point: GridPoint,

    /// Owned task argument.
    pub args: A,
}

impl<A> PointTask<A> {
    /// Create a task for `point`.
    pub fn new(point: GridPoint, args: A) -> Self {
        Self { point, args }
    }
}

/// Result of one per-point task.
#[derive(Debug, Clone, PartialEq)]
pub struct PointResult<R> {
    /// Coordinate of the originating task.
    pub point: GridPoint,

    /// Task output.
    pub value: R,
}

/// One per-pair unit of work over flattened point indices.
#[derive(Debug, Clone, PartialEq)]
pub struct PairTask<A> {
    /// First flattened index.
    pub i: usize,

    /// Second flattened index.
    pub j: usize,

    /// Owned task argument.
    pub args: A,
}

// ============================================================================
// Executor Trait
// ============================================================================

/// Strategy for evaluating independent grid tasks.
pub trait GridExecutor: Sync {
    /// Number of workers; 0 means in-process sequential evaluation.
    fn workers(&self) -> usize;

    /// Evaluate `f` on every task (bulk strategy).
    fn map_points<A, R, F>(
        &self,
        tasks: Vec<PointTask<A>>,
        f: F,
    ) -> Result<Vec<PointResult<R>>, PhaseLockError>
    where
        A: Send,
        R: Send,
        F: Fn(A) -> R + Send + Sync;

    /// Evaluate `f` on a stream of `expected` pair tasks (queue strategy).
    ///
    /// Tasks and `f` are owned so implementations may hand them to detached
    /// threads.
    fn map_pairs<A, R, I, F>(
        &self,
        tasks: I,
        expected: usize,
        f: F,
    ) -> Result<Vec<(usize, usize, R)>, PhaseLockError>
    where
        I: Iterator<Item = PairTask<A>> + Send + 'static,
        A: Send + 'static,
        R: Send + 'static,
        F: Fn(A) -> R + Send + Sync + 'static;
}

// ============================================================================
// Sequential Executor
// ============================================================================

/// In-process executor evaluating tasks one after another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sequential;

impl GridExecutor for Sequential {
    fn workers(&self) -> usize {
        0
    }

    fn map_points<A, R, F>(
        &self,
        tasks: Vec<PointTask<A>>,
        f: F,
    ) -> Result<Vec<PointResult<R>>, PhaseLockError>
    where
        A: Send,
        R: Send,
        F: Fn(A) -> R + Send + Sync,
    {
        Ok(tasks
            .into_iter()
            .map(|task| PointResult {
                point: task.point,
                value: f(task.args),
            })
            .collect())
    }

    fn map_pairs<A, R, I, F>(
        &self,
        tasks: I,
        expected: usize,
        f: F,
    ) -> Result<Vec<(usize, usize, R)>, PhaseLockError>
    where
        I: Iterator<Item = PairTask<A>> + Send + 'static,
        A: Send + 'static,
        R: Send + 'static,
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        let results: Vec<(usize, usize, R)> =
            tasks.map(|task| (task.i, task.j, f(task.args))).collect();

        if results.len() != expected {
            return Err(PhaseLockError::WorkerFailure(format!(
                "task stream produced {} of {expected} pairs",
                results.len()
            )));
        }
        Ok(results)
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Collapse per-task fallible results, returning the first error.
pub fn collect_results<R>(
    results: Vec<PointResult<Result<R, PhaseLockError>>>,
) -> Result<Vec<PointResult<R>>, PhaseLockError> {
    results
        .into_iter()
        .map(|r| {
            r.value.map(|value| PointResult {
                point: r.point,
                value,
            })
        })
        .collect()
}

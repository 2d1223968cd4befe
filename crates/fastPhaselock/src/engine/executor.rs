//! Multi-threaded grid executor.
//!
//! ## Purpose
//!
//! This module provides `WorkerPool`, a `GridExecutor` that evaluates
//! per-point tasks on a `rayon` thread pool (bulk strategy) and per-pair
//! task streams on detached worker threads fed through a bounded channel
//! (queue strategy).
//!
//! ## Design notes
//!
//! * **Built once**: The rayon pool is created at construction and reused by
//!   every call, so outer loops over many realizations do not pay for thread
//!   start-up.
//! * **Drop-in**: Implements the core crate's executor trait; any operation
//!   taking `&impl GridExecutor` runs in parallel unchanged.
//! * **Sequential fallback**: Zero workers evaluates in the calling thread
//!   with the same semantics.
//! * **Panics**: A panicking task is reported as `WorkerFailure`, with or
//!   without worker threads.
//!
//! ## Invariants
//!
//! * One result per task; results carry their coordinates.
//!
//! ## Non-goals
//!
//! * This module does not draw random numbers; tasks arrive fully seeded.
//! * This module does not reorder results.

// Feature-gated imports
#[cfg(feature = "cpu")]
use rayon::prelude::*;
#[cfg(feature = "cpu")]
use std::sync::Arc;

// External dependencies
use log::error;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

// Export dependencies from phaselock crate
use phaselock::internals::engine::executor::{GridExecutor, PairTask, PointResult, PointTask};
use phaselock::internals::primitives::errors::PhaseLockError;

// Internal dependencies
use crate::engine::queue::run_queue;

// ============================================================================
// Worker Pool
// ============================================================================

/// Fixed-size pool of worker threads.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    workers: usize,
    timeout: Option<Duration>,
    #[cfg(feature = "cpu")]
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl WorkerPool {
    /// Create a pool with `workers` threads; 0 evaluates sequentially.
    pub fn new(workers: usize) -> Result<Self, PhaseLockError> {
        #[cfg(feature = "cpu")]
        let pool = if workers > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("phaselock-worker-{i}"))
                .build()
                .map_err(|e| PhaseLockError::WorkerFailure(e.to_string()))?;
            Some(Arc::new(pool))
        } else {
            None
        };

        Ok(Self {
            workers,
            timeout: None,
            #[cfg(feature = "cpu")]
            pool,
        })
    }

    /// Pool evaluating everything in the calling thread.
    pub fn sequential() -> Self {
        Self {
            workers: 0,
            timeout: None,
            #[cfg(feature = "cpu")]
            pool: None,
        }
    }

    /// Pool sized to the number of available CPUs.
    pub fn available() -> Result<Self, PhaseLockError> {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self::new(workers)
    }

    /// Maximum wait for each queue-strategy result.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Configured queue-strategy timeout.
    pub fn result_timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Evaluate one point, turning a panic into `WorkerFailure`.
fn evaluate_point<A, R, F>(task: PointTask<A>, f: &F) -> Result<PointResult<R>, PhaseLockError>
where
    F: Fn(A) -> R,
{
    let PointTask { point, args } = task;
    catch_unwind(AssertUnwindSafe(|| f(args)))
        .map(|value| PointResult { point, value })
        .map_err(|_| {
            error!("bulk task at {point:?} panicked");
            PhaseLockError::WorkerFailure(format!("task at {point:?} panicked"))
        })
}

impl GridExecutor for WorkerPool {
    fn workers(&self) -> usize {
        self.workers
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
        #[cfg(feature = "cpu")]
        if let Some(pool) = &self.pool {
            return pool.install(|| {
                tasks
                    .into_par_iter()
                    .map(|task| evaluate_point(task, &f))
                    .collect()
            });
        }

        tasks
            .into_iter()
            .map(|task| evaluate_point(task, &f))
            .collect()
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
        run_queue(tasks, expected, f, self.workers, self.timeout)
    }
}

//! Layer 4: Engine
//!
//! This layer provides the parallel grid executors. The bulk strategy runs
//! per-point tasks on a rayon pool; the queue strategy streams pair tasks
//! through a bounded channel to detached worker threads.

// Worker pool implementing the core executor trait
pub mod executor;

// Bounded-queue strategy with sentinel shutdown
pub mod queue;

//! Error types for surrogate generation and phase statistics.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while binding
//! fields, generating surrogate realizations, extracting oscillatory phases,
//! computing phase-conditioned statistics, and fanning work out to a grid
//! executor.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include relevant values (e.g., actual vs. expected lengths).
//! * **Deferred**: Builder errors are recorded while configuring and surfaced by `build()`.
//! * **Fail-fast**: Precondition violations are errors; missing data is not.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error`.
//!
//! ## Key concepts
//!
//! 1. **Binding**: Generation before a source field or fitted model exists.
//! 2. **Shape**: Series lengths or grid shapes that do not line up.
//! 3. **Parameter validation**: Invalid period, bin count, order range, or scale.
//! 4. **Execution**: Worker failures and timeouts from the queue strategy.
//!
//! ## Invariants
//!
//! * All variants provide sufficient context for diagnosis.
//! * Error messages are consistent in tone and formatting.
//!
//! ## Non-goals
//!
//! * All-missing grid points are never reported here; they propagate as NaN.
//! * This module does not perform the validation logic itself.

// External dependencies
use std::error::Error;
use std::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for phaselock operations.
#[derive(Debug, Clone, PartialEq)]
pub enum PhaseLockError {
    /// Input arrays are empty.
    EmptyInput,

    /// Generic invalid input error with a descriptive message.
    InvalidInput(String),

    /// Generation or transform was invoked before its input was supplied.
    UnboundInput {
        /// What was missing (e.g., "source field", "surrogate data").
        what: &'static str,
    },

    /// A series' sample count does not match the field's time dimension.
    ShapeMismatch {
        /// Expected number of samples.
        expected: usize,
        /// Number of samples provided.
        got: usize,
    },

    /// Two fields do not share the same spatial grid.
    GridMismatch {
        /// Expected (level, lat, lon) shape.
        expected: [usize; 3],
        /// Provided (level, lat, lon) shape.
        got: [usize; 3],
    },

    /// The multifractal surrogate needs a series length of exactly 2^n.
    NonPowerOfTwoLength(usize),

    /// Residual-resampling generation was requested before model preparation.
    UnpreparedModel,

    /// Oscillation period must be positive and finite.
    InvalidPeriod(f64),

    /// Sampling interval must be positive and finite.
    InvalidSamplingInterval(f64),

    /// Morlet wavenumber must be positive and finite.
    InvalidWavenumber(f64),

    /// Number of phase sectors must be at least 1.
    InvalidBinCount(usize),

    /// Autoregressive order range must satisfy `min <= max`.
    InvalidOrderRange {
        /// Lower bound of the order search.
        min: usize,
        /// Upper bound of the order search.
        max: usize,
    },

    /// Cascade shuffling must start at dyadic scale index 2 or finer.
    InvalidScale(usize),

    /// Index or coordinate outside of the field.
    OutOfBounds {
        /// Name of the axis.
        axis: &'static str,
        /// Index requested.
        index: usize,
        /// Axis length.
        len: usize,
    },

    /// A task failed inside a worker.
    WorkerFailure(String),

    /// The coordinator stopped waiting for worker results.
    Timeout {
        /// Results collected before the deadline.
        completed: usize,
        /// Results expected in total.
        expected: usize,
    },

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for PhaseLockError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyInput => write!(f, "Input arrays are empty"),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            Self::UnboundInput { what } => {
                write!(f, "No {what} bound; supply it before generating")
            }
            Self::ShapeMismatch { expected, got } => {
                write!(f, "Length mismatch: expected {expected} samples, got {got}")
            }
            Self::GridMismatch { expected, got } => {
                write!(f, "Grid mismatch: expected {expected:?}, got {got:?}")
            }
            Self::NonPowerOfTwoLength(len) => {
                write!(f, "Series length {len} is not a power of two (2^n)")
            }
            Self::UnpreparedModel => {
                write!(f, "Autoregressive model not prepared; run preparation first")
            }
            Self::InvalidPeriod(period) => {
                write!(f, "Invalid period: {period} (must be > 0 and finite)")
            }
            Self::InvalidSamplingInterval(dt) => {
                write!(f, "Invalid sampling interval: {dt} (must be > 0 and finite)")
            }
            Self::InvalidWavenumber(k0) => {
                write!(f, "Invalid wavenumber: {k0} (must be > 0 and finite)")
            }
            Self::InvalidBinCount(bins) => {
                write!(f, "Invalid bin count: {bins} (must be at least 1)")
            }
            Self::InvalidOrderRange { min, max } => {
                write!(f, "Invalid order range: [{min}, {max}] (min must be <= max)")
            }
            Self::InvalidScale(scale) => {
                write!(f, "Invalid randomise_from_scale: {scale} (must be >= 2)")
            }
            Self::OutOfBounds { axis, index, len } => {
                write!(f, "Index {index} out of bounds for {axis} axis of length {len}")
            }
            Self::WorkerFailure(msg) => write!(f, "Worker task failed: {msg}"),
            Self::Timeout {
                completed,
                expected,
            } => {
                write!(
                    f,
                    "Timed out waiting for results: {completed} of {expected} collected"
                )
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

impl Error for PhaseLockError {}

//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer implements the per-series algorithms:
//! - Fourier, multifractal and autoregressive surrogates
//! - Amplitude adjustment by rank matching
//! - Wavelet phase extraction and phase utilities
//! - Phase-conditioned sector statistics
//! - Pairwise coherence measures
//!
//! Every function here works on a single series (or a pair) and knows
//! nothing about grids or execution.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Adapters
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Amplitude adjustment.
pub mod amplitude;

/// AR model selection, fitting and simulation.
pub mod autoregressive;

/// Conditional sector statistics.
pub mod binning;

/// Pairwise coherence measures.
pub mod coherence;

/// Fourier phase randomization.
pub mod fourier;

/// Multifractal cascade surrogates.
pub mod multifractal;

/// Phase unwrapping and fluctuations.
pub mod phase;

/// Wavelet phase and amplitude.
pub mod wavelet;

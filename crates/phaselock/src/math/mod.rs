//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions used throughout the crate:
//! - Real and complex discrete Fourier transforms
//! - The Haar dyadic wavelet transform
//! - The Morlet wavelet in the Fourier domain
//! - Moment statistics with NaN handling
//!
//! These are reusable mathematical building blocks with no algorithm-specific logic.
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
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Fourier transforms (rustfft wrappers).
pub mod fft;

/// Haar multilevel decomposition and reconstruction.
pub mod haar;

/// Morlet wavelet and single-scale transform.
pub mod morlet;

/// Mean, variance, covariance and correlation.
pub mod stats;

//! Fourier phase-randomized surrogates.
//!
//! ## Purpose
//!
//! This module provides the temporal Fourier surrogate: each series is
//! transformed with the real-input DFT, every frequency bin is rotated by a
//! random angle, and the result is transformed back.
//!
//! ## Design notes
//!
//! * **Angles are inputs**: Callers draw angle vectors up front, so one
//!   vector can be shared by every grid point (spatially coherent surrogate)
//!   or drawn per point (spatially independent surrogate) and so the result
//!   does not depend on evaluation order.
//! * **Exact spectrum**: The zero-frequency angle is forced to 0, preserving
//!   the mean. For even lengths the Nyquist angle is forced to 0 as well,
//!   since that bin must stay real.
//!
//! ## Invariants
//!
//! * Output length equals input length.
//! * `|X'(f)| = |X(f)|` for every bin.
//!
//! ## Non-goals
//!
//! * This module does not iterate amplitude adjustment (IAAFT).

// External dependencies
use core::f64::consts::PI;
use rand::Rng;

// Internal dependencies
use crate::math::fft::{C64, irfft, rfft};
use crate::math::stats::all_nan;

/// Number of real-input DFT bins for a series of length `n`.
#[inline]
pub fn num_bins(n: usize) -> usize {
    n / 2 + 1
}

/// Draw a random angle vector for series of length `n`.
///
/// Angles are uniform on `[0, 2π)`; the DC angle (and Nyquist angle for
/// even `n`) is 0.
pub fn random_angles<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<f64> {
    let bins = num_bins(n);
    let mut angles: Vec<f64> = (0..bins).map(|_| rng.gen_range(0.0..2.0 * PI)).collect();
    angles[0] = 0.0;
    if n % 2 == 0 && n > 0 {
        angles[bins - 1] = 0.0;
    }
    angles
}

/// Rotate the spectrum of `series` by `angles` and transform back.
///
/// An all-missing series yields an all-missing output.
pub fn rotate_phases(series: &[f64], angles: &[f64]) -> Vec<f64> {
    let n = series.len();
    if all_nan(series) {
        return vec![f64::NAN; n];
    }

    let spectrum: Vec<C64> = rfft(series)
        .into_iter()
        .zip(angles)
        .map(|(x, &theta)| x * C64::from_polar(1.0, theta))
        .collect();

    irfft(&spectrum, n)
}

/// Fourier surrogate of a single series with freshly drawn angles.
pub fn fourier_surrogate<R: Rng + ?Sized>(series: &[f64], rng: &mut R) -> Vec<f64> {
    let angles = random_angles(series.len(), rng);
    rotate_phases(series, &angles)
}

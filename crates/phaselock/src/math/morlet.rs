//! Morlet mother wavelet evaluated in the Fourier domain.
//!
//! ## Purpose
//!
//! This module provides the Morlet daughter wavelet and the single-scale
//! continuous wavelet transform computed by spectral multiplication.
//!
//! ## Design notes
//!
//! * **Fourier domain**: The transform is `ifft(fft(x) · ψ̂(s·k))`.
//! * **Analytic**: The daughter is zero for non-positive frequencies, so the
//!   coefficients are complex with a well-defined phase.
//! * **Padding**: Optional zero padding to `2^(floor(log2 n + 0.4999) + 1)`
//!   reduces wrap-around at the edges.
//!
//! ## Key concepts
//!
//! * **Angular frequencies**: `k_j = 2πj/(N·dt)` for `j <= N/2`, otherwise
//!   `-2π(N-j)/(N·dt)`.
//! * **Daughter**: `sqrt(s·k_1·N) · π^(-1/4) · exp(-(s·k - k0)²/2)` for `k > 0`.
//! * **Fourier factor**: `4π / (k0 + sqrt(2 + k0²))`, converting scale to period.
//!
//! ## Invariants
//!
//! * The output has exactly the input length.
//!
//! ## Non-goals
//!
//! * This module does not compute multi-scale scalograms or cones of influence.
//! * This module does not handle missing data.

// External dependencies
use core::f64::consts::PI;

// Internal dependencies
use crate::math::fft::{C64, fft, ifft};

/// Default Morlet wavenumber.
pub const DEFAULT_K0: f64 = 6.0;

// ============================================================================
// Morlet Wavelet
// ============================================================================

/// Morlet mother wavelet with nondimensional wavenumber `k0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Morlet {
    /// Nondimensional wavenumber.
    pub k0: f64,
}

impl Default for Morlet {
    fn default() -> Self {
        Self { k0: DEFAULT_K0 }
    }
}

impl Morlet {
    /// Create a Morlet wavelet with the given wavenumber.
    pub fn new(k0: f64) -> Self {
        Self { k0 }
    }

    /// Ratio of Fourier period to wavelet scale.
    pub fn fourier_factor(&self) -> f64 {
        4.0 * PI / (self.k0 + (2.0 + self.k0 * self.k0).sqrt())
    }

    /// Wavelet scale whose Fourier period equals `period`.
    pub fn scale_for_period(&self, period: f64) -> f64 {
        period / self.fourier_factor()
    }

    /// Daughter wavelet at scale `scale` over the angular frequencies `k`.
    pub fn daughter(&self, scale: f64, k: &[f64]) -> Vec<f64> {
        let k1 = k.get(1).copied().unwrap_or(0.0);
        let norm = (scale * k1 * k.len() as f64).sqrt() * PI.powf(-0.25);
        k.iter()
            .map(|&kj| {
                if kj > 0.0 {
                    let z = scale * kj - self.k0;
                    norm * (-0.5 * z * z).exp()
                } else {
                    0.0
                }
            })
            .collect()
    }

    /// Single-scale continuous wavelet transform of `series`.
    ///
    /// The series mean is removed before transforming.
    pub fn transform(&self, series: &[f64], dt: f64, scale: f64, pad: bool) -> Vec<C64> {
        let n = series.len();
        if n == 0 {
            return Vec::new();
        }

        let mean = series.iter().sum::<f64>() / n as f64;
        let mut x: Vec<C64> = series.iter().map(|&v| C64::new(v - mean, 0.0)).collect();
        if pad {
            x.resize(padded_length(n), C64::new(0.0, 0.0));
        }

        let k = angular_frequencies(x.len(), dt);
        let daughter = self.daughter(scale, &k);

        let spectrum: Vec<C64> = fft(&x)
            .into_iter()
            .zip(&daughter)
            .map(|(f, &d)| f * d)
            .collect();

        let mut wave = ifft(&spectrum);
        wave.truncate(n);
        wave
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Length after zero padding: `2^(floor(log2 n + 0.4999) + 1)`.
pub fn padded_length(n: usize) -> usize {
    let exponent = ((n as f64).log2() + 0.4999).floor() as u32 + 1;
    1usize << exponent
}

/// Angular frequencies of an `n`-point DFT with sampling interval `dt`.
pub fn angular_frequencies(n: usize, dt: f64) -> Vec<f64> {
    let base = 2.0 * PI / (n as f64 * dt);
    (0..n)
        .map(|j| {
            if j <= n / 2 {
                base * j as f64
            } else {
                -base * (n - j) as f64
            }
        })
        .collect()
}

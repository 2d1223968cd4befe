//! Discrete Fourier transforms for real-valued series.
//!
//! Thin wrappers over `rustfft` giving the real-input forward transform
//! (bins `0..=n/2`), its Hermitian inverse, and the full complex pair used
//! by the wavelet transform. Inverse transforms are normalized by `1/n`.
//!
//! Plans are cached per thread and per length, so repeated transforms of
//! equal-length series (every grid point of a field) reuse one plan.

// External dependencies
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::cell::RefCell;
use std::sync::Arc;

/// Complex sample type used across the Fourier-domain code.
pub type C64 = Complex<f64>;

thread_local! {
    /// Planner whose internal cache holds one plan per length and direction.
    static PLANNER: RefCell<FftPlanner<f64>> = RefCell::new(FftPlanner::new());
}

/// Cached forward plan for length `n`.
pub fn forward_plan(n: usize) -> Arc<dyn Fft<f64>> {
    PLANNER.with(|planner| planner.borrow_mut().plan_fft_forward(n))
}

/// Cached inverse plan for length `n`.
pub fn inverse_plan(n: usize) -> Arc<dyn Fft<f64>> {
    PLANNER.with(|planner| planner.borrow_mut().plan_fft_inverse(n))
}

/// Forward complex DFT (unnormalized).
pub fn fft(input: &[C64]) -> Vec<C64> {
    let mut buffer = input.to_vec();
    if buffer.is_empty() {
        return buffer;
    }
    forward_plan(buffer.len()).process(&mut buffer);
    buffer
}

/// Inverse complex DFT, normalized by `1/n`.
pub fn ifft(input: &[C64]) -> Vec<C64> {
    let mut buffer = input.to_vec();
    if buffer.is_empty() {
        return buffer;
    }
    let n = buffer.len();
    inverse_plan(n).process(&mut buffer);

    let scale = 1.0 / n as f64;
    for value in buffer.iter_mut() {
        *value *= scale;
    }
    buffer
}

/// Real-input DFT: the `n/2 + 1` non-negative frequency bins.
pub fn rfft(series: &[f64]) -> Vec<C64> {
    let n = series.len();
    let complex: Vec<C64> = series.iter().map(|&x| C64::new(x, 0.0)).collect();
    let mut spectrum = fft(&complex);
    spectrum.truncate(n / 2 + 1);
    spectrum
}

/// Inverse of [`rfft`] for an output of length `n`.
///
/// Negative frequencies are rebuilt as conjugates of the positive ones. The
/// imaginary parts of the DC bin and (for even `n`) the Nyquist bin do not
/// contribute to a real signal and are ignored.
pub fn irfft(spectrum: &[C64], n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }

    let mut full = vec![C64::new(0.0, 0.0); n];
    let half = n / 2;
    for k in 0..=half.min(spectrum.len().saturating_sub(1)) {
        full[k] = spectrum[k];
    }
    full[0].im = 0.0;
    if n % 2 == 0 && half < spectrum.len() {
        full[half].im = 0.0;
    }
    for k in 1..n.div_ceil(2) {
        if k < spectrum.len() {
            full[n - k] = spectrum[k].conj();
        }
    }

    ifft(&full).into_iter().map(|c| c.re).collect()
}

/// Squared magnitudes of the real-input spectrum.
pub fn power_spectrum(series: &[f64]) -> Vec<f64> {
    rfft(series).iter().map(|c| c.norm_sqr()).collect()
}

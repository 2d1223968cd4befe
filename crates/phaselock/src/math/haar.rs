//! Haar (db1) discrete wavelet transform on dyadic lengths.
//!
//! ## Purpose
//!
//! This module provides the multilevel Haar decomposition and reconstruction
//! used by the multifractal cascade surrogate.
//!
//! ## Key concepts
//!
//! * **Step**: `a_k = (x_2k + x_2k+1)/√2`, `d_k = (x_2k - x_2k+1)/√2`.
//! * **Layout**: For a series of length `2^n` decomposed over `n - 1` levels,
//!   the coefficient list is `[approx, detail_coarsest, ..., detail_finest]`
//!   with lengths `[2, 2, 4, ..., 2^(n-1)]`: `n` entries in total.
//!
//! ## Invariants
//!
//! * `waverec(wavedec(x, l)) == x` up to rounding for any valid `l`.
//! * Each detail list has twice the length of the list before it (after the
//!   first two).

// External dependencies
use core::f64::consts::FRAC_1_SQRT_2;

/// Single decomposition step: (approximation, detail).
pub fn dwt(signal: &[f64]) -> (Vec<f64>, Vec<f64>) {
    signal
        .chunks_exact(2)
        .map(|pair| {
            (
                (pair[0] + pair[1]) * FRAC_1_SQRT_2,
                (pair[0] - pair[1]) * FRAC_1_SQRT_2,
            )
        })
        .unzip()
}

/// Single reconstruction step from matching approximation and detail.
pub fn idwt(approx: &[f64], detail: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(approx.len() * 2);
    for (&a, &d) in approx.iter().zip(detail) {
        out.push((a + d) * FRAC_1_SQRT_2);
        out.push((a - d) * FRAC_1_SQRT_2);
    }
    out
}

/// Multilevel decomposition: `[approx, detail_level, ..., detail_1]`.
///
/// The caller guarantees `signal.len()` is divisible by `2^levels`.
pub fn wavedec(signal: &[f64], levels: usize) -> Vec<Vec<f64>> {
    let mut details: Vec<Vec<f64>> = Vec::with_capacity(levels);
    let mut approx = signal.to_vec();
    for _ in 0..levels {
        let (a, d) = dwt(&approx);
        details.push(d);
        approx = a;
    }

    let mut coeffs = Vec::with_capacity(levels + 1);
    coeffs.push(approx);
    coeffs.extend(details.into_iter().rev());
    coeffs
}

/// Inverse of [`wavedec`].
pub fn waverec(coeffs: &[Vec<f64>]) -> Vec<f64> {
    let Some((first, details)) = coeffs.split_first() else {
        return Vec::new();
    };
    details
        .iter()
        .fold(first.clone(), |approx, detail| idwt(&approx, detail))
}

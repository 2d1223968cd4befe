//! Multifractal surrogates from random cascades on the Haar dyadic tree.
//!
//! ## Purpose
//!
//! This module randomizes a series while keeping its hierarchical
//! coarse-to-fine structure: multiplicative ratios between wavelet
//! coefficients and their parents are shuffled within each scale, and the
//! true coefficients are reordered by the rank order of the resulting
//! shadow cascade.
//!
//! ## Key concepts
//!
//! * **Scales**: A `2^n` series has `n` coefficient lists (approximation plus
//!   `n - 1` detail scales), coarse first.
//! * **Ratios**: `m_2k = d_j[2k] / d_(j-1)[k]`, `m_2k+1 = d_j[2k+1] / d_(j-1)[k]`.
//! * **Shadow cascade**: `s_j[2k + i] = m'_2k+i · s_(j-1)[k]` with shuffled `m'`.
//! * **Reordering**: Sorted `d_j` values take the rank order of `s_j`.
//!
//! ## Invariants
//!
//! * Each scale keeps exactly its original multiset of coefficient values.
//! * Scales below `randomise_from_scale` are untouched.
//! * `randomise_from_scale >= n` reproduces the input exactly.
//!
//! ## Non-goals
//!
//! * This module does not pad or truncate series to a power of two.

// External dependencies
use log::warn;
use rand::Rng;
use rand::seq::SliceRandom;

// Internal dependencies
use crate::math::haar::{wavedec, waverec};
use crate::math::stats::all_nan;
use crate::primitives::errors::PhaseLockError;
use crate::primitives::sorting::{argsort, scatter_by_rank, sorted};

/// Default coarse scale index from which shuffling starts.
pub const DEFAULT_RANDOMISE_FROM_SCALE: usize = 2;

/// Check that `len` is an exact power of two.
pub fn check_dyadic_length(len: usize) -> Result<usize, PhaseLockError> {
    if len == 0 {
        return Err(PhaseLockError::EmptyInput);
    }
    if !len.is_power_of_two() {
        return Err(PhaseLockError::NonPowerOfTwoLength(len));
    }
    Ok(len.trailing_zeros() as usize)
}

/// Multifractal surrogate of a single series.
///
/// Fails on lengths that are not `2^n` or on `randomise_from_scale < 2`.
/// An all-missing series yields an all-missing output.
pub fn multifractal_surrogate<R: Rng + ?Sized>(
    series: &[f64],
    randomise_from_scale: usize,
    rng: &mut R,
) -> Result<Vec<f64>, PhaseLockError> {
    let exponent = check_dyadic_length(series.len())?;
    if randomise_from_scale < 2 {
        return Err(PhaseLockError::InvalidScale(randomise_from_scale));
    }
    if all_nan(series) {
        return Ok(vec![f64::NAN; series.len()]);
    }

    let coeffs = wavedec(series, exponent.saturating_sub(1));
    let total = coeffs.len();
    let start = randomise_from_scale.min(total);

    let mut shadow: Vec<Vec<f64>> = coeffs[..start].to_vec();
    let mut shuffled: Vec<Vec<f64>> = coeffs[..start].to_vec();

    for j in start..total {
        let parent = &coeffs[j - 1];
        let child = &coeffs[j];

        // Zero parents divide by 1 instead
        let zeros = parent.iter().filter(|&&p| p == 0.0).count();
        if zeros > 0 {
            warn!("{zeros} zero wavelet coefficients at scale {}; clamped to 1", j - 1);
        }

        let mut ratios: Vec<f64> = child
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let p = parent[i / 2];
                c / if p == 0.0 { 1.0 } else { p }
            })
            .collect();
        ratios.shuffle(rng);

        let shadow_j: Vec<f64> = ratios
            .iter()
            .enumerate()
            .map(|(i, &m)| m * shadow[j - 1][i / 2])
            .collect();

        shuffled.push(scatter_by_rank(&sorted(child), &argsort(&shadow_j)));
        shadow.push(shadow_j);
    }

    Ok(waverec(&shuffled))
}

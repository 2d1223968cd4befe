//! Rank utilities for rank-matching and cascade reordering.
//!
//! ## Purpose
//!
//! This module provides the argsort and scatter helpers used wherever one
//! series must take on the ordering of another: amplitude adjustment and
//! the multifractal cascade both place sorted values at the positions given
//! by the rank order of a second series.
//!
//! ## Design notes
//!
//! * **Stability**: Uses stable sorting so ties keep their original order.
//! * **Robustness**: Non-finite values (NaN) are moved to the end of the sequence.
//! * **Efficiency**: The scatter step is O(n) once the permutation is known.
//!
//! ## Key concepts
//!
//! ### Sort-Scatter Pattern
//! 1. **Sort**: The value series is sorted ascending.
//! 2. **Rank**: The ordering series is argsorted, giving `order[rank] = position`.
//! 3. **Scatter**: The value of rank `r` is written to position `order[r]`.
//!
//! ## Invariants
//!
//! * The index mapping is a valid permutation of `0..n`.
//! * NaN values keep their relative insertion order at the end.
//!
//! ## Non-goals
//!
//! * This module does not validate lengths beyond what the callers guarantee.

// External dependencies
use core::cmp::Ordering;
use num_traits::Float;

// ============================================================================
// Ordering
// ============================================================================

/// Total order with NaN placed after every other value.
#[inline]
fn nan_last<T: Float>(a: T, b: T) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

// ============================================================================
// Sorting Functions
// ============================================================================

/// Indices that would sort `values` ascending: `order[rank] = position`.
#[inline]
pub fn argsort<T: Float>(values: &[T]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();

    // Fast path: already sorted
    if values.windows(2).all(|w| nan_last(w[0], w[1]) != Ordering::Greater) {
        return order;
    }

    order.sort_by(|&a, &b| nan_last(values[a], values[b]));
    order
}

/// Sorted copy of `values`, NaN last.
#[inline]
pub fn sorted<T: Float>(values: &[T]) -> Vec<T> {
    let mut out = values.to_vec();
    out.sort_by(|a, b| nan_last(*a, *b));
    out
}

/// Place `sorted_values[r]` at position `order[r]`.
///
/// With `order = argsort(template)`, the result has the values of
/// `sorted_values` arranged in the rank order of `template`.
#[inline]
pub fn scatter_by_rank<T: Float>(sorted_values: &[T], order: &[usize]) -> Vec<T> {
    let mut result = vec![T::zero(); order.len()];

    for (rank, &position) in order.iter().enumerate() {
        result[position] = sorted_values[rank];
    }

    result
}

/// Rearrange `values` so that their ranks follow the ranks of `template`.
#[inline]
pub fn rank_match<T: Float>(values: &[T], template: &[T]) -> Vec<T> {
    scatter_by_rank(&sorted(values), &argsort(template))
}

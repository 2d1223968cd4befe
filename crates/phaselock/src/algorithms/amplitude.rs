//! Amplitude adjustment of surrogates by rank matching.
//!
//! The adjusted surrogate carries the exact marginal distribution of the
//! source (its sorted values) in the temporal order induced by the
//! surrogate's ranks. The source is trimmed to the surrogate's length first,
//! keeping leading samples, so shorter AR realizations can be adjusted too.

// Internal dependencies
use crate::math::stats::all_nan;
use crate::primitives::errors::PhaseLockError;
use crate::primitives::sorting::rank_match;

/// Rank-match `source` values onto the ordering of `surrogate`.
pub fn amplitude_adjust(source: &[f64], surrogate: &[f64]) -> Result<Vec<f64>, PhaseLockError> {
    let m = surrogate.len();
    if source.len() < m {
        return Err(PhaseLockError::ShapeMismatch {
            expected: m,
            got: source.len(),
        });
    }
    if all_nan(surrogate) || all_nan(&source[..m]) {
        return Ok(vec![f64::NAN; m]);
    }

    Ok(rank_match(&source[..m], surrogate))
}

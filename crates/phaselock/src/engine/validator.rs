//! Validation of configuration parameters and input shapes.
//!
//! ## Purpose
//!
//! This module checks the parameters collected by the builders and the
//! shapes of fields passed between pipeline stages.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Side-effect free**: Validators only inspect their arguments.
//!
//! ## Invariants
//!
//! * All validated inputs satisfy their respective mathematical constraints.
//!
//! ## Non-goals
//!
//! * This module does not reject missing data; NaN propagates through the
//!   computations instead.
//! * This module does not provide automatic correction of invalid inputs.

// Internal dependencies
use crate::primitives::errors::PhaseLockError;
use crate::primitives::field::Field;

/// Validation utility for configuration and input shapes.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the oscillation period.
    pub fn validate_period(period: f64) -> Result<(), PhaseLockError> {
        if !period.is_finite() || period <= 0.0 {
            return Err(PhaseLockError::InvalidPeriod(period));
        }
        Ok(())
    }

    /// Validate the sampling interval.
    pub fn validate_dt(dt: f64) -> Result<(), PhaseLockError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(PhaseLockError::InvalidSamplingInterval(dt));
        }
        Ok(())
    }

    /// Validate the Morlet wavenumber.
    pub fn validate_wavenumber(k0: f64) -> Result<(), PhaseLockError> {
        if !k0.is_finite() || k0 <= 0.0 {
            return Err(PhaseLockError::InvalidWavenumber(k0));
        }
        Ok(())
    }

    /// Validate the number of phase sectors.
    pub fn validate_bins(bins: usize) -> Result<(), PhaseLockError> {
        if bins == 0 {
            return Err(PhaseLockError::InvalidBinCount(bins));
        }
        Ok(())
    }

    /// Validate an AR order search range.
    pub fn validate_order_range(min: usize, max: usize) -> Result<(), PhaseLockError> {
        if min > max {
            return Err(PhaseLockError::InvalidOrderRange { min, max });
        }
        Ok(())
    }

    /// Validate the coarse scale from which cascade shuffling starts.
    pub fn validate_scale(scale: usize) -> Result<(), PhaseLockError> {
        if scale < 2 {
            return Err(PhaseLockError::InvalidScale(scale));
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), PhaseLockError> {
        if let Some(param) = duplicate_param {
            return Err(PhaseLockError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }

    // ========================================================================
    // Shape Validation
    // ========================================================================

    /// Validate that two fields share their spatial grid.
    pub fn validate_same_grid(expected: &Field, got: &Field) -> Result<(), PhaseLockError> {
        if expected.grid() != got.grid() {
            return Err(PhaseLockError::GridMismatch {
                expected: expected.grid(),
                got: got.grid(),
            });
        }
        Ok(())
    }

    /// Validate that two fields share both grid and time axis.
    pub fn validate_same_shape(expected: &Field, got: &Field) -> Result<(), PhaseLockError> {
        Self::validate_same_grid(expected, got)?;
        if expected.time_len() != got.time_len() {
            return Err(PhaseLockError::ShapeMismatch {
                expected: expected.time_len(),
                got: got.time_len(),
            });
        }
        Ok(())
    }

    /// Validate that a guard band leaves samples to analyse.
    pub fn validate_guard_band(guard: usize, len: usize) -> Result<(), PhaseLockError> {
        if guard.saturating_mul(2) >= len {
            return Err(PhaseLockError::InvalidInput(format!(
                "guard band of {guard} samples per end leaves nothing of {len}"
            )));
        }
        Ok(())
    }
}

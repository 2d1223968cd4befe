//! Seasonal decomposition record and its application to fields.
//!
//! ## Purpose
//!
//! This module defines the `Seasonality` record produced by an external
//! seasonal-decomposition collaborator, the trait that collaborator
//! implements, and the arithmetic that reintroduces or removes the seasonal
//! components on a surrogate realization.
//!
//! ## Design notes
//!
//! * **Trimming**: Realizations may be shorter than the source (AR surrogates).
//!   The seasonal arrays are then trimmed to the realization length, keeping
//!   leading samples.
//! * **Order**: Reintroduction adds the trend, multiplies by the scale cycle,
//!   then adds the mean cycle; removal undoes the steps in reverse.
//!
//! ## Invariants
//!
//! * `remove(reintroduce(x)) ≈ x` for every sample with a nonzero scale.
//!
//! ## Non-goals
//!
//! * This module does not estimate climatologies or trends.
//! * This module does not map time indices to calendar days.

// External dependencies
use ndarray::{Array4, ArrayView4, s};

// Internal dependencies
use crate::primitives::errors::PhaseLockError;
use crate::primitives::field::Field;

// ============================================================================
// Seasonality Record
// ============================================================================

/// Seasonal components of a field, each shaped `(time, level, lat, lon)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Seasonality {
    /// Mean annual cycle.
    pub mean: Option<Array4<f64>>,

    /// Scale (standard deviation) annual cycle.
    pub var: Array4<f64>,

    /// Long-term trend, when the source was detrended.
    pub trend: Option<Array4<f64>>,
}

impl Seasonality {
    /// Record with only a scale cycle.
    pub fn new(var: Array4<f64>) -> Self {
        Self {
            mean: None,
            var,
            trend: None,
        }
    }

    /// Attach a mean cycle.
    pub fn with_mean(mut self, mean: Array4<f64>) -> Self {
        self.mean = Some(mean);
        self
    }

    /// Attach a trend.
    pub fn with_trend(mut self, trend: Array4<f64>) -> Self {
        self.trend = Some(trend);
        self
    }

    /// Leading `len` samples of one component.
    fn leading<'a>(
        component: &'a Array4<f64>,
        shape: &[usize],
    ) -> Result<ArrayView4<'a, f64>, PhaseLockError> {
        let have = component.shape();
        if have[1..] != shape[1..] {
            return Err(PhaseLockError::GridMismatch {
                expected: [shape[1], shape[2], shape[3]],
                got: [have[1], have[2], have[3]],
            });
        }
        if have[0] < shape[0] {
            return Err(PhaseLockError::ShapeMismatch {
                expected: shape[0],
                got: have[0],
            });
        }
        Ok(component.slice(s![..shape[0], .., .., ..]))
    }

    /// Add trend, multiply by the scale cycle, add mean cycle.
    pub fn reintroduce(&self, data: &mut Array4<f64>) -> Result<(), PhaseLockError> {
        let shape = data.shape().to_vec();
        if let Some(trend) = &self.trend {
            *data += &Self::leading(trend, &shape)?;
        }
        *data *= &Self::leading(&self.var, &shape)?;
        if let Some(mean) = &self.mean {
            *data += &Self::leading(mean, &shape)?;
        }
        Ok(())
    }

    /// Subtract mean cycle, divide by the scale cycle, subtract trend.
    pub fn remove(&self, data: &mut Array4<f64>) -> Result<(), PhaseLockError> {
        let shape = data.shape().to_vec();
        if let Some(mean) = &self.mean {
            *data -= &Self::leading(mean, &shape)?;
        }
        *data /= &Self::leading(&self.var, &shape)?;
        if let Some(trend) = &self.trend {
            *data -= &Self::leading(trend, &shape)?;
        }
        Ok(())
    }

    /// Apply `reintroduce` to a field, returning a new field.
    pub fn reintroduce_field(&self, field: &Field) -> Result<Field, PhaseLockError> {
        let mut data = field.data().to_owned();
        self.reintroduce(&mut data)?;
        field.with_data(data)
    }
}

// ============================================================================
// Collaborator Trait
// ============================================================================

/// External collaborator that standardizes a field in place.
///
/// `decompose` removes the seasonal components from the collaborator's field
/// and returns them; `reintroduce` restores them. Implementations must
/// satisfy `reintroduce(decompose(x)) ≈ x`.
pub trait SeasonalDecomposition {
    /// Strip mean and scale cycles (and the trend when `detrend` is set).
    fn decompose(&mut self, detrend: bool) -> Result<Seasonality, PhaseLockError>;

    /// Restore previously removed components.
    fn reintroduce(&mut self, seasonality: &Seasonality) -> Result<(), PhaseLockError>;
}

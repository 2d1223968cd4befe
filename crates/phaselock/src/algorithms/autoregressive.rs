//! Autoregressive model identification and residual-driven simulation.
//!
//! ## Purpose
//!
//! This module fits univariate AR(p) models with an intercept by ordinary
//! least squares, selects the order within a range by an information
//! criterion, and simulates new realizations driven by a reordered residual
//! pool.
//!
//! ## Design notes
//!
//! * **Solver**: Least squares through the SVD of the lagged design matrix
//!   (`nalgebra`), so rank-deficient designs still produce a solution.
//! * **Common sample**: All candidate orders are compared on the same
//!   estimation sample `t = p_max..n` so the criteria are comparable.
//! * **Refit**: The selected order is refit on its full sample `t = p..n`.
//! * **Burn-in**: Simulation starts from the unconditional mean and discards
//!   a burn-in run driven by the same residual pool.
//!
//! ## Key concepts
//!
//! * **SBC**: `ln σ² + (p + 1) ln(n_e) / n_e`.
//! * **FPE**: `ln σ² + ln((n_e + p + 1) / (n_e - p - 1))`.
//!
//! ## Invariants
//!
//! * A model of order `p` yields `n - p` residuals for a series of length `n`.
//! * Simulation output has exactly as many samples as residuals supplied.
//!
//! ## Non-goals
//!
//! * This module does not fit multivariate (vector) AR models.
//! * This module does not test residuals for whiteness.

// External dependencies
use nalgebra::{DMatrix, DVector};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::math::stats::any_nan;
use crate::primitives::errors::PhaseLockError;

/// Default number of discarded simulation steps.
pub const DEFAULT_BURN_IN: usize = 100;

// ============================================================================
// Information Criteria
// ============================================================================

/// Criterion used to select the model order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InformationCriterion {
    /// Schwarz Bayesian criterion.
    #[default]
    Sbc,

    /// Akaike's final prediction error.
    Fpe,
}

impl InformationCriterion {
    /// Criterion value for `params` parameters fit on `n_eff` samples.
    pub fn evaluate(&self, variance: f64, params: usize, n_eff: usize) -> f64 {
        let ne = n_eff as f64;
        let np = params as f64;
        match self {
            Self::Sbc => variance.ln() + np * ne.ln() / ne,
            Self::Fpe => variance.ln() + ((ne + np) / (ne - np)).ln(),
        }
    }
}

// ============================================================================
// Fitted Model
// ============================================================================

/// Fitted AR(p) model `x_t = c + Σ a_i x_(t-i) + e_t`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArModel {
    /// Selected order `p`.
    pub order: usize,

    /// Intercept `c`.
    pub intercept: f64,

    /// Lag coefficients `a_1..a_p`.
    pub coefficients: Vec<f64>,

    /// Residual variance of the refit (ddof = p + 1).
    pub residual_variance: f64,

    /// Criterion value that selected this order.
    pub criterion_value: f64,
}

/// Fitted model together with its residual series.
#[derive(Debug, Clone, PartialEq)]
pub struct ArFit {
    /// The selected model.
    pub model: ArModel,

    /// Residuals `e_t` for `t = p..n`.
    pub residuals: Vec<f64>,
}

// ============================================================================
// Least Squares
// ============================================================================

/// OLS fit of order `p` on targets `t = start..n`.
///
/// Returns `(intercept, coefficients, residuals)`.
fn least_squares(
    series: &[f64],
    order: usize,
    start: usize,
) -> Result<(f64, Vec<f64>, Vec<f64>), PhaseLockError> {
    let rows = series.len() - start;
    let design = DMatrix::from_fn(rows, order + 1, |r, c| {
        if c == 0 { 1.0 } else { series[start + r - c] }
    });
    let targets = DVector::from_iterator(rows, series[start..].iter().copied());

    let beta = design
        .clone()
        .svd(true, true)
        .solve(&targets, 1e-12)
        .map_err(|e| PhaseLockError::InvalidInput(format!("AR({order}) fit failed: {e}")))?;

    let residuals = (&targets - &design * &beta).iter().copied().collect();
    Ok((beta[0], beta.iter().skip(1).copied().collect(), residuals))
}

fn sum_of_squares(values: &[f64]) -> f64 {
    values.iter().map(|v| v * v).sum()
}

/// Select and fit an AR model with order in `[min_order, max_order]`.
pub fn fit_ar(
    series: &[f64],
    min_order: usize,
    max_order: usize,
    criterion: InformationCriterion,
) -> Result<ArFit, PhaseLockError> {
    if min_order > max_order {
        return Err(PhaseLockError::InvalidOrderRange {
            min: min_order,
            max: max_order,
        });
    }
    if series.is_empty() {
        return Err(PhaseLockError::EmptyInput);
    }
    if any_nan(series) {
        return Err(PhaseLockError::InvalidInput(
            "series contains missing values".into(),
        ));
    }

    let n = series.len();
    let n_eff = n.saturating_sub(max_order);
    if n_eff <= max_order + 1 {
        return Err(PhaseLockError::InvalidInput(format!(
            "{n} samples are too few for AR order {max_order}"
        )));
    }

    // Order selection on the common sample
    let mut best: Option<(usize, f64)> = None;
    for p in min_order..=max_order {
        let (_, _, residuals) = least_squares(series, p, max_order)?;
        let variance = sum_of_squares(&residuals) / n_eff as f64;
        let value = criterion.evaluate(variance, p + 1, n_eff);
        if best.is_none_or(|(_, b)| value < b) {
            best = Some((p, value));
        }
    }
    let (order, criterion_value) = best.unwrap_or((min_order, f64::NAN));

    // Refit on the full sample for the chosen order
    let (intercept, coefficients, residuals) = least_squares(series, order, order)?;
    let dof = residuals.len().saturating_sub(order + 1).max(1);
    let residual_variance = sum_of_squares(&residuals) / dof as f64;

    Ok(ArFit {
        model: ArModel {
            order,
            intercept,
            coefficients,
            residual_variance,
            criterion_value,
        },
        residuals,
    })
}

// ============================================================================
// Simulation
// ============================================================================

impl ArModel {
    /// Unconditional mean `c / (1 - Σ a_i)`, or 0 for non-stationary models.
    pub fn unconditional_mean(&self) -> f64 {
        let denom = 1.0 - self.coefficients.iter().sum::<f64>();
        let mean = self.intercept / denom;
        if mean.is_finite() { mean } else { 0.0 }
    }

    /// One-step residuals of `series` under this model (`n - p` values).
    pub fn residuals(&self, series: &[f64]) -> Vec<f64> {
        (self.order..series.len())
            .map(|t| {
                let predicted = self
                    .coefficients
                    .iter()
                    .enumerate()
                    .fold(self.intercept, |acc, (i, &a)| acc + a * series[t - 1 - i]);
                series[t] - predicted
            })
            .collect()
    }

    /// Simulate a realization driven by `residuals` in the given order.
    ///
    /// The first `burn_in` steps cycle through the residuals and are
    /// discarded; the returned series has `residuals.len()` samples.
    pub fn simulate_with_residuals(&self, residuals: &[f64], burn_in: usize) -> Vec<f64> {
        let m = residuals.len();
        if m == 0 {
            return Vec::new();
        }

        let p = self.order;
        let mut state = vec![self.unconditional_mean(); p];
        let mut out = Vec::with_capacity(m);

        for t in 0..burn_in + m {
            let noise = if t < burn_in {
                residuals[t % m]
            } else {
                residuals[t - burn_in]
            };

            // state[0] is the most recent value
            let value = self
                .coefficients
                .iter()
                .zip(&state)
                .fold(self.intercept + noise, |acc, (&a, &x)| acc + a * x);

            if p > 0 {
                state.rotate_right(1);
                state[0] = value;
            }
            if t >= burn_in {
                out.push(value);
            }
        }

        out
    }
}

// ============================================================================
// Single-Series Surrogate
// ============================================================================

/// Residual-resampling surrogate of one series.
///
/// Fits a model with order in `[min_order, max_order]`, shuffles its
/// residuals and simulates a realization of `n - order` samples. Returns the
/// realization together with the selected order.
pub fn autoregressive_surrogate<R: Rng + ?Sized>(
    series: &[f64],
    min_order: usize,
    max_order: usize,
    criterion: InformationCriterion,
    burn_in: usize,
    rng: &mut R,
) -> Result<(Vec<f64>, usize), PhaseLockError> {
    let ArFit {
        model,
        mut residuals,
    } = fit_ar(series, min_order, max_order, criterion)?;
    residuals.shuffle(rng);
    Ok((model.simulate_with_residuals(&residuals, burn_in), model.order))
}

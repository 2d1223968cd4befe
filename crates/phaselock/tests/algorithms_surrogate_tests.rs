//! Tests for the single-series surrogate algorithms.
//!
//! These tests verify the per-series building blocks behind every surrogate
//! family:
//! - Fourier phase randomization keeps the power spectrum
//! - Multifractal cascades keep each scale's coefficient values
//! - AR identification, residuals and simulation
//! - Amplitude adjustment by rank matching
//!
//! ## Test Organization
//!
//! 1. **Fourier** - Angle layout, spectrum and mean preservation
//! 2. **Multifractal** - Length checks, identity, per-scale multisets
//! 3. **Autoregressive** - Order selection, coefficients, simulation
//! 4. **Amplitude Adjustment** - Rank matching and trimming

use approx::{assert_abs_diff_eq, assert_relative_eq};
use core::f64::consts::PI;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use phaselock::internals::algorithms::amplitude::amplitude_adjust;
use phaselock::internals::algorithms::autoregressive::{
    ArModel, InformationCriterion, autoregressive_surrogate, fit_ar,
};
use phaselock::internals::algorithms::fourier::{
    fourier_surrogate, num_bins, random_angles, rotate_phases,
};
use phaselock::internals::algorithms::multifractal::{
    check_dyadic_length, multifractal_surrogate,
};
use phaselock::internals::math::fft::power_spectrum;
use phaselock::internals::math::haar::wavedec;
use phaselock::internals::math::stats::{mean, variance};
use phaselock::internals::primitives::errors::PhaseLockError;
use phaselock::internals::primitives::sorting::sorted;

fn noise(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

fn ar1(n: usize, phi: f64, seed: u64) -> Vec<f64> {
    let e = noise(n, seed);
    let mut x = vec![0.0; n];
    for t in 1..n {
        x[t] = phi * x[t - 1] + e[t];
    }
    x
}

fn simple_model(order: usize, intercept: f64, coefficients: Vec<f64>) -> ArModel {
    ArModel {
        order,
        intercept,
        coefficients,
        residual_variance: 1.0,
        criterion_value: 0.0,
    }
}

// ============================================================================
// Fourier Tests
// ============================================================================

/// Test that DC and Nyquist angles are zero.
#[test]
fn test_random_angles_layout() {
    let mut rng = StdRng::seed_from_u64(1);
    let angles = random_angles(8, &mut rng);
    assert_eq!(angles.len(), num_bins(8));
    assert_eq!(angles[0], 0.0);
    assert_eq!(angles[4], 0.0);
    assert!(angles.iter().all(|&a| (0.0..2.0 * PI).contains(&a)));

    let odd = random_angles(7, &mut rng);
    assert_eq!(odd.len(), 4);
    assert_eq!(odd[0], 0.0);
}

/// Test that zero rotation returns the input.
#[test]
fn test_rotate_phases_identity() {
    let series = noise(32, 2);
    let back = rotate_phases(&series, &vec![0.0; num_bins(32)]);
    for (a, b) in series.iter().zip(&back) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
    }
}

/// Test that the surrogate keeps the power spectrum and mean.
#[test]
fn test_fourier_surrogate_spectrum() {
    let mut rng = StdRng::seed_from_u64(3);
    let series: Vec<f64> = noise(128, 4).iter().map(|v| v + 5.0).collect();
    let surrogate = fourier_surrogate(&series, &mut rng);

    assert_eq!(surrogate.len(), series.len());
    assert_relative_eq!(mean(&surrogate), mean(&series), epsilon = 1e-10);

    let (p0, p1) = (power_spectrum(&series), power_spectrum(&surrogate));
    for (a, b) in p0.iter().zip(&p1) {
        assert_relative_eq!(*a, *b, epsilon = 1e-8, max_relative = 1e-8);
    }
    assert!(series.iter().zip(&surrogate).any(|(a, b)| (a - b).abs() > 1e-3));
}

/// Test that successive surrogates differ.
#[test]
fn test_fourier_surrogate_fresh_angles() {
    let mut rng = StdRng::seed_from_u64(5);
    let series = noise(64, 6);
    let first = fourier_surrogate(&series, &mut rng);
    let second = fourier_surrogate(&series, &mut rng);
    assert_ne!(first, second);
}

/// Test that an all-missing series stays missing.
#[test]
fn test_fourier_surrogate_missing() {
    let mut rng = StdRng::seed_from_u64(7);
    let out = fourier_surrogate(&[f64::NAN; 16], &mut rng);
    assert_eq!(out.len(), 16);
    assert!(out.iter().all(|v| v.is_nan()));
}

// ============================================================================
// Multifractal Tests
// ============================================================================

/// Test the dyadic length check.
#[test]
fn test_dyadic_length() {
    assert_eq!(check_dyadic_length(64), Ok(6));
    assert_eq!(
        check_dyadic_length(100),
        Err(PhaseLockError::NonPowerOfTwoLength(100))
    );
    assert_eq!(check_dyadic_length(0), Err(PhaseLockError::EmptyInput));
}

/// Test parameter errors.
#[test]
fn test_multifractal_errors() {
    let mut rng = StdRng::seed_from_u64(8);
    assert_eq!(
        multifractal_surrogate(&noise(100, 1), 2, &mut rng),
        Err(PhaseLockError::NonPowerOfTwoLength(100))
    );
    assert_eq!(
        multifractal_surrogate(&noise(64, 1), 1, &mut rng),
        Err(PhaseLockError::InvalidScale(1))
    );
}

/// Test that starting beyond the finest scale reproduces the input.
#[test]
fn test_multifractal_identity() {
    let mut rng = StdRng::seed_from_u64(9);
    let series = noise(64, 10);
    let out = multifractal_surrogate(&series, 6, &mut rng).unwrap();
    for (a, b) in series.iter().zip(&out) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-10);
    }
}

/// Test that every scale keeps its multiset of coefficients.
#[test]
fn test_multifractal_scale_multisets() {
    let mut rng = StdRng::seed_from_u64(11);
    let series = noise(128, 12);
    let out = multifractal_surrogate(&series, 2, &mut rng).unwrap();
    assert_eq!(out.len(), 128);

    let before = wavedec(&series, 6);
    let after = wavedec(&out, 6);
    for (c0, c1) in before.iter().zip(&after) {
        for (a, b) in sorted(c0).iter().zip(&sorted(c1)) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-9);
        }
    }

    // Coarse scales are untouched
    for j in 0..2 {
        for (a, b) in before[j].iter().zip(&after[j]) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-9);
        }
    }
    assert!(series.iter().zip(&out).any(|(a, b)| (a - b).abs() > 1e-6));
}

/// Test that zero parent coefficients do not produce NaN.
#[test]
fn test_multifractal_constant_series() {
    let mut rng = StdRng::seed_from_u64(13);
    let out = multifractal_surrogate(&[3.0; 32], 2, &mut rng).unwrap();
    for v in out {
        assert_abs_diff_eq!(v, 3.0, epsilon = 1e-12);
    }
}

/// Test that an all-missing series stays missing.
#[test]
fn test_multifractal_missing() {
    let mut rng = StdRng::seed_from_u64(14);
    let out = multifractal_surrogate(&[f64::NAN; 32], 2, &mut rng).unwrap();
    assert!(out.iter().all(|v| v.is_nan()));
}

// ============================================================================
// Autoregressive Tests
// ============================================================================

/// Test the criterion formulas.
#[test]
fn test_information_criteria() {
    let sbc = InformationCriterion::Sbc.evaluate(1.0, 2, 100);
    assert_relative_eq!(sbc, 2.0 * 100.0_f64.ln() / 100.0, epsilon = 1e-12);

    let fpe = InformationCriterion::Fpe.evaluate(1.0, 2, 100);
    assert_relative_eq!(fpe, (102.0_f64 / 98.0).ln(), epsilon = 1e-12);
}

/// Test that white noise selects a low order with the input variance.
#[test]
fn test_fit_white_noise() {
    let series = noise(2000, 21);
    let fit = fit_ar(&series, 0, 5, InformationCriterion::Sbc).unwrap();

    assert!(fit.model.order <= 1, "order {}", fit.model.order);
    assert_relative_eq!(
        fit.model.residual_variance,
        variance(&series, 1),
        max_relative = 0.1
    );
    assert_eq!(fit.residuals.len(), series.len() - fit.model.order);
}

/// Test coefficient recovery for a known AR(1) process.
#[test]
fn test_fit_ar1_coefficient() {
    let series = ar1(5000, 0.7, 22);
    let fit = fit_ar(&series, 1, 1, InformationCriterion::Fpe).unwrap();

    assert_eq!(fit.model.order, 1);
    assert_abs_diff_eq!(fit.model.coefficients[0], 0.7, epsilon = 0.05);
    assert_abs_diff_eq!(fit.model.intercept, 0.0, epsilon = 0.1);

    let residuals = fit.model.residuals(&series);
    assert_eq!(residuals.len(), 4999);
    for (a, b) in residuals.iter().zip(&fit.residuals) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-8);
    }
}

/// Test fit errors.
#[test]
fn test_fit_errors() {
    assert_eq!(
        fit_ar(&noise(50, 1), 3, 1, InformationCriterion::Sbc).map(|f| f.model.order),
        Err(PhaseLockError::InvalidOrderRange { min: 3, max: 1 })
    );
    assert!(matches!(
        fit_ar(&[1.0, f64::NAN, 2.0, 3.0, 4.0, 5.0], 1, 1, InformationCriterion::Sbc),
        Err(PhaseLockError::InvalidInput(_))
    ));
    assert!(matches!(
        fit_ar(&[1.0, 2.0, 3.0, 4.0], 1, 3, InformationCriterion::Sbc),
        Err(PhaseLockError::InvalidInput(_))
    ));
    assert!(matches!(
        fit_ar(&[], 1, 1, InformationCriterion::Sbc),
        Err(PhaseLockError::EmptyInput)
    ));
}

/// Test that an order-0 model adds the intercept to each residual.
#[test]
fn test_simulate_order_zero() {
    let model = simple_model(0, 2.0, vec![]);
    let out = model.simulate_with_residuals(&[1.0, -1.0, 0.5], 10);
    assert_eq!(out, vec![3.0, 1.0, 2.5]);
}

/// Test that zero noise keeps the process at its unconditional mean.
#[test]
fn test_simulate_stationary_mean() {
    let model = simple_model(1, 1.0, vec![0.5]);
    assert_relative_eq!(model.unconditional_mean(), 2.0);

    let out = model.simulate_with_residuals(&[0.0; 20], 100);
    assert_eq!(out.len(), 20);
    for v in out {
        assert_relative_eq!(v, 2.0, epsilon = 1e-12);
    }
}

/// Test the unit-root fallback of the unconditional mean.
#[test]
fn test_unconditional_mean_unit_root() {
    let model = simple_model(1, 1.0, vec![1.0]);
    assert_eq!(model.unconditional_mean(), 0.0);
}

/// Test that the surrogate is shorter by the selected order.
#[test]
fn test_autoregressive_surrogate_length() {
    let mut rng = StdRng::seed_from_u64(23);
    let series = ar1(400, 0.5, 24);
    let (out, order) = autoregressive_surrogate(
        &series,
        1,
        3,
        InformationCriterion::Sbc,
        100,
        &mut rng,
    )
    .unwrap();

    assert!((1..=3).contains(&order));
    assert_eq!(out.len(), 400 - order);
    assert!(out.iter().all(|v| v.is_finite()));
}

// ============================================================================
// Amplitude Adjustment Tests
// ============================================================================

/// Test rank matching onto the surrogate order.
#[test]
fn test_amplitude_adjust_basic() {
    let out = amplitude_adjust(&[1.0, 2.0, 3.0, 4.0, 5.0], &[0.5, -1.0, 3.0, 0.0, 2.0]).unwrap();
    assert_eq!(out, vec![3.0, 1.0, 5.0, 2.0, 4.0]);
}

/// Test that a shorter surrogate uses the leading source samples.
#[test]
fn test_amplitude_adjust_shorter() {
    let out = amplitude_adjust(&[5.0, 4.0, 3.0, 2.0, 1.0], &[0.1, 0.3, 0.2]).unwrap();
    assert_eq!(out, vec![3.0, 5.0, 4.0]);
}

/// Test that a longer surrogate is rejected.
#[test]
fn test_amplitude_adjust_longer() {
    assert_eq!(
        amplitude_adjust(&[1.0, 2.0], &[1.0, 2.0, 3.0]),
        Err(PhaseLockError::ShapeMismatch {
            expected: 3,
            got: 2,
        })
    );
}

/// Test that missing input gives missing output.
#[test]
fn test_amplitude_adjust_missing() {
    let out = amplitude_adjust(&[f64::NAN; 4], &[1.0, 2.0, 3.0, 4.0]).unwrap();
    assert!(out.iter().all(|v| v.is_nan()));
}

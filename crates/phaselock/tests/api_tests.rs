//! Tests for the fluent builders.
//!
//! These tests verify:
//! - Default configuration of both builders
//! - Validation performed by `.build()`
//! - Duplicate parameter detection
//!
//! ## Test Organization
//!
//! 1. **Surrogate Builder** - Defaults, validation, duplicates
//! 2. **Analysis Builder** - Defaults, validation, duplicates

use phaselock::prelude::*;

// ============================================================================
// Surrogate Builder Tests
// ============================================================================

/// Test the default generator configuration.
#[test]
fn test_surrogate_builder_defaults() {
    let generator = Surrogates::new().build().unwrap();
    let config = generator.config();

    assert_eq!(config.seed, None);
    assert_eq!(config.randomise_from_scale, 2);
    assert_eq!((config.min_order, config.max_order), (1, 1));
    assert_eq!(config.criterion, Sbc);
    assert_eq!(config.burn_in, 100);
    assert!(generator.ar_preparation().is_none());
}

/// Test that explicit settings are kept.
#[test]
fn test_surrogate_builder_settings() {
    let generator = Surrogates::new()
        .seed(9)
        .randomise_from_scale(3)
        .order_range(0, 4)
        .criterion(Fpe)
        .burn_in(10)
        .build()
        .unwrap();
    let config = generator.config();

    assert_eq!(config.seed, Some(9));
    assert_eq!(config.randomise_from_scale, 3);
    assert_eq!((config.min_order, config.max_order), (0, 4));
    assert_eq!(config.criterion, Fpe);
    assert_eq!(config.burn_in, 10);
}

/// Test parameter validation.
#[test]
fn test_surrogate_builder_validation() {
    assert_eq!(
        Surrogates::new().randomise_from_scale(1).build().err(),
        Some(PhaseLockError::InvalidScale(1))
    );
    assert_eq!(
        Surrogates::new().order_range(3, 1).build().err(),
        Some(PhaseLockError::InvalidOrderRange { min: 3, max: 1 })
    );
}

/// Test that setting a parameter twice is reported.
#[test]
fn test_surrogate_builder_duplicate() {
    assert_eq!(
        Surrogates::new().seed(1).seed(2).build().err(),
        Some(PhaseLockError::DuplicateParameter { parameter: "seed" })
    );
    assert_eq!(
        Surrogates::new().burn_in(1).burn_in(1).build().err(),
        Some(PhaseLockError::DuplicateParameter {
            parameter: "burn_in"
        })
    );
}

// ============================================================================
// Analysis Builder Tests
// ============================================================================

/// Test the default pipeline configuration.
#[test]
fn test_analysis_builder_defaults() {
    let analysis = Analysis::new().period(24.0).build().unwrap();
    let config = analysis.config();

    assert_eq!(config.wavelet.period, 24.0);
    assert_eq!(config.wavelet.dt, 1.0);
    assert_eq!(config.wavelet.k0, 6.0);
    assert!(!config.wavelet.pad);
    assert_eq!(config.bins, 8);
    assert_eq!(config.boundary_policy, BothInclusive);
    assert_eq!(config.guard_band, 0);
    assert_eq!(analysis.edges().len(), 9);
}

/// Test that explicit settings are kept.
#[test]
fn test_analysis_builder_settings() {
    let analysis = Analysis::new()
        .period(8.0)
        .dt(0.5)
        .k0(5.0)
        .pad(true)
        .bins(4)
        .boundary_policy(LeftInclusive)
        .guard_band(16)
        .build()
        .unwrap();
    let config = analysis.config();

    assert_eq!(config.wavelet.dt, 0.5);
    assert_eq!(config.wavelet.k0, 5.0);
    assert!(config.wavelet.pad);
    assert_eq!(config.bins, 4);
    assert_eq!(config.boundary_policy, LeftInclusive);
    assert_eq!(config.guard_band, 16);
    assert_eq!(analysis.edges().len(), 5);
}

/// Test parameter validation.
#[test]
fn test_analysis_builder_validation() {
    assert!(matches!(
        Analysis::new().build(),
        Err(PhaseLockError::InvalidPeriod(p)) if p.is_nan()
    ));
    assert_eq!(
        Analysis::new().period(-3.0).build().err(),
        Some(PhaseLockError::InvalidPeriod(-3.0))
    );
    assert_eq!(
        Analysis::new().period(8.0).dt(0.0).build().err(),
        Some(PhaseLockError::InvalidSamplingInterval(0.0))
    );
    assert_eq!(
        Analysis::new().period(8.0).k0(-1.0).build().err(),
        Some(PhaseLockError::InvalidWavenumber(-1.0))
    );
    assert_eq!(
        Analysis::new().period(8.0).bins(0).build().err(),
        Some(PhaseLockError::InvalidBinCount(0))
    );
}

/// Test that setting a parameter twice is reported.
#[test]
fn test_analysis_builder_duplicate() {
    assert_eq!(
        Analysis::new().period(8.0).period(9.0).build().err(),
        Some(PhaseLockError::DuplicateParameter { parameter: "period" })
    );
    assert_eq!(
        Analysis::new().period(8.0).bins(4).bins(4).build().err(),
        Some(PhaseLockError::DuplicateParameter { parameter: "bins" })
    );
}

//! Tests for execution, validation and result tables.
//!
//! These tests verify:
//! - The sequential executor's bulk and queue strategies
//! - Parameter and shape validation
//! - Series assembly and the bin, ensemble and record tables
//!
//! ## Test Organization
//!
//! 1. **Sequential Executor** - Task fan-out and result collection
//! 2. **Validator** - Parameter ranges and shape checks
//! 3. **Series Assembly** - Scatter by coordinate
//! 4. **Result Tables** - Bin table, ensemble table, persistence record

use approx::assert_relative_eq;
use ndarray::{Array3, Array4};

use phaselock::internals::algorithms::binning::{BoundaryPolicy, SectorStatistics};
use phaselock::internals::engine::executor::{
    GridExecutor, PairTask, PointResult, PointTask, Sequential, collect_results,
};
use phaselock::internals::engine::output::{
    BinTable, EnsembleTable, RECORD_VERSION, ResultRecord, SurrogateKind, assemble_series,
};
use phaselock::internals::engine::validator::Validator;
use phaselock::internals::primitives::errors::PhaseLockError;
use phaselock::internals::primitives::field::{Field, GridPoint, grid_points};

fn stats(values: &[f64]) -> SectorStatistics {
    SectorStatistics {
        means: values.to_vec(),
        variances: values.iter().map(|v| v / 2.0).collect(),
    }
}

/// Table on a 1 x 2 x 2 grid with two sectors and no missing values.
fn full_table() -> BinTable {
    let mut table = BinTable::new([1, 2, 2], 2);
    for (k, point) in grid_points([1, 2, 2]).enumerate() {
        let k = k as f64;
        table.insert(point, &stats(&[k, k + 1.5]));
    }
    table
}

// ============================================================================
// Sequential Executor Tests
// ============================================================================

/// Test that bulk results keep their coordinates.
#[test]
fn test_sequential_map_points() {
    let tasks: Vec<PointTask<usize>> = grid_points([1, 2, 3])
        .enumerate()
        .map(|(i, p)| PointTask::new(p, i))
        .collect();
    let results = Sequential.map_points(tasks, |i| i * 10).unwrap();

    assert_eq!(Sequential.workers(), 0);
    assert_eq!(results.len(), 6);
    for (i, r) in results.iter().enumerate() {
        assert_eq!(r.point, GridPoint::from_flat_index(i, [1, 2, 3]));
        assert_eq!(r.value, i * 10);
    }
}

/// Test the pair stream and its length check.
#[test]
fn test_sequential_map_pairs() {
    let pairs = |n: usize| {
        (0..n).flat_map(move |i| (i + 1..n).map(move |j| PairTask { i, j, args: i + j }))
    };

    let results = Sequential.map_pairs(pairs(4), 6, |s| s * 2).unwrap();
    assert_eq!(results.len(), 6);
    assert!(results.contains(&(1, 3, 8)));

    let result = Sequential.map_pairs(pairs(4), 7, |s| s);
    assert!(matches!(result, Err(PhaseLockError::WorkerFailure(_))));
}

/// Test that the first task error is returned.
#[test]
fn test_collect_results() {
    let ok = vec![
        PointResult {
            point: GridPoint::surface(0, 0),
            value: Ok(1.0),
        },
        PointResult {
            point: GridPoint::surface(0, 1),
            value: Ok(2.0),
        },
    ];
    let collected = collect_results(ok).unwrap();
    assert_eq!(collected[1].value, 2.0);

    let failed = vec![
        PointResult {
            point: GridPoint::surface(0, 0),
            value: Ok(1.0),
        },
        PointResult {
            point: GridPoint::surface(0, 1),
            value: Err(PhaseLockError::NonPowerOfTwoLength(3)),
        },
    ];
    assert_eq!(
        collect_results(failed),
        Err(PhaseLockError::NonPowerOfTwoLength(3))
    );
}

// ============================================================================
// Validator Tests
// ============================================================================

/// Test period, sampling interval and wavenumber ranges.
#[test]
fn test_validate_positive_parameters() {
    assert!(Validator::validate_period(12.0).is_ok());
    assert_eq!(
        Validator::validate_period(0.0),
        Err(PhaseLockError::InvalidPeriod(0.0))
    );
    assert!(Validator::validate_period(f64::INFINITY).is_err());
    assert!(Validator::validate_period(f64::NAN).is_err());

    assert!(Validator::validate_dt(0.5).is_ok());
    assert_eq!(
        Validator::validate_dt(-1.0),
        Err(PhaseLockError::InvalidSamplingInterval(-1.0))
    );

    assert!(Validator::validate_wavenumber(6.0).is_ok());
    assert!(Validator::validate_wavenumber(0.0).is_err());
}

/// Test integer parameter ranges.
#[test]
fn test_validate_counts() {
    assert!(Validator::validate_bins(1).is_ok());
    assert_eq!(
        Validator::validate_bins(0),
        Err(PhaseLockError::InvalidBinCount(0))
    );

    assert!(Validator::validate_order_range(2, 2).is_ok());
    assert_eq!(
        Validator::validate_order_range(3, 2),
        Err(PhaseLockError::InvalidOrderRange { min: 3, max: 2 })
    );

    assert!(Validator::validate_scale(2).is_ok());
    assert_eq!(
        Validator::validate_scale(1),
        Err(PhaseLockError::InvalidScale(1))
    );

    assert!(Validator::validate_guard_band(4, 9).is_ok());
    assert!(Validator::validate_guard_band(5, 10).is_err());
    assert!(Validator::validate_guard_band(usize::MAX, 10).is_err());
    assert!(Validator::validate_guard_band(usize::MAX / 2 + 1, usize::MAX).is_err());
}

/// Test shape comparisons between fields.
#[test]
fn test_validate_shapes() {
    let a = Field::from_surface(Array3::zeros((10, 2, 2)), vec![0.0, 1.0], vec![0.0, 1.0]).unwrap();
    let b = Field::from_surface(Array3::zeros((8, 2, 2)), vec![0.0, 1.0], vec![0.0, 1.0]).unwrap();
    let c = Field::from_surface(Array3::zeros((10, 2, 1)), vec![0.0, 1.0], vec![0.0]).unwrap();

    assert!(Validator::validate_same_grid(&a, &b).is_ok());
    assert_eq!(
        Validator::validate_same_shape(&a, &b),
        Err(PhaseLockError::ShapeMismatch {
            expected: 10,
            got: 8,
        })
    );
    assert!(matches!(
        Validator::validate_same_grid(&a, &c),
        Err(PhaseLockError::GridMismatch { .. })
    ));
}

/// Test duplicate detection.
#[test]
fn test_validate_no_duplicates() {
    assert!(Validator::validate_no_duplicates(None).is_ok());
    assert_eq!(
        Validator::validate_no_duplicates(Some("seed")),
        Err(PhaseLockError::DuplicateParameter { parameter: "seed" })
    );
}

// ============================================================================
// Series Assembly Tests
// ============================================================================

/// Test that missing points stay NaN.
#[test]
fn test_assemble_series() {
    let results = vec![PointResult {
        point: GridPoint::surface(1, 0),
        value: vec![1.0, 2.0, 3.0],
    }];
    let data = assemble_series(3, [1, 2, 1], results).unwrap();

    assert_eq!(data.shape(), &[3, 1, 2, 1]);
    assert_eq!(data[[2, 0, 1, 0]], 3.0);
    assert!(data[[0, 0, 0, 0]].is_nan());
}

/// Test that a wrong series length is rejected.
#[test]
fn test_assemble_series_length() {
    let results = vec![PointResult {
        point: GridPoint::surface(0, 0),
        value: vec![1.0, 2.0],
    }];
    assert_eq!(
        assemble_series(3, [1, 1, 1], results),
        Err(PhaseLockError::ShapeMismatch {
            expected: 3,
            got: 2,
        })
    );
}

// ============================================================================
// Result Table Tests
// ============================================================================

/// Test that a new table is entirely missing.
#[test]
fn test_bin_table_new() {
    let table = BinTable::new([2, 3, 4], 8);
    assert_eq!(table.bins(), 8);
    assert_eq!(table.grid(), [2, 3, 4]);
    assert_eq!(table.missing_points(), 24);
}

/// Test per-point access and summaries.
#[test]
fn test_bin_table_summaries() {
    let mut table = BinTable::new([1, 1, 2], 4);
    table.insert(GridPoint::surface(0, 1), &stats(&[1.0, 5.0, 2.0, 4.0]));

    assert_eq!(table.missing_points(), 1);
    assert_eq!(table.point_means(GridPoint::surface(0, 1)), vec![1.0, 5.0, 2.0, 4.0]);
    assert_eq!(
        table.point_variances(GridPoint::surface(0, 1)),
        vec![0.5, 2.5, 1.0, 2.0]
    );

    let spread = table.mean_spread();
    assert_relative_eq!(spread[[0, 0, 1]], 4.0);
    assert!(spread[[0, 0, 0]].is_nan());
    assert_relative_eq!(table.variance_spread()[[0, 0, 1]], 2.0);
    assert_relative_eq!(table.mean_over_bins()[[0, 0, 1]], 3.0);
    assert_eq!(table.level_means(0).shape(), &[1, 2, 4]);
}

/// Test the summary display.
#[test]
fn test_bin_table_display() {
    let text = BinTable::new([1, 2, 3], 8).to_string();
    assert!(text.contains("1 x 2 x 3"));
    assert!(text.contains("Missing points: 6"));
}

/// Test storing and reading realizations.
#[test]
fn test_ensemble_table() {
    let families = vec![SurrogateKind::Fourier, SurrogateKind::Autoregressive];
    let mut ensemble = EnsembleTable::new(families, 3, [1, 2, 2], 2);
    assert_eq!(ensemble.realizations(), 3);
    assert_eq!(ensemble.means.shape(), &[2, 3, 1, 2, 2, 2]);

    let table = full_table();
    ensemble.insert(1, 2, &table);
    assert_eq!(ensemble.realization(1, 2), table);
    assert_eq!(ensemble.realization(0, 0).missing_points(), 4);
}

/// Test family labels and default ordering.
#[test]
fn test_surrogate_kind_labels() {
    let labels: Vec<String> = SurrogateKind::ALL.iter().map(|k| k.to_string()).collect();
    assert_eq!(labels, vec!["MF", "FT", "FTS", "AR"]);
}

/// Test JSON persistence of a record.
#[test]
fn test_result_record_json() {
    let mut ensemble = EnsembleTable::new(vec![SurrogateKind::Multifractal], 1, [1, 2, 2], 2);
    ensemble.insert(0, 0, &full_table());

    let record = ResultRecord::new(12.0, BoundaryPolicy::LeftInclusive, full_table(), Some(ensemble));
    assert_eq!(record.version, RECORD_VERSION);

    let json = serde_json::to_string(&record).unwrap();
    let back: ResultRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
    assert!(back.check_version().is_ok());
}

/// Test that other format versions are rejected.
#[test]
fn test_result_record_version() {
    let mut record = ResultRecord::new(12.0, BoundaryPolicy::default(), full_table(), None);
    record.version = RECORD_VERSION + 1;
    assert!(matches!(
        record.check_version(),
        Err(PhaseLockError::InvalidInput(_))
    ));

    let data = Array4::<f64>::zeros((1, 1, 1, 2));
    let table = BinTable {
        means: data.clone(),
        variances: data,
    };
    assert_eq!(table.bins(), 2);
}

//! Tests for the field container, grid coordinates and rank utilities.
//!
//! These tests verify the primitives every other layer builds on:
//! - Field construction and coordinate checks
//! - Grid point ordering and flat indexing
//! - Per-point series access and sub-selection
//! - Argsort, scatter and rank matching with NaN handling
//!
//! ## Test Organization
//!
//! 1. **Field Construction** - Shapes, coordinates, errors
//! 2. **Grid Points** - Iteration order and flat indices
//! 3. **Series Access** - Per-point slices and sub-selection
//! 4. **Sorting** - Argsort, scatter, rank matching

use ndarray::{Array3, Array4};

use phaselock::internals::primitives::errors::PhaseLockError;
use phaselock::internals::primitives::field::{Field, GridPoint, grid_points};
use phaselock::internals::primitives::sorting::{argsort, rank_match, scatter_by_rank, sorted};

/// Field whose value encodes its own coordinate: `100t + 10lat + lon`.
fn coded_field(n: usize, lats: usize, lons: usize) -> Field {
    let data = Array3::from_shape_fn((n, lats, lons), |(t, i, j)| {
        (100 * t + 10 * i + j) as f64
    });
    Field::from_surface(
        data,
        (0..lats).map(|i| i as f64).collect(),
        (0..lons).map(|j| j as f64).collect(),
    )
    .unwrap()
}

// ============================================================================
// Field Construction Tests
// ============================================================================

/// Test that an empty array is rejected.
#[test]
fn test_field_empty() {
    let data = Array4::<f64>::zeros((0, 1, 1, 1));
    let result = Field::new(data, vec![0.0], vec![0.0]);
    assert_eq!(result, Err(PhaseLockError::EmptyInput));
}

/// Test that coordinate lengths must match the grid.
#[test]
fn test_field_coordinate_mismatch() {
    let data = Array4::<f64>::zeros((4, 1, 2, 3));
    let result = Field::new(data, vec![0.0], vec![0.0, 1.0, 2.0]);
    assert!(matches!(result, Err(PhaseLockError::InvalidInput(_))));

    let data = Array4::<f64>::zeros((4, 1, 2, 3));
    let result = Field::new(data, vec![0.0, 1.0], vec![0.0]);
    assert!(matches!(result, Err(PhaseLockError::InvalidInput(_))));
}

/// Test surface and station constructors.
#[test]
fn test_field_shapes() {
    let surface = coded_field(5, 2, 3);
    assert_eq!(surface.time_len(), 5);
    assert_eq!(surface.grid(), [1, 2, 3]);
    assert_eq!(surface.num_points(), 6);
    assert_eq!(surface.lats(), &[0.0, 1.0]);

    let station = Field::from_station(vec![1.0, 2.0, 3.0]).unwrap();
    assert_eq!(station.grid(), [1, 1, 1]);
    assert_eq!(station.time_len(), 3);
    assert_eq!(station.series(GridPoint::surface(0, 0)), vec![1.0, 2.0, 3.0]);
}

/// Test that new data must share the spatial grid.
#[test]
fn test_field_with_data() {
    let field = coded_field(5, 2, 3);

    let shorter = field.with_data(Array4::zeros((3, 1, 2, 3))).unwrap();
    assert_eq!(shorter.time_len(), 3);
    assert_eq!(shorter.lons(), field.lons());

    let result = field.with_data(Array4::zeros((5, 1, 3, 2)));
    assert_eq!(
        result,
        Err(PhaseLockError::GridMismatch {
            expected: [1, 2, 3],
            got: [1, 3, 2],
        })
    );
}

// ============================================================================
// Grid Point Tests
// ============================================================================

/// Test level-major iteration order.
#[test]
fn test_grid_points_order() {
    let points: Vec<GridPoint> = grid_points([2, 2, 3]).collect();
    assert_eq!(points.len(), 12);
    assert_eq!(points[0], GridPoint::new(0, 0, 0));
    assert_eq!(points[1], GridPoint::new(0, 0, 1));
    assert_eq!(points[3], GridPoint::new(0, 1, 0));
    assert_eq!(points[6], GridPoint::new(1, 0, 0));
}

/// Test that flat indices follow iteration order and invert.
#[test]
fn test_flat_index_roundtrip() {
    let grid = [2, 3, 4];
    for (index, point) in grid_points(grid).enumerate() {
        assert_eq!(point.flat_index(grid), index);
        assert_eq!(GridPoint::from_flat_index(index, grid), point);
    }
}

// ============================================================================
// Series Access Tests
// ============================================================================

/// Test per-point series extraction.
#[test]
fn test_series() {
    let field = coded_field(3, 2, 3);
    assert_eq!(
        field.series(GridPoint::surface(1, 2)),
        vec![12.0, 112.0, 212.0]
    );
    assert_eq!(field.series_view(GridPoint::surface(0, 1))[2], 201.0);
}

/// Test time slicing.
#[test]
fn test_slice_time() {
    let field = coded_field(6, 2, 2);
    let sliced = field.slice_time(2, 5).unwrap();
    assert_eq!(sliced.time_len(), 3);
    assert_eq!(sliced.series(GridPoint::surface(1, 1)), vec![211.0, 311.0, 411.0]);

    assert!(field.slice_time(5, 5).is_err());
    assert!(field.slice_time(0, 7).is_err());
}

/// Test level selection bounds.
#[test]
fn test_select_level() {
    let data = Array4::from_shape_fn((4, 3, 1, 1), |(t, l, _, _)| (10 * l + t) as f64);
    let field = Field::new(data, vec![0.0], vec![0.0]).unwrap();

    let level = field.select_level(2).unwrap();
    assert_eq!(level.grid(), [1, 1, 1]);
    assert_eq!(level.series(GridPoint::surface(0, 0)), vec![20.0, 21.0, 22.0, 23.0]);

    assert_eq!(
        field.select_level(3),
        Err(PhaseLockError::OutOfBounds {
            axis: "level",
            index: 3,
            len: 3,
        })
    );
}

// ============================================================================
// Sorting Tests
// ============================================================================

/// Test argsort on finite values.
#[test]
fn test_argsort_basic() {
    assert_eq!(argsort(&[3.0, 1.0, 2.0]), vec![1, 2, 0]);
    assert_eq!(argsort(&[1.0, 2.0, 3.0]), vec![0, 1, 2]);
}

/// Test that NaN values sort last.
#[test]
fn test_argsort_nan_last() {
    assert_eq!(argsort(&[f64::NAN, 1.0, 0.5]), vec![2, 1, 0]);

    let s = sorted(&[f64::NAN, 2.0, 1.0]);
    assert_eq!(&s[..2], &[1.0, 2.0]);
    assert!(s[2].is_nan());
}

/// Test scatter by rank.
#[test]
fn test_scatter_by_rank() {
    let result = scatter_by_rank(&[10.0, 20.0, 30.0], &[1, 2, 0]);
    assert_eq!(result, vec![30.0, 10.0, 20.0]);
}

/// Test rank matching onto a template ordering.
#[test]
fn test_rank_match() {
    let result = rank_match(&[5.0, 1.0, 3.0], &[0.2, 0.9, 0.1]);
    assert_eq!(result, vec![3.0, 5.0, 1.0]);
}

/// Test that ties keep their original order.
#[test]
fn test_argsort_stable() {
    assert_eq!(argsort(&[2.0, 1.0, 2.0, 1.0]), vec![1, 3, 0, 2]);
}

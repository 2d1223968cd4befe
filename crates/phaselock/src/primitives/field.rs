//! Gridded field container and grid coordinates.
//!
//! ## Purpose
//!
//! This module provides the `Field` type: a read-only (time, level, lat, lon)
//! array with its coordinate vectors, as handed over by an external loader.
//! Every other component consumes fields through per-point series slices
//! addressed by `GridPoint`.
//!
//! ## Design notes
//!
//! * **Always 4-D**: Surface data gets a single level, station data a single
//!   level, latitude and longitude. No squeezing happens internally.
//! * **Owned copies**: `series` copies one point's samples so tasks never see
//!   the whole grid.
//! * **Point order**: Iteration is level-major, then latitude, then longitude.
//!
//! ## Invariants
//!
//! * `lats.len()` and `lons.len()` match the lat/lon axes of the data.
//! * Every per-point series has the same length (the time axis).
//!
//! ## Non-goals
//!
//! * This module does not read files or map time indices to calendar dates.
//! * This module does not compute anything over the data.

// External dependencies
use ndarray::{Array1, Array3, Array4, ArrayView1, ArrayView4, Axis, s};

// Internal dependencies
use crate::primitives::errors::PhaseLockError;

// ============================================================================
// Grid Coordinates
// ============================================================================

/// A single grid coordinate in (level, lat, lon) index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPoint {
    /// Vertical level index.
    pub level: usize,

    /// Latitude index.
    pub lat: usize,

    /// Longitude index.
    pub lon: usize,
}

impl GridPoint {
    /// Create a new grid coordinate.
    pub fn new(level: usize, lat: usize, lon: usize) -> Self {
        Self { level, lat, lon }
    }

    /// Coordinate on a single-level grid.
    pub fn surface(lat: usize, lon: usize) -> Self {
        Self { level: 0, lat, lon }
    }

    /// Position of this point in a flattened (level, lat, lon) grid.
    pub fn flat_index(&self, grid: [usize; 3]) -> usize {
        (self.level * grid[1] + self.lat) * grid[2] + self.lon
    }

    /// Inverse of [`GridPoint::flat_index`].
    pub fn from_flat_index(index: usize, grid: [usize; 3]) -> Self {
        let lon = index % grid[2];
        let rest = index / grid[2];
        Self {
            level: rest / grid[1],
            lat: rest % grid[1],
            lon,
        }
    }
}

/// Iterate every coordinate of a (level, lat, lon) grid in level-major order.
pub fn grid_points(grid: [usize; 3]) -> impl Iterator<Item = GridPoint> {
    let [levels, lats, lons] = grid;
    (0..levels).flat_map(move |level| {
        (0..lats).flat_map(move |lat| (0..lons).map(move |lon| GridPoint { level, lat, lon }))
    })
}

// ============================================================================
// Field
// ============================================================================

/// Gridded numeric field indexed by (time, level, lat, lon).
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    data: Array4<f64>,
    lats: Vec<f64>,
    lons: Vec<f64>,
}

impl Field {
    /// Create a field from a (time, level, lat, lon) array and its coordinates.
    pub fn new(data: Array4<f64>, lats: Vec<f64>, lons: Vec<f64>) -> Result<Self, PhaseLockError> {
        if data.is_empty() {
            return Err(PhaseLockError::EmptyInput);
        }
        let shape = data.shape();
        if lats.len() != shape[2] {
            return Err(PhaseLockError::InvalidInput(format!(
                "{} latitudes for a lat axis of length {}",
                lats.len(),
                shape[2]
            )));
        }
        if lons.len() != shape[3] {
            return Err(PhaseLockError::InvalidInput(format!(
                "{} longitudes for a lon axis of length {}",
                lons.len(),
                shape[3]
            )));
        }
        Ok(Self { data, lats, lons })
    }

    /// Create a single-level field from a (time, lat, lon) array.
    pub fn from_surface(
        data: Array3<f64>,
        lats: Vec<f64>,
        lons: Vec<f64>,
    ) -> Result<Self, PhaseLockError> {
        Self::new(data.insert_axis(Axis(1)), lats, lons)
    }

    /// Create a one-point field from a station time series.
    pub fn from_station(series: Vec<f64>) -> Result<Self, PhaseLockError> {
        let n = series.len();
        let data = Array1::from_vec(series)
            .into_shape_with_order((n, 1, 1, 1))
            .map_err(|e| PhaseLockError::InvalidInput(e.to_string()))?;
        Self::new(data, vec![0.0], vec![0.0])
    }

    /// Build a field on the same coordinates with new data.
    ///
    /// The time axis may differ (e.g., shorter AR realizations); the spatial
    /// grid must not.
    pub fn with_data(&self, data: Array4<f64>) -> Result<Self, PhaseLockError> {
        let got = [data.shape()[1], data.shape()[2], data.shape()[3]];
        if got != self.grid() {
            return Err(PhaseLockError::GridMismatch {
                expected: self.grid(),
                got,
            });
        }
        Self::new(data, self.lats.clone(), self.lons.clone())
    }

    // ========================================================================
    // Shape Queries
    // ========================================================================

    /// Number of time samples.
    pub fn time_len(&self) -> usize {
        self.data.shape()[0]
    }

    /// Number of vertical levels.
    pub fn num_levels(&self) -> usize {
        self.data.shape()[1]
    }

    /// Number of latitudes.
    pub fn num_lats(&self) -> usize {
        self.data.shape()[2]
    }

    /// Number of longitudes.
    pub fn num_lons(&self) -> usize {
        self.data.shape()[3]
    }

    /// Spatial (level, lat, lon) shape.
    pub fn grid(&self) -> [usize; 3] {
        [self.num_levels(), self.num_lats(), self.num_lons()]
    }

    /// Total number of grid points.
    pub fn num_points(&self) -> usize {
        self.num_levels() * self.num_lats() * self.num_lons()
    }

    /// Latitude coordinates.
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    /// Longitude coordinates.
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    // ========================================================================
    // Data Access
    // ========================================================================

    /// Read-only view of the full array.
    pub fn data(&self) -> ArrayView4<'_, f64> {
        self.data.view()
    }

    /// Mutable access for in-place standardization by the owner.
    pub fn data_mut(&mut self) -> &mut Array4<f64> {
        &mut self.data
    }

    /// Consume the field and return its array.
    pub fn into_data(self) -> Array4<f64> {
        self.data
    }

    /// Iterate all grid coordinates.
    pub fn points(&self) -> impl Iterator<Item = GridPoint> {
        grid_points(self.grid())
    }

    /// View of one point's time series.
    pub fn series_view(&self, point: GridPoint) -> ArrayView1<'_, f64> {
        self.data.slice(s![.., point.level, point.lat, point.lon])
    }

    /// Owned copy of one point's time series.
    pub fn series(&self, point: GridPoint) -> Vec<f64> {
        self.series_view(point).iter().copied().collect()
    }

    // ========================================================================
    // Sub-selection
    // ========================================================================

    /// Keep time samples in `[start, end)`.
    pub fn slice_time(&self, start: usize, end: usize) -> Result<Self, PhaseLockError> {
        if start >= end || end > self.time_len() {
            return Err(PhaseLockError::InvalidInput(format!(
                "time range [{start}, {end}) outside of [0, {})",
                self.time_len()
            )));
        }
        let data = self.data.slice(s![start..end, .., .., ..]).to_owned();
        Self::new(data, self.lats.clone(), self.lons.clone())
    }

    /// Keep a single vertical level.
    pub fn select_level(&self, level: usize) -> Result<Self, PhaseLockError> {
        if level >= self.num_levels() {
            return Err(PhaseLockError::OutOfBounds {
                axis: "level",
                index: level,
                len: self.num_levels(),
            });
        }
        let data = self.data.slice(s![.., level..level + 1, .., ..]).to_owned();
        Self::new(data, self.lats.clone(), self.lons.clone())
    }
}

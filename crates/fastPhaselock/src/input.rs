//! Conversions from `ndarray` arrays to fields.
//!
//! ## Purpose
//!
//! This module lets loaders hand over arrays of the shapes they naturally
//! produce: a station series `(time)`, a surface field `(time, lat, lon)` or
//! a full field `(time, level, lat, lon)`.
//!
//! ## Design notes
//!
//! * **One trait**: `FieldInput` is implemented for 1-, 3- and 4-dimensional
//!   arrays over any storage.
//! * **Copying**: Data is copied into standard layout, so views and
//!   non-contiguous slices are accepted.
//!
//! ## Invariants
//!
//! * Coordinate lengths must match the lat/lon axes.
//!
//! ## Non-goals
//!
//! * This module does not read files or parse calendars.

// External dependencies
use ndarray::{ArrayBase, Data, Ix1, Ix3, Ix4};

// Export dependencies from phaselock crate
use phaselock::internals::primitives::errors::PhaseLockError;
use phaselock::internals::primitives::field::Field;

/// Arrays that can become a `Field`.
pub trait FieldInput {
    /// Build a field with the given coordinates.
    ///
    /// Station input ignores the coordinates when both are empty.
    fn to_field(&self, lats: &[f64], lons: &[f64]) -> Result<Field, PhaseLockError>;
}

impl<S> FieldInput for ArrayBase<S, Ix1>
where
    S: Data<Elem = f64>,
{
    fn to_field(&self, lats: &[f64], lons: &[f64]) -> Result<Field, PhaseLockError> {
        let field = Field::from_station(self.to_vec())?;
        if lats.is_empty() && lons.is_empty() {
            return Ok(field);
        }
        Field::new(field.into_data(), lats.to_vec(), lons.to_vec())
    }
}

impl<S> FieldInput for ArrayBase<S, Ix3>
where
    S: Data<Elem = f64>,
{
    fn to_field(&self, lats: &[f64], lons: &[f64]) -> Result<Field, PhaseLockError> {
        Field::from_surface(
            self.as_standard_layout().into_owned(),
            lats.to_vec(),
            lons.to_vec(),
        )
    }
}

impl<S> FieldInput for ArrayBase<S, Ix4>
where
    S: Data<Elem = f64>,
{
    fn to_field(&self, lats: &[f64], lons: &[f64]) -> Result<Field, PhaseLockError> {
        Field::new(
            self.as_standard_layout().into_owned(),
            lats.to_vec(),
            lons.to_vec(),
        )
    }
}

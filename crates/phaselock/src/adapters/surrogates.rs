//! Surrogate realizations of a whole field.
//!
//! ## Purpose
//!
//! This module provides `SurrogateGenerator`, which borrows a source field
//! and produces randomized realizations of it under one of four families,
//! fanning the per-point work out through a `GridExecutor`. It also owns the
//! per-point AR model cache used by residual resampling.
//!
//! ## Design notes
//!
//! * **Composition**: The generator borrows the field it randomizes; binding
//!   a new field drops any cached AR models.
//! * **Coordinator randomness**: Angle vectors and per-task seeds are drawn
//!   from the generator's RNG before fan-out, in grid-point order, so a seeded
//!   generator produces the same realization on any executor.
//! * **Missing data**: All-missing points yield all-missing series.
//!
//! ## Key concepts
//!
//! * **Fourier**: One angle vector for the whole field.
//! * **Fourier (spatial)**: One angle vector per grid point.
//! * **Multifractal**: Haar cascade shuffling; needs `2^n` samples.
//! * **Autoregressive**: Prepare once, then resample residuals cheaply.
//!   Realizations are shorter than the source by the largest fitted order.
//!
//! ## Invariants
//!
//! * Realizations share the source's spatial grid and coordinates.
//! * Only the AR family changes the time length.
//!
//! ## Non-goals
//!
//! * This module does not standardize the source field.
//! * This module does not persist realizations.

// External dependencies
use log::{debug, warn};
use ndarray::Axis;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

// Internal dependencies
use crate::adapters::seasonality::Seasonality;
use crate::algorithms::amplitude::amplitude_adjust;
use crate::algorithms::autoregressive::{
    ArFit, ArModel, DEFAULT_BURN_IN, InformationCriterion, fit_ar,
};
use crate::algorithms::fourier::{random_angles, rotate_phases};
use crate::algorithms::multifractal::{
    DEFAULT_RANDOMISE_FROM_SCALE, check_dyadic_length, multifractal_surrogate,
};
use crate::engine::executor::{GridExecutor, PointTask, collect_results};
use crate::engine::output::{SurrogateKind, assemble_series};
use crate::math::stats::{any_nan, nan_mean, nan_std};
use crate::primitives::errors::PhaseLockError;
use crate::primitives::field::{Field, GridPoint};

// ============================================================================
// Configuration
// ============================================================================

/// Parameters of surrogate generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurrogateConfig {
    /// RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,

    /// Coarsest cascade scale that is shuffled.
    pub randomise_from_scale: usize,

    /// Lowest AR order considered.
    pub min_order: usize,

    /// Highest AR order considered.
    pub max_order: usize,

    /// Order selection criterion.
    pub criterion: InformationCriterion,

    /// Discarded AR simulation steps.
    pub burn_in: usize,
}

impl Default for SurrogateConfig {
    fn default() -> Self {
        Self {
            seed: None,
            randomise_from_scale: DEFAULT_RANDOMISE_FROM_SCALE,
            min_order: 1,
            max_order: 1,
            criterion: InformationCriterion::Sbc,
            burn_in: DEFAULT_BURN_IN,
        }
    }
}

// ============================================================================
// AR Model Cache
// ============================================================================

/// Fitted AR models and trimmed residual pools for every grid point.
#[derive(Debug, Clone, PartialEq)]
pub struct ArPreparation {
    grid: [usize; 3],
    models: Vec<Option<ArModel>>,
    residuals: Vec<Vec<f64>>,
    max_order: usize,
}

impl ArPreparation {
    /// Largest fitted order across the grid.
    pub fn max_order(&self) -> usize {
        self.max_order
    }

    /// Model of one point; `None` where the fit failed or data was missing.
    pub fn model(&self, point: GridPoint) -> Option<&ArModel> {
        self.models[point.flat_index(self.grid)].as_ref()
    }

    /// Residual pool of one point, trimmed to the common output length.
    pub fn residuals(&self, point: GridPoint) -> &[f64] {
        &self.residuals[point.flat_index(self.grid)]
    }

    /// Number of points without a model.
    pub fn missing_models(&self) -> usize {
        self.models.iter().filter(|m| m.is_none()).count()
    }
}

// ============================================================================
// Generator
// ============================================================================

/// Produces surrogate realizations of a bound source field.
#[derive(Debug, Clone)]
pub struct SurrogateGenerator<'a> {
    config: SurrogateConfig,
    source: Option<&'a Field>,
    rng: StdRng,
    ar: Option<ArPreparation>,
}

impl<'a> SurrogateGenerator<'a> {
    /// Create an unbound generator.
    pub fn new(config: SurrogateConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            source: None,
            rng,
            ar: None,
        }
    }

    /// Bind the field to randomize, dropping cached AR models.
    pub fn bind(&mut self, source: &'a Field) -> &mut Self {
        self.source = Some(source);
        self.ar = None;
        self
    }

    /// Builder-style [`SurrogateGenerator::bind`].
    pub fn with_source(mut self, source: &'a Field) -> Self {
        self.bind(source);
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &SurrogateConfig {
        &self.config
    }

    /// The bound source field.
    pub fn source(&self) -> Result<&'a Field, PhaseLockError> {
        self.source.ok_or(PhaseLockError::UnboundInput {
            what: "source field",
        })
    }

    /// Cached AR preparation, if any.
    pub fn ar_preparation(&self) -> Option<&ArPreparation> {
        self.ar.as_ref()
    }

    /// Generate one realization of the requested family.
    pub fn generate<E: GridExecutor>(
        &mut self,
        kind: SurrogateKind,
        executor: &E,
    ) -> Result<Field, PhaseLockError> {
        match kind {
            SurrogateKind::Fourier => self.fourier(executor),
            SurrogateKind::FourierSpatial => self.fourier_spatial(executor),
            SurrogateKind::Multifractal => self.multifractal(executor),
            SurrogateKind::Autoregressive => self.autoregressive(executor),
        }
    }

    // ========================================================================
    // Fourier
    // ========================================================================

    /// Fourier surrogate with one angle vector shared by every point.
    pub fn fourier<E: GridExecutor>(&mut self, executor: &E) -> Result<Field, PhaseLockError> {
        let source = self.source()?;
        let angles = random_angles(source.time_len(), &mut self.rng);

        let tasks = source
            .points()
            .map(|p| PointTask::new(p, (source.series(p), angles.clone())))
            .collect();
        let results = executor.map_points(tasks, |(series, angles): (Vec<f64>, Vec<f64>)| {
            rotate_phases(&series, &angles)
        })?;

        source.with_data(assemble_series(source.time_len(), source.grid(), results)?)
    }

    /// Fourier surrogate with independent angles at every point.
    pub fn fourier_spatial<E: GridExecutor>(
        &mut self,
        executor: &E,
    ) -> Result<Field, PhaseLockError> {
        let source = self.source()?;
        let n = source.time_len();

        let tasks = source
            .points()
            .map(|p| PointTask::new(p, (source.series(p), random_angles(n, &mut self.rng))))
            .collect();
        let results = executor.map_points(tasks, |(series, angles): (Vec<f64>, Vec<f64>)| {
            rotate_phases(&series, &angles)
        })?;

        source.with_data(assemble_series(n, source.grid(), results)?)
    }

    // ========================================================================
    // Multifractal
    // ========================================================================

    /// Multifractal cascade surrogate; the time length must be `2^n`.
    pub fn multifractal<E: GridExecutor>(&mut self, executor: &E) -> Result<Field, PhaseLockError> {
        let source = self.source()?;
        check_dyadic_length(source.time_len())?;
        let scale = self.config.randomise_from_scale;

        let tasks = source
            .points()
            .map(|p| PointTask::new(p, (source.series(p), self.rng.r#gen::<u64>())))
            .collect();
        let results = executor.map_points(tasks, move |(series, seed): (Vec<f64>, u64)| {
            let mut rng = StdRng::seed_from_u64(seed);
            multifractal_surrogate(&series, scale, &mut rng)
        })?;

        let results = collect_results(results)?;
        source.with_data(assemble_series(source.time_len(), source.grid(), results)?)
    }

    // ========================================================================
    // Autoregressive
    // ========================================================================

    /// Fit and cache an AR model for every grid point.
    pub fn prepare_autoregressive<E: GridExecutor>(
        &mut self,
        executor: &E,
    ) -> Result<&ArPreparation, PhaseLockError> {
        let source = self.source()?;
        let SurrogateConfig {
            min_order,
            max_order,
            criterion,
            ..
        } = self.config;
        if min_order > max_order {
            return Err(PhaseLockError::InvalidOrderRange {
                min: min_order,
                max: max_order,
            });
        }

        let tasks = source
            .points()
            .map(|p| PointTask::new(p, source.series(p)))
            .collect();
        let results = executor.map_points(tasks, move |series: Vec<f64>| {
            if any_nan(&series) {
                return None;
            }
            match fit_ar(&series, min_order, max_order, criterion) {
                Ok(fit) => Some(fit),
                Err(e) => {
                    warn!("AR fit failed, point treated as missing: {e}");
                    None
                }
            }
        })?;

        let grid = source.grid();
        let mut fits: Vec<Option<ArFit>> = vec![None; source.num_points()];
        for r in results {
            fits[r.point.flat_index(grid)] = r.value;
        }

        let max_fitted = fits
            .iter()
            .flatten()
            .map(|f| f.model.order)
            .max()
            .unwrap_or(0);
        let len = source.time_len() - max_fitted;

        let (models, residuals): (Vec<Option<ArModel>>, Vec<Vec<f64>>) = fits
            .into_iter()
            .map(|fit| match fit {
                Some(ArFit {
                    model,
                    mut residuals,
                }) => {
                    residuals.truncate(len);
                    (Some(model), residuals)
                }
                None => (None, vec![f64::NAN; len]),
            })
            .unzip();

        let prep = ArPreparation {
            grid,
            models,
            residuals,
            max_order: max_fitted,
        };
        debug!(
            "AR preparation: max order {}, {} points without a model",
            prep.max_order,
            prep.missing_models()
        );

        Ok(&*self.ar.insert(prep))
    }

    /// Residual-resampling surrogate from the cached models.
    pub fn autoregressive<E: GridExecutor>(
        &mut self,
        executor: &E,
    ) -> Result<Field, PhaseLockError> {
        let source = self.source()?;
        let prep = self.ar.as_ref().ok_or(PhaseLockError::UnpreparedModel)?;
        let len = source.time_len() - prep.max_order;
        let burn_in = self.config.burn_in;

        let mut tasks = Vec::with_capacity(source.num_points());
        for p in source.points() {
            let args = (
                prep.model(p).cloned(),
                prep.residuals(p).to_vec(),
                self.rng.r#gen::<u64>(),
            );
            tasks.push(PointTask::new(p, args));
        }

        let results = executor.map_points(
            tasks,
            move |(model, mut residuals, seed): (Option<ArModel>, Vec<f64>, u64)| match model {
                Some(model) => {
                    let mut rng = StdRng::seed_from_u64(seed);
                    residuals.shuffle(&mut rng);
                    model.simulate_with_residuals(&residuals, burn_in)
                }
                None => vec![f64::NAN; residuals.len()],
            },
        )?;

        source.with_data(assemble_series(len, source.grid(), results)?)
    }

    // ========================================================================
    // Post-processing
    // ========================================================================

    /// Rank-match the source's values onto a realization's ordering.
    ///
    /// With `seasonality`, the components are reintroduced to the source
    /// before its values are sorted.
    pub fn amplitude_adjust<E: GridExecutor>(
        &self,
        surrogate: &Field,
        seasonality: Option<&Seasonality>,
        executor: &E,
    ) -> Result<Field, PhaseLockError> {
        let source = self.source()?;
        let source = match seasonality {
            Some(s) => s.reintroduce_field(source)?,
            None => source.clone(),
        };
        if source.grid() != surrogate.grid() {
            return Err(PhaseLockError::GridMismatch {
                expected: source.grid(),
                got: surrogate.grid(),
            });
        }

        let tasks = surrogate
            .points()
            .map(|p| PointTask::new(p, (source.series(p), surrogate.series(p))))
            .collect();
        let results = executor.map_points(tasks, |(data, surr): (Vec<f64>, Vec<f64>)| {
            amplitude_adjust(&data, &surr)
        })?;

        let results = collect_results(results)?;
        surrogate.with_data(assemble_series(surrogate.time_len(), surrogate.grid(), results)?)
    }
}

// ============================================================================
// Realization Bookkeeping
// ============================================================================

/// Reintroduce seasonal components to a realization.
pub fn add_seasonality(
    realization: &Field,
    seasonality: &Seasonality,
) -> Result<Field, PhaseLockError> {
    seasonality.reintroduce_field(realization)
}

/// Remove seasonal components from a realization.
pub fn remove_seasonality(
    realization: &Field,
    seasonality: &Seasonality,
) -> Result<Field, PhaseLockError> {
    let mut data = realization.data().to_owned();
    seasonality.remove(&mut data)?;
    realization.with_data(data)
}

/// Zero mean and unit standard deviation (ddof = 1) per point, ignoring NaN.
pub fn center(realization: &Field) -> Result<Field, PhaseLockError> {
    let mut data = realization.data().to_owned();
    for mut lane in data.lanes_mut(Axis(0)) {
        let values = lane.to_vec();
        let (m, s) = (nan_mean(&values), nan_std(&values, 1));
        lane.mapv_inplace(|v| (v - m) / s);
    }
    realization.with_data(data)
}

//! Phase extraction and phase-conditioned statistics over a grid.
//!
//! ## Purpose
//!
//! This module provides `PhaseAnalysis`, the pipeline applied identically to
//! an observed field and to each surrogate realization: extract the
//! oscillatory phase at every grid point, discard a guard band at both
//! ends, and bucket the field's values into phase sectors. It also assembles
//! the surrogate ensemble table and pairwise adjacency matrices.
//!
//! ## Design notes
//!
//! * **One executor**: Every per-point step runs through the `GridExecutor`
//!   passed in, so one pool is reused across all realizations.
//! * **Explicit edges**: Sector edges are computed once at construction and
//!   cloned into each task.
//! * **Sequential outer loop**: Realizations are produced one after another;
//!   only the per-point work fans out.
//!
//! ## Key concepts
//!
//! * **Phase field**: Wrapped (or unwrapped) phase plus amplitude, shaped like
//!   the source.
//! * **Guard band**: Samples dropped from each end after the transform to
//!   suppress edge artifacts.
//! * **Adjacency**: Symmetric matrix over flattened grid points, zero diagonal.
//!
//! ## Invariants
//!
//! * Bin tables have the source grid and exactly `bins` sectors.
//! * Points with all-missing input have all-missing outputs.
//!
//! ## Non-goals
//!
//! * This module does not load data or write results.
//! * This module does not compute significance levels.

// External dependencies
use log::{debug, info};
use ndarray::Array2;
use std::sync::Arc;

// Internal dependencies
use crate::adapters::seasonality::Seasonality;
use crate::adapters::surrogates::SurrogateGenerator;
use crate::algorithms::binning::{BoundaryPolicy, DEFAULT_BINS, bin_edges, sector_statistics};
use crate::algorithms::coherence::CoherenceMeasure;
use crate::algorithms::phase::{filtered_signal, phase_fluctuations, unwrap_phase};
use crate::algorithms::wavelet::{PhaseAmplitude, WaveletConfig, phase_amplitude};
use crate::engine::executor::{GridExecutor, PairTask, PointResult, PointTask};
use crate::engine::output::{
    BinTable, EnsembleTable, ResultRecord, SurrogateKind, assemble_series,
};
use crate::engine::validator::Validator;
use crate::primitives::errors::PhaseLockError;
use crate::primitives::field::Field;

// ============================================================================
// Configuration
// ============================================================================

/// Parameters of the analysis pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    /// Wavelet transform parameters.
    pub wavelet: WaveletConfig,

    /// Number of phase sectors.
    pub bins: usize,

    /// Edge membership rule.
    pub boundary_policy: BoundaryPolicy,

    /// Samples discarded at each end after the transform.
    pub guard_band: usize,
}

impl AnalysisConfig {
    /// Defaults for `period`.
    pub fn new(period: f64) -> Self {
        Self {
            wavelet: WaveletConfig::new(period),
            bins: DEFAULT_BINS,
            boundary_policy: BoundaryPolicy::default(),
            guard_band: 0,
        }
    }
}

// ============================================================================
// Phase Field
// ============================================================================

/// Phase and amplitude of every grid point.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseField {
    /// Phase angles.
    pub phase: Field,

    /// Amplitudes.
    pub amplitude: Field,

    /// Whether `phase` is continuous rather than wrapped to `[-π, π]`.
    pub unwrapped: bool,
}

impl PhaseField {
    /// Time length.
    pub fn time_len(&self) -> usize {
        self.phase.time_len()
    }

    /// Keep samples in `[start, end)` of both phase and amplitude.
    pub fn slice_time(&self, start: usize, end: usize) -> Result<Self, PhaseLockError> {
        Ok(Self {
            phase: self.phase.slice_time(start, end)?,
            amplitude: self.amplitude.slice_time(start, end)?,
            unwrapped: self.unwrapped,
        })
    }

    /// Continuous phase at every point.
    pub fn continuous<E: GridExecutor>(&self, executor: &E) -> Result<Self, PhaseLockError> {
        if self.unwrapped {
            return Ok(self.clone());
        }
        let phase = map_series(&self.phase, executor, |ph| unwrap_phase(&ph))?;
        Ok(Self {
            phase,
            amplitude: self.amplitude.clone(),
            unwrapped: true,
        })
    }

    /// Continuous phase minus a uniform rotation at angular rate `omega`.
    pub fn fluctuations<E: GridExecutor>(
        &self,
        omega: f64,
        executor: &E,
    ) -> Result<Field, PhaseLockError> {
        let continuous = self.continuous(executor)?;
        map_series(&continuous.phase, executor, move |ph| {
            phase_fluctuations(&ph, omega)
        })
    }

    /// Band-filtered signal `A·cos φ` at every point.
    pub fn filtered<E: GridExecutor>(&self, executor: &E) -> Result<Field, PhaseLockError> {
        let tasks = self
            .phase
            .points()
            .map(|p| PointTask::new(p, (self.phase.series(p), self.amplitude.series(p))))
            .collect();
        let results = executor.map_points(tasks, |(ph, amp): (Vec<f64>, Vec<f64>)| {
            filtered_signal(&ph, &amp)
        })?;
        self.phase.with_data(assemble_series(
            self.time_len(),
            self.phase.grid(),
            results,
        )?)
    }
}

/// Apply a per-series map at every point of `field`.
fn map_series<E, F>(field: &Field, executor: &E, f: F) -> Result<Field, PhaseLockError>
where
    E: GridExecutor,
    F: Fn(Vec<f64>) -> Vec<f64> + Send + Sync,
{
    let tasks = field
        .points()
        .map(|p| PointTask::new(p, field.series(p)))
        .collect();
    let results = executor.map_points(tasks, f)?;
    field.with_data(assemble_series(field.time_len(), field.grid(), results)?)
}

// ============================================================================
// Analysis Pipeline
// ============================================================================

/// Phase-conditioned statistics pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseAnalysis {
    config: AnalysisConfig,
    edges: Vec<f64>,
}

impl PhaseAnalysis {
    /// Create a pipeline; parameters are assumed validated.
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            edges: bin_edges(config.bins),
            config,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Sector edges over `[-π, π]`.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    // ========================================================================
    // Stages
    // ========================================================================

    /// Wavelet phase and amplitude at every point.
    pub fn oscillatory_modes<E: GridExecutor>(
        &self,
        field: &Field,
        executor: &E,
    ) -> Result<PhaseField, PhaseLockError> {
        let wavelet = self.config.wavelet;
        let tasks = field
            .points()
            .map(|p| PointTask::new(p, field.series(p)))
            .collect();
        let results =
            executor.map_points(tasks, move |series: Vec<f64>| phase_amplitude(&series, &wavelet))?;

        let (phases, amplitudes): (Vec<_>, Vec<_>) = results
            .into_iter()
            .map(|PointResult { point, value }| {
                let PhaseAmplitude { phase, amplitude } = value;
                (
                    PointResult {
                        point,
                        value: phase,
                    },
                    PointResult {
                        point,
                        value: amplitude,
                    },
                )
            })
            .unzip();

        let (n, grid) = (field.time_len(), field.grid());
        Ok(PhaseField {
            phase: field.with_data(assemble_series(n, grid, phases)?)?,
            amplitude: field.with_data(assemble_series(n, grid, amplitudes)?)?,
            unwrapped: false,
        })
    }

    /// Sector statistics of `values` conditioned on `phase`.
    pub fn conditional_statistics<E: GridExecutor>(
        &self,
        phase: &Field,
        values: &Field,
        executor: &E,
    ) -> Result<BinTable, PhaseLockError> {
        Validator::validate_same_shape(phase, values)?;

        let (edges, policy) = (self.edges.clone(), self.config.boundary_policy);
        let tasks = phase
            .points()
            .map(|p| PointTask::new(p, (phase.series(p), values.series(p))))
            .collect();
        let results = executor.map_points(tasks, move |(ph, vals): (Vec<f64>, Vec<f64>)| {
            sector_statistics(&ph, &vals, &edges, policy)
        })?;

        Ok(BinTable::from_results(phase.grid(), self.config.bins, results))
    }

    /// Modes, guard-band trim and sector statistics of one field.
    pub fn analyse<E: GridExecutor>(
        &self,
        field: &Field,
        executor: &E,
    ) -> Result<BinTable, PhaseLockError> {
        let n = field.time_len();
        let guard = self.config.guard_band;
        Validator::validate_guard_band(guard, n)?;

        let modes = self.oscillatory_modes(field, executor)?;
        let (phase, values) = if guard > 0 {
            (
                modes.phase.slice_time(guard, n - guard)?,
                field.slice_time(guard, n - guard)?,
            )
        } else {
            (modes.phase, field.clone())
        };

        self.conditional_statistics(&phase, &values, executor)
    }

    // ========================================================================
    // Ensembles
    // ========================================================================

    /// Analyse `realizations` surrogates of each family.
    ///
    /// Each realization gets `seasonality` reintroduced (trimmed to its
    /// length) before analysis. AR models are prepared once if the generator
    /// has none cached.
    pub fn surrogate_ensemble<E: GridExecutor>(
        &self,
        generator: &mut SurrogateGenerator<'_>,
        families: &[SurrogateKind],
        realizations: usize,
        seasonality: Option<&Seasonality>,
        executor: &E,
    ) -> Result<EnsembleTable, PhaseLockError> {
        let source = generator.source()?;
        let mut table = EnsembleTable::new(
            families.to_vec(),
            realizations,
            source.grid(),
            self.config.bins,
        );

        info!(
            "surrogate ensemble: {} families x {realizations} realizations on {} workers",
            families.len(),
            executor.workers()
        );

        for (f, &kind) in families.iter().enumerate() {
            if kind == SurrogateKind::Autoregressive && generator.ar_preparation().is_none() {
                generator.prepare_autoregressive(executor)?;
            }

            for r in 0..realizations {
                let mut realization = generator.generate(kind, executor)?;
                if let Some(s) = seasonality {
                    realization = s.reintroduce_field(&realization)?;
                }
                table.insert(f, r, &self.analyse(&realization, executor)?);
            }
            debug!("{kind} surrogates done ({realizations} realizations)");
        }

        info!("surrogate ensemble finished");
        Ok(table)
    }

    /// Wrap outputs in a versioned record.
    pub fn record(&self, data: BinTable, ensemble: Option<EnsembleTable>) -> ResultRecord {
        ResultRecord::new(
            self.config.wavelet.period,
            self.config.boundary_policy,
            data,
            ensemble,
        )
    }

    // ========================================================================
    // Adjacency
    // ========================================================================

    /// Pairwise adjacency of phases; MPC uses the continuous phase.
    pub fn adjacency<E: GridExecutor>(
        &self,
        phases: &PhaseField,
        measure: CoherenceMeasure,
        executor: &E,
    ) -> Result<Array2<f64>, PhaseLockError> {
        if measure.needs_continuous_phase() && !phases.unwrapped {
            let continuous = phases.continuous(executor)?;
            return adjacency_matrix(&continuous.phase, measure, executor);
        }
        adjacency_matrix(&phases.phase, measure, executor)
    }
}

/// Symmetric adjacency matrix over the flattened grid points of `field`.
///
/// Pairs are streamed through the executor's queue strategy.
pub fn adjacency_matrix<E: GridExecutor>(
    field: &Field,
    measure: CoherenceMeasure,
    executor: &E,
) -> Result<Array2<f64>, PhaseLockError> {
    let series: Vec<Vec<f64>> = field.points().map(|p| field.series(p)).collect();
    let series = Arc::new(series);
    let n = series.len();
    let expected = n * n.saturating_sub(1) / 2;

    let tasks = (0..n).flat_map(move |i| {
        let pool = Arc::clone(&series);
        (i + 1..n).map(move |j| PairTask {
            i,
            j,
            args: (pool[i].clone(), pool[j].clone()),
        })
    });

    let results = executor.map_pairs(tasks, expected, move |(a, b): (Vec<f64>, Vec<f64>)| {
        measure.compute(&a, &b)
    })?;

    let mut matrix = Array2::zeros((n, n));
    for (i, j, value) in results {
        matrix[[i, j]] = value;
        matrix[[j, i]] = value;
    }
    Ok(matrix)
}

use rand_distr::Normal;

use crate::config::PhaseNoiseConfig;
use crate::error::{EstimatorError, Result};

use super::noise::{draw_trial_batch, measurement_noise, resolve_seed, sweep_point_rng};
use super::signal::{SignalModel, recovered_angle_degrees};
use super::stats::SampleStats;
use super::sweep::phase_sweep;

/// Statistics for one sweep point
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AngleStatistics {
    /// Noisy in-phase amplitude
    pub in_phase: SampleStats,
    /// Recovered phase angle in degrees
    pub angle: SampleStats,
}

/// The four result series, indexed like the sweep
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultSeries {
    pub mean_in_phase: Vec<f64>,
    pub std_in_phase: Vec<f64>,
    pub mean_angle: Vec<f64>,
    pub std_angle: Vec<f64>,
}

impl ResultSeries {
    pub fn from_points(points: &[AngleStatistics]) -> Self {
        Self {
            mean_in_phase: points.iter().map(|p| p.in_phase.mean).collect(),
            std_in_phase: points.iter().map(|p| p.in_phase.std_dev).collect(),
            mean_angle: points.iter().map(|p| p.angle.mean).collect(),
            std_angle: points.iter().map(|p| p.angle.std_dev).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.mean_in_phase.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean_in_phase.is_empty()
    }
}

/// One row of a finished run, used by the output formatters
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ResultRow {
    pub phase_degrees: f64,
    pub mean_in_phase: f64,
    pub std_in_phase: f64,
    pub mean_angle: f64,
    pub std_angle: f64,
    pub predicted_std_angle: f64,
}

/// Output of a full sweep
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseNoiseResult {
    /// Nominal steady-state phase of each point in degrees
    pub phase_degrees: Vec<f64>,
    pub series: ResultSeries,
    /// First-order prediction of the angle spread at each point
    pub predicted_std_angle: Vec<f64>,
    /// Base seed that reproduces this run
    pub seed: u64,
    pub trials: usize,
    pub noise_std: f64,
    pub in_phase_amplitude: f64,
}

impl PhaseNoiseResult {
    pub fn rows(&self) -> impl Iterator<Item = ResultRow> + '_ {
        (0..self.phase_degrees.len()).map(move |i| ResultRow {
            phase_degrees: self.phase_degrees[i],
            mean_in_phase: self.series.mean_in_phase[i],
            std_in_phase: self.series.std_in_phase[i],
            mean_angle: self.series.mean_angle[i],
            std_angle: self.series.std_angle[i],
            predicted_std_angle: self.predicted_std_angle[i],
        })
    }
}

/// Monte-Carlo estimator of amplitude and phase spread across a phase sweep.
///
/// For every nominal phase `a` the quadrature amplitude is set to
/// `I * tan(a)`, both components receive independent Gaussian noise, and the
/// phase is recovered with the single-argument arctangent. Degenerate inputs
/// are not guarded; NaN and infinities flow into the result series.
///
/// # Example
/// ```
/// use phasenoise::config::PhaseNoiseConfig;
/// use phasenoise::simulation::PhaseNoiseEstimator;
///
/// let mut config = PhaseNoiseConfig::default();
/// config.noise.seed = Some(1);
/// let result = PhaseNoiseEstimator::new(&config).unwrap().estimate();
/// assert_eq!(result.series.len(), 91);
/// ```
#[derive(Debug, Clone)]
pub struct PhaseNoiseEstimator {
    model: SignalModel,
    noise: Normal<f64>,
    noise_std: f64,
    trials: usize,
    sweep: Vec<f64>,
    seed: u64,
}

impl PhaseNoiseEstimator {
    pub fn new(config: &PhaseNoiseConfig) -> Result<Self> {
        config.validate()?;

        let seed = resolve_seed(config.noise.seed);
        if config.noise.seed.is_none() {
            log::debug!("No seed configured, drew {}", seed);
        }

        let sweep = phase_sweep(&config.sweep);
        log::info!(
            "Phase sweep {:.1}-{:.1}° ({} points), {} trials, noise σ={}, I={}",
            config.sweep.start_degrees,
            config.sweep.stop_degrees,
            sweep.len(),
            config.noise.trials,
            config.noise.std_dev,
            config.signal.in_phase_amplitude
        );

        Ok(Self {
            model: SignalModel::new(config.signal.in_phase_amplitude),
            noise: measurement_noise(config.noise.std_dev)?,
            noise_std: config.noise.std_dev,
            trials: config.noise.trials,
            sweep,
            seed,
        })
    }

    pub fn sweep(&self) -> &[f64] {
        &self.sweep
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn model(&self) -> &SignalModel {
        &self.model
    }

    /// Simulate the sweep point at `index`.
    ///
    /// Depends only on the base seed and `index`.
    pub fn estimate_point(&self, index: usize) -> AngleStatistics {
        let phase = self.sweep[index];
        let mut rng = sweep_point_rng(self.seed, index);
        let batch = draw_trial_batch(self.model.phasor(phase), &self.noise, self.trials, &mut rng);

        let angles: Vec<f64> = batch
            .in_phase
            .iter()
            .zip(batch.quadrature.iter())
            .map(|(&r, &q)| recovered_angle_degrees(r, q))
            .collect();

        let stats = AngleStatistics {
            in_phase: SampleStats::from_samples(&batch.in_phase),
            angle: SampleStats::from_samples(&angles),
        };

        log::trace!(
            "{:5.1}°: I μ={:.4} σ={:.4}, angle μ={:.3}° σ={:.3}°",
            phase,
            stats.in_phase.mean,
            stats.in_phase.std_dev,
            stats.angle.mean,
            stats.angle.std_dev
        );
        if !(stats.angle.mean.is_finite() && stats.angle.std_dev.is_finite()) {
            log::warn!("Non-finite angle statistics at {}°", phase);
        }

        stats
    }

    /// Run the whole sweep on the calling thread
    pub fn estimate(&self) -> PhaseNoiseResult {
        let points: Vec<AngleStatistics> = (0..self.sweep.len())
            .map(|i| self.estimate_point(i))
            .collect();
        self.finish(&points)
    }

    /// Run the sweep across `workers` threads.
    ///
    /// Produces exactly the same result as [`estimate`](Self::estimate) for
    /// the same seed.
    pub fn estimate_parallel(&self, workers: usize) -> Result<PhaseNoiseResult> {
        let n = self.sweep.len();
        let workers = workers.clamp(1, n.max(1));
        log::debug!("Estimating {} points on {} workers", n, workers);

        let (tx, rx) = crossbeam_channel::bounded::<(usize, AngleStatistics)>(n);

        std::thread::scope(|scope| {
            for worker in 0..workers {
                let tx = tx.clone();
                scope.spawn(move || {
                    for index in (worker..n).step_by(workers) {
                        if tx.send((index, self.estimate_point(index))).is_err() {
                            break;
                        }
                    }
                });
            }
        });
        drop(tx);

        let mut slots: Vec<Option<AngleStatistics>> = vec![None; n];
        for (index, stats) in rx.iter() {
            slots[index] = Some(stats);
        }

        let points = slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| {
                slot.ok_or_else(|| EstimatorError::Worker(format!("sweep point {} missing", i)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(self.finish(&points))
    }

    fn finish(&self, points: &[AngleStatistics]) -> PhaseNoiseResult {
        PhaseNoiseResult {
            phase_degrees: self.sweep.clone(),
            series: ResultSeries::from_points(points),
            predicted_std_angle: self
                .sweep
                .iter()
                .map(|&a| self.model.predicted_angle_std_degrees(a, self.noise_std))
                .collect(),
            seed: self.seed,
            trials: self.trials,
            noise_std: self.noise_std,
            in_phase_amplitude: self.model.in_phase_amplitude,
        }
    }
}

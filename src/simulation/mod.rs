mod estimator;
mod noise;
mod signal;
mod stats;
mod sweep;

pub use estimator::{
    AngleStatistics, PhaseNoiseEstimator, PhaseNoiseResult, ResultRow, ResultSeries,
};
pub use noise::{
    NoisyTrialBatch, draw_trial_batch, measurement_noise, resolve_seed, sweep_point_rng,
};
pub use signal::{SignalModel, recovered_angle_degrees};
pub use stats::{SampleStats, mean, population_std_dev};
pub use sweep::phase_sweep;

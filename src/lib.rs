pub mod config;
pub mod error;
pub mod output;
pub mod simulation;

pub use config::PhaseNoiseConfig;
pub use error::{EstimatorError, Result};
pub use simulation::{PhaseNoiseEstimator, PhaseNoiseResult, ResultSeries};

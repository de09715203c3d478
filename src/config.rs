//! Configuration for the phase noise study.
//!
//! Defaults reproduce the reference experiment: 91 phase points over
//! 0-90°, unit in-phase amplitude, 1000 trials per point and a noise
//! standard deviation of 0.1.
//!
//! Every section can be loaded from TOML, with missing keys falling back
//! to the defaults:
//!
//! ```toml
//! [sweep]
//! start_degrees = 0.0
//! stop_degrees = 90.0
//! count = 91
//!
//! [noise]
//! std_dev = 0.1
//! trials = 1000
//! seed = 42
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{EstimatorError, Result};

/// Top-level configuration
///
/// # Example
/// ```
/// use phasenoise::config::PhaseNoiseConfig;
///
/// let mut config = PhaseNoiseConfig::default();
/// config.noise.trials = 10_000;
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PhaseNoiseConfig {
    /// Steady-state phase sweep
    pub sweep: SweepConfig,
    /// Drive signal model
    pub signal: SignalConfig,
    /// Measurement noise model
    pub noise: NoiseConfig,
    /// Rendering style handed to plot consumers
    pub plot: PlotStyle,
}

/// Evenly spaced sweep of the nominal phase, endpoints inclusive
///
/// # Parsing format
/// `start-stop:count`, e.g. `0-90:91`. Omitting `:count` keeps 91 points.
///
/// ```
/// use phasenoise::config::SweepConfig;
///
/// let sweep: SweepConfig = "10-80:8".parse().unwrap();
/// assert_eq!(sweep.count, 8);
/// assert_eq!(sweep.stop_degrees, 80.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// First phase point in degrees
    pub start_degrees: f64,
    /// Last phase point in degrees
    pub stop_degrees: f64,
    /// Number of phase points
    pub count: usize,
}

/// Noise-free drive signal
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    /// Fixed in-phase (real) drive amplitude
    pub in_phase_amplitude: f64,
}

/// Additive Gaussian measurement noise
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Standard deviation of the noise added to each component
    pub std_dev: f64,
    /// Monte-Carlo trials per phase point
    pub trials: usize,
    /// Base seed; `None` draws a fresh one per run
    pub seed: Option<u64>,
}

/// Write-once rendering options for plot consumers
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    /// Stroke width of every series line
    pub line_width: f32,
    /// RGB colors cycled across series
    pub palette: Vec<[u8; 3]>,
    /// When set, the rendered table is also written here
    pub save_path: Option<PathBuf>,
}

impl PhaseNoiseConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Reject parameter combinations the estimator cannot run with.
    ///
    /// Numeric degeneracy inside the sweep (e.g. a zero in-phase
    /// amplitude) is not an error; it shows up as NaN in the results.
    pub fn validate(&self) -> Result<()> {
        self.sweep.validate()?;

        if !self.signal.in_phase_amplitude.is_finite() {
            return Err(EstimatorError::Config(format!(
                "in-phase amplitude must be finite, got {}",
                self.signal.in_phase_amplitude
            )));
        }
        if !(self.noise.std_dev.is_finite() && self.noise.std_dev >= 0.0) {
            return Err(EstimatorError::Config(format!(
                "noise std_dev must be finite and non-negative, got {}",
                self.noise.std_dev
            )));
        }
        if self.noise.trials == 0 {
            return Err(EstimatorError::Config(
                "trials must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl SweepConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.start_degrees.is_finite() && self.stop_degrees.is_finite()) {
            return Err(EstimatorError::Config(format!(
                "sweep bounds must be finite, got {}-{}",
                self.start_degrees, self.stop_degrees
            )));
        }
        if self.stop_degrees < self.start_degrees {
            return Err(EstimatorError::Config(format!(
                "sweep stop {} is below start {}",
                self.stop_degrees, self.start_degrees
            )));
        }
        if self.count == 0 {
            return Err(EstimatorError::Config(
                "sweep needs at least one point".to_string(),
            ));
        }
        // Points must be strictly increasing
        if self.count > 1 && self.stop_degrees <= self.start_degrees {
            return Err(EstimatorError::Config(format!(
                "sweep of {} points needs stop above start, got {}-{}",
                self.count, self.start_degrees, self.stop_degrees
            )));
        }
        Ok(())
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            start_degrees: 0.0,
            stop_degrees: 90.0,
            count: 91,
        }
    }
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            in_phase_amplitude: 1.0,
        }
    }
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            std_dev: 0.1,
            trials: 1000,
            seed: None,
        }
    }
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            line_width: 2.0,
            // red, black, cyan
            palette: vec![[255, 0, 0], [0, 0, 0], [0, 191, 191]],
            save_path: None,
        }
    }
}

impl PlotStyle {
    /// Color for the `index`-th series, cycling through the palette
    pub fn color(&self, index: usize) -> [u8; 3] {
        if self.palette.is_empty() {
            return [0, 0, 0];
        }
        self.palette[index % self.palette.len()]
    }
}

impl fmt::Display for SweepConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}:{}",
            self.start_degrees, self.stop_degrees, self.count
        )
    }
}

impl FromStr for SweepConfig {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();

        let (range, count) = match s.split_once(':') {
            Some((range, count)) => {
                let count: usize = count
                    .trim()
                    .parse()
                    .map_err(|_| format!("invalid point count: {}", s))?;
                (range, count)
            }
            None => (s, SweepConfig::default().count),
        };

        // Skip the first character so a leading minus sign is not taken as
        // the separator
        let split = range
            .char_indices()
            .skip(1)
            .find(|&(_, c)| c == '-')
            .map(|(i, _)| i)
            .ok_or_else(|| format!("invalid sweep, expected start-stop[:count]: {}", s))?;

        let start: f64 = range[..split]
            .trim()
            .parse()
            .map_err(|_| format!("invalid sweep start: {}", s))?;
        let stop: f64 = range[split + 1..]
            .trim()
            .parse()
            .map_err(|_| format!("invalid sweep stop: {}", s))?;

        let sweep = SweepConfig {
            start_degrees: start,
            stop_degrees: stop,
            count,
        };
        sweep.validate().map_err(|e| e.to_string())?;
        Ok(sweep)
    }
}

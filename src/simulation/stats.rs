/// Mean and population standard deviation of one batch
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SampleStats {
    pub mean: f64,
    pub std_dev: f64,
}

impl SampleStats {
    /// NaN or infinite samples propagate into both fields.
    pub fn from_samples(samples: &[f64]) -> Self {
        let mean = mean(samples);
        Self {
            mean,
            std_dev: population_std_dev(samples, mean),
        }
    }
}

pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return f64::NAN;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Standard deviation normalized by N, not N - 1
pub fn population_std_dev(samples: &[f64], mean: f64) -> f64 {
    if samples.is_empty() {
        return f64::NAN;
    }
    let variance = samples
        .iter()
        .map(|&x| (x - mean) * (x - mean))
        .sum::<f64>()
        / samples.len() as f64;
    variance.sqrt()
}

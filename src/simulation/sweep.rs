use crate::config::SweepConfig;

/// Evenly spaced phase points in degrees, both endpoints included.
///
/// The last point is pinned to `stop_degrees` so accumulated rounding never
/// leaves the sweep short of its end. A single-point sweep holds only the
/// start.
pub fn phase_sweep(config: &SweepConfig) -> Vec<f64> {
    let n = config.count;
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![config.start_degrees];
    }

    let step = (config.stop_degrees - config.start_degrees) / (n - 1) as f64;
    let mut points: Vec<f64> = (0..n)
        .map(|i| config.start_degrees + i as f64 * step)
        .collect();
    points[n - 1] = config.stop_degrees;
    points
}

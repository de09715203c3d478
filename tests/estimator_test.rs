use approx::assert_abs_diff_eq;

use phasenoise::config::{PhaseNoiseConfig, SweepConfig};
use phasenoise::simulation::{PhaseNoiseEstimator, PhaseNoiseResult, SignalModel};

fn run(sweep: SweepConfig, trials: usize, seed: u64) -> PhaseNoiseResult {
    let mut config = PhaseNoiseConfig::default();
    config.sweep = sweep;
    config.noise.trials = trials;
    config.noise.seed = Some(seed);
    PhaseNoiseEstimator::new(&config)
        .unwrap()
        .estimate_parallel(4)
        .unwrap()
}

fn single_point(degrees: f64) -> SweepConfig {
    SweepConfig {
        start_degrees: degrees,
        stop_degrees: degrees,
        count: 1,
    }
}

#[test]
fn test_ideal_quadrature_matches_tangent_across_sweep() {
    let model = SignalModel::new(1.0);
    let estimator = PhaseNoiseEstimator::new(&PhaseNoiseConfig::default()).unwrap();
    for (i, &a) in estimator.sweep().iter().enumerate() {
        assert_abs_diff_eq!(a, i as f64, epsilon = 1e-12);
        if i < 90 {
            assert_abs_diff_eq!(
                model.quadrature_amplitude(a),
                (i as f64).to_radians().tan(),
                epsilon = 1e-9
            );
        }
    }
}

#[test]
fn test_in_phase_statistics_converge() {
    let sweep = SweepConfig {
        start_degrees: 0.0,
        stop_degrees: 90.0,
        count: 7,
    };
    let result = run(sweep, 200_000, 17);

    println!("\n{:>6} {:>10} {:>10}", "phase", "I mean", "I std");
    for row in result.rows() {
        println!(
            "{:>6.1} {:>10.5} {:>10.5}",
            row.phase_degrees, row.mean_in_phase, row.std_in_phase
        );
        assert_abs_diff_eq!(row.mean_in_phase, 1.0, epsilon = 0.002);
        assert_abs_diff_eq!(row.std_in_phase, 0.1, epsilon = 0.002);
    }
}

#[test]
fn test_angle_statistics_at_45_degrees() {
    let result = run(single_point(45.0), 200_000, 23);
    let predicted = (0.1 / 2.0_f64.sqrt()).to_degrees();

    println!(
        "45°: mean {:.4}°, std {:.4}° (first order {:.4}°)",
        result.series.mean_angle[0], result.series.std_angle[0], predicted
    );

    assert_abs_diff_eq!(result.series.mean_angle[0], 45.0, epsilon = 0.1);
    assert_abs_diff_eq!(result.series.std_angle[0], predicted, epsilon = 0.1);
    assert_abs_diff_eq!(result.predicted_std_angle[0], predicted, epsilon = 1e-12);
}

#[test]
fn test_angle_spread_tracks_first_order_prediction() {
    let sweep = SweepConfig {
        start_degrees: 0.0,
        stop_degrees: 80.0,
        count: 9,
    };
    let result = run(sweep, 50_000, 29);

    for row in result.rows() {
        let tolerance = 0.05 * row.predicted_std_angle + 0.05;
        assert!(
            (row.std_angle - row.predicted_std_angle).abs() < tolerance,
            "phase {}: std {} vs predicted {}",
            row.phase_degrees,
            row.std_angle,
            row.predicted_std_angle
        );
    }
}

#[test]
fn test_mean_angle_non_decreasing() {
    let result = run(SweepConfig::default(), 10_000, 31);
    for (i, w) in result.series.mean_angle.windows(2).enumerate() {
        assert!(
            w[1] >= w[0],
            "mean angle decreased between {}° and {}°: {} -> {}",
            i,
            i + 1,
            w[0],
            w[1]
        );
    }
}

#[test]
fn test_zero_phase_mean_near_zero() {
    let result = run(single_point(0.0), 100_000, 37);
    assert_abs_diff_eq!(result.series.mean_angle[0], 0.0, epsilon = 0.1);
    assert_abs_diff_eq!(
        result.series.std_angle[0],
        0.1_f64.to_degrees(),
        epsilon = 0.15
    );
}

#[test]
fn test_ninety_degrees_saturates_without_error() {
    let result = run(single_point(90.0), 1000, 41);

    assert!(result.series.mean_angle[0].is_finite());
    assert!(result.series.std_angle[0].is_finite());
    assert_abs_diff_eq!(result.series.mean_angle[0], 90.0, epsilon = 1e-6);
    assert!(result.series.std_angle[0] < 1e-6);
    assert_abs_diff_eq!(result.series.mean_in_phase[0], 1.0, epsilon = 0.02);
}

#[test]
fn test_degenerate_signal_propagates_nan() {
    let mut config = PhaseNoiseConfig::default();
    config.sweep = single_point(0.0);
    config.signal.in_phase_amplitude = 0.0;
    config.noise.std_dev = 0.0;
    config.noise.trials = 10;
    config.noise.seed = Some(1);

    let result = PhaseNoiseEstimator::new(&config).unwrap().estimate();

    assert_eq!(result.series.mean_in_phase[0], 0.0);
    assert!(result.series.mean_angle[0].is_nan());
    assert!(result.series.std_angle[0].is_nan());
}

#[test]
fn test_reference_run_lands_in_plot_ranges() {
    let result = run(SweepConfig::default(), 1000, 43);

    for row in result.rows().filter(|r| r.phase_degrees < 90.0) {
        assert!((0.98..=1.02).contains(&row.mean_in_phase));
        assert!((0.085..=0.115).contains(&row.std_in_phase));
        assert!((-1.0..=90.0).contains(&row.mean_angle));
        assert!((0.0..=6.5).contains(&row.std_angle));
    }
}

#[test]
fn test_unseeded_runs_report_their_seed() {
    let config = PhaseNoiseConfig::default();
    let first = PhaseNoiseEstimator::new(&config).unwrap();

    let mut replay = config.clone();
    replay.noise.seed = Some(first.seed());
    let second = PhaseNoiseEstimator::new(&replay).unwrap();

    assert_eq!(first.estimate_point(10), second.estimate_point(10));
}

#[test]
fn test_reference_config_file_matches_defaults() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("configs/reference.toml");
    let config = PhaseNoiseConfig::from_toml_file(&path).unwrap();
    let defaults = PhaseNoiseConfig::default();

    assert_eq!(config.sweep, defaults.sweep);
    assert_eq!(config.signal, defaults.signal);
    assert_eq!(config.noise, defaults.noise);
    assert_eq!(config.plot, defaults.plot);
}

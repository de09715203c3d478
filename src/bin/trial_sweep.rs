use clap::Parser;
use rolling_stats::Stats;

use phasenoise::config::PhaseNoiseConfig;
use phasenoise::simulation::PhaseNoiseEstimator;

/// Print how the estimates converge as the trial count grows
#[derive(Parser, Debug)]
#[command(name = "trial_sweep")]
#[command(about = "Convergence of phase noise estimates versus trial count")]
struct Args {
    /// Base seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Largest trial count, swept in decades from 10
    #[arg(long, default_value_t = 100_000)]
    max_trials: usize,

    /// Worker threads
    #[arg(short, long, default_value_t = 4)]
    workers: usize,
}

/// Decades 10, 100, ... up to `max_trials`, stopping before overflow
fn trial_counts(max_trials: usize) -> Vec<usize> {
    std::iter::successors(Some(10usize), |&n| n.checked_mul(10))
        .take_while(|&n| n <= max_trials)
        .collect()
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    println!("trials,std_excess_max,in_phase_mean_spread,angle_bias_max");

    for trials in trial_counts(args.max_trials) {
        let mut config = PhaseNoiseConfig::default();
        config.noise.trials = trials;
        config.noise.seed = Some(args.seed);

        let estimator = PhaseNoiseEstimator::new(&config)?;
        let result = estimator.estimate_parallel(args.workers)?;

        let mut std_excess: Stats<f64> = Stats::new();
        let mut in_phase_mean: Stats<f64> = Stats::new();
        let mut angle_bias: Stats<f64> = Stats::new();

        for row in result.rows() {
            std_excess.update((row.std_angle - row.predicted_std_angle).abs());
            in_phase_mean.update(row.mean_in_phase);
            angle_bias.update((row.mean_angle - row.phase_degrees).abs());
        }

        println!(
            "{},{:.4},{:.5},{:.4}",
            trials, std_excess.max, in_phase_mean.std_dev, angle_bias.max
        );
    }

    Ok(())
}

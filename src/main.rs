use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use phasenoise::config::{PhaseNoiseConfig, SweepConfig};
use phasenoise::output::{OutputFormat, create_formatter};
use phasenoise::simulation::PhaseNoiseEstimator;

#[derive(Parser, Debug)]
#[command(name = "phasenoise")]
#[command(about = "Monte-Carlo phase deviation of a noise-driven oscillator", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Phase sweep as start-stop:count (e.g., "0-90:91")
    #[arg(long)]
    sweep: Option<SweepConfig>,

    /// Monte-Carlo trials per phase point
    #[arg(short, long)]
    trials: Option<usize>,

    /// Measurement noise standard deviation
    #[arg(long)]
    noise_std: Option<f64>,

    /// In-phase drive amplitude
    #[arg(long)]
    amplitude: Option<f64>,

    /// Seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Worker threads (1 runs on the main thread)
    #[arg(short, long, default_value_t = 1)]
    workers: usize,

    /// Output format: text, csv, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Write the table to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut config = match &args.config {
        Some(path) => PhaseNoiseConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => PhaseNoiseConfig::default(),
    };

    if let Some(sweep) = args.sweep {
        config.sweep = sweep;
    }
    if let Some(trials) = args.trials {
        config.noise.trials = trials;
    }
    if let Some(noise_std) = args.noise_std {
        config.noise.std_dev = noise_std;
    }
    if let Some(amplitude) = args.amplitude {
        config.signal.in_phase_amplitude = amplitude;
    }
    if args.seed.is_some() {
        config.noise.seed = args.seed;
    }
    if args.output.is_some() {
        config.plot.save_path = args.output.clone();
    }

    let estimator = PhaseNoiseEstimator::new(&config)?;
    let result = if args.workers > 1 {
        estimator.estimate_parallel(args.workers)?
    } else {
        estimator.estimate()
    };

    let formatter = create_formatter(args.format, args.verbose > 0);
    let rendered = formatter.format(&result)?;

    match &config.plot.save_path {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote {} points to {}", result.series.len(), path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

mod csv;
mod json;
mod text;

use chrono::Utc;

use crate::error::Result;
use crate::simulation::PhaseNoiseResult;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Csv,
    Json,
}

/// Renders a finished sweep as a complete document
pub trait Formatter: Send {
    fn format(&self, result: &PhaseNoiseResult) -> Result<String>;
}

pub fn create_formatter(format: OutputFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose)),
        OutputFormat::Csv => Box::new(CsvFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PhaseNoiseConfig;
    use crate::simulation::PhaseNoiseEstimator;

    fn small_result() -> PhaseNoiseResult {
        let mut config = PhaseNoiseConfig::default();
        config.sweep.count = 4;
        config.sweep.stop_degrees = 60.0;
        config.noise.trials = 50;
        config.noise.seed = Some(9);
        PhaseNoiseEstimator::new(&config).unwrap().estimate()
    }

    #[test]
    fn test_csv_has_header_and_one_line_per_point() {
        let out = create_formatter(OutputFormat::Csv, false)
            .format(&small_result())
            .unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("phase_deg,"));
        assert!(lines[1].starts_with("0.000,"));
        assert!(lines[4].starts_with("60.000,"));
        assert_eq!(lines[2].split(',').count(), 6);
    }

    #[test]
    fn test_json_round_trips_through_serde() {
        let result = small_result();
        let out = create_formatter(OutputFormat::Json, false)
            .format(&result)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["seed"], 9);
        assert_eq!(value["trials"], 50);
        assert_eq!(value["rows"].as_array().unwrap().len(), 4);
        assert!(value["generated"].is_string());
    }

    #[test]
    fn test_text_verbose_adds_prediction_column() {
        let result = small_result();
        let terse = create_formatter(OutputFormat::Text, false)
            .format(&result)
            .unwrap();
        let verbose = create_formatter(OutputFormat::Text, true)
            .format(&result)
            .unwrap();
        assert!(!terse.contains("pred"));
        assert!(verbose.contains("pred"));
        assert!(terse.contains("seed 9"));
    }
}

use serde::Serialize;

use super::{Formatter, iso8601_timestamp};
use crate::error::Result;
use crate::simulation::{PhaseNoiseResult, ResultRow};

pub struct JsonFormatter;

#[derive(Serialize)]
struct Report {
    generated: String,
    seed: u64,
    trials: usize,
    noise_std: f64,
    in_phase_amplitude: f64,
    rows: Vec<ResultRow>,
}

impl Formatter for JsonFormatter {
    /// Non-finite statistics serialize as `null`.
    fn format(&self, result: &PhaseNoiseResult) -> Result<String> {
        let report = Report {
            generated: iso8601_timestamp(),
            seed: result.seed,
            trials: result.trials,
            noise_std: result.noise_std,
            in_phase_amplitude: result.in_phase_amplitude,
            rows: result.rows().collect(),
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }
}

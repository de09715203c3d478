use super::Formatter;
use crate::error::Result;
use crate::simulation::PhaseNoiseResult;

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, result: &PhaseNoiseResult) -> Result<String> {
        let mut out = format!(
            "Phase noise: I={}, σ={}, {} trials, seed {}\n",
            result.in_phase_amplitude, result.noise_std, result.trials, result.seed
        );

        if self.verbose {
            out.push_str(&format!(
                "{:>7} {:>9} {:>9} {:>9} {:>8} {:>8}\n",
                "phase", "I μ", "I σ", "angle μ", "angle σ", "pred σ"
            ));
        } else {
            out.push_str(&format!(
                "{:>7} {:>9} {:>9} {:>9} {:>8}\n",
                "phase", "I μ", "I σ", "angle μ", "angle σ"
            ));
        }

        for row in result.rows() {
            let line = if self.verbose {
                format!(
                    "{:>6.1}° {:>9.5} {:>9.5} {:>8.3}° {:>7.3}° {:>7.3}°\n",
                    row.phase_degrees,
                    row.mean_in_phase,
                    row.std_in_phase,
                    row.mean_angle,
                    row.std_angle,
                    row.predicted_std_angle
                )
            } else {
                format!(
                    "{:>6.1}° {:>9.5} {:>9.5} {:>8.3}° {:>7.3}°\n",
                    row.phase_degrees,
                    row.mean_in_phase,
                    row.std_in_phase,
                    row.mean_angle,
                    row.std_angle
                )
            };
            out.push_str(&line);
        }
        Ok(out)
    }
}

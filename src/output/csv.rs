use super::Formatter;
use crate::error::Result;
use crate::simulation::PhaseNoiseResult;

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, result: &PhaseNoiseResult) -> Result<String> {
        let mut out = String::from(
            "phase_deg,mean_in_phase,std_in_phase,mean_angle_deg,std_angle_deg,predicted_std_angle_deg\n",
        );
        for row in result.rows() {
            out.push_str(&format!(
                "{:.3},{:.6},{:.6},{:.4},{:.4},{:.4}\n",
                row.phase_degrees,
                row.mean_in_phase,
                row.std_in_phase,
                row.mean_angle,
                row.std_angle,
                row.predicted_std_angle
            ));
        }
        Ok(out)
    }
}

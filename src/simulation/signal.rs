use num_complex::Complex64;

/// Drive signal with a fixed in-phase amplitude.
///
/// The quadrature component is set by the steady-state phase: it does no
/// work on the resonator but shifts its frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalModel {
    pub in_phase_amplitude: f64,
}

impl SignalModel {
    pub fn new(in_phase_amplitude: f64) -> Self {
        Self { in_phase_amplitude }
    }

    /// Ideal quadrature amplitude at `phase_degrees`.
    ///
    /// Not guarded at 90°: in double precision `tan(π/2)` is about 1.633e16
    /// rather than infinite, and that value flows through unchanged.
    pub fn quadrature_amplitude(&self, phase_degrees: f64) -> f64 {
        self.in_phase_amplitude * phase_degrees.to_radians().tan()
    }

    /// Noise-free I/Q phasor at `phase_degrees`
    pub fn phasor(&self, phase_degrees: f64) -> Complex64 {
        Complex64::new(
            self.in_phase_amplitude,
            self.quadrature_amplitude(phase_degrees),
        )
    }

    /// First-order prediction of the recovered angle spread in degrees.
    ///
    /// Linear error propagation through `atan(q / r)` with independent noise
    /// of `noise_std` on both components gives `noise_std / |v|` radians,
    /// which is `noise_std * cos(phase) / in_phase_amplitude`.
    pub fn predicted_angle_std_degrees(&self, phase_degrees: f64, noise_std: f64) -> f64 {
        (noise_std / self.phasor(phase_degrees).norm()).to_degrees()
    }
}

/// Phase recovered from one noisy I/Q pair, in degrees.
///
/// Uses the single-argument arctangent, so the result is folded into
/// (-90°, 90°). That is only faithful while both components stay positive,
/// which holds for the 0-90° sweep except in the far noise tails.
pub fn recovered_angle_degrees(in_phase: f64, quadrature: f64) -> f64 {
    (quadrature / in_phase).atan().to_degrees()
}

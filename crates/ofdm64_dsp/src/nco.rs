use num::complex::Complex32;

// SOURCE: https://mooooo.ooo/chebyshev-sine-approximation
//         Chebyshev polynomial that approximates f(x) = sin(2*pi*x) accurately within [-0.75,+0.75]
fn fast_sine(x: f32) -> f32 {
    const A0: f32 = -25.1327419281005859375;
    const A1: f32 =  64.83582305908203125;
    const A2: f32 = -67.076629638671875;
    const A3: f32 =  38.495880126953125;
    const A4: f32 = -14.049663543701171875;
    const A5: f32 =  3.161602020263671875;

    let z = x*x;
    let b5 = A5;
    let b4 = b5*z + A4;
    let b3 = b4*z + A3;
    let b2 = b3*z + A2;
    let b1 = b2*z + A1;
    let b0 = b1*z + A0;

    b0 * (z-0.25) * x
}

// Returns exp(j*2*pi*x) for any x by folding into the approximation's valid range.
fn fast_cis(x_turns: f32) -> Complex32 {
    let dt_offset = (x_turns.abs() - 0.5).ceil() * x_turns.signum();
    let dt = x_turns - dt_offset;
    let sin = fast_sine(dt);
    let cos = fast_sine(dt + 0.25);
    Complex32::new(cos, sin)
}

/// Numerically controlled oscillator: a phase accumulator driving a complex phasor.
///
/// Frequency and phase are both stored in turns (cycles per sample / cycles), not
/// radians, so that `mix_up` can lean on the same Chebyshev sine approximation the
/// rest of the crate uses for phase rotation.
#[derive(Debug, Clone)]
pub struct Nco {
    phase_turns: f32,
    freq_turns: f32,
}

impl Default for Nco {
    fn default() -> Self {
        Self::new()
    }
}

impl Nco {
    pub fn new() -> Self {
        Self {
            phase_turns: 0.0,
            freq_turns: 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.phase_turns = 0.0;
        self.freq_turns = 0.0;
    }

    /// Sets the oscillator frequency, in radians per sample.
    pub fn set_frequency(&mut self, freq_rad: f32) {
        self.freq_turns = freq_rad / std::f32::consts::TAU;
    }

    /// Adds `delta_rad` radians per sample to the current frequency.
    pub fn adjust_frequency(&mut self, delta_rad: f32) {
        self.freq_turns += delta_rad / std::f32::consts::TAU;
    }

    /// Current oscillator frequency, in radians per sample.
    pub fn frequency(&self) -> f32 {
        self.freq_turns * std::f32::consts::TAU
    }

    pub fn set_phase(&mut self, phase_rad: f32) {
        self.phase_turns = phase_rad / std::f32::consts::TAU;
    }

    /// Multiplies `x` by `exp(-j*phase)` and advances the phase accumulator by one sample.
    pub fn mix_up(&mut self, x: Complex32) -> Complex32 {
        let rotor = fast_cis(self.phase_turns).conj();
        self.phase_turns += self.freq_turns;
        x * rotor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_frequency_leaves_samples_unrotated() {
        let mut nco = Nco::new();
        let x = Complex32::new(0.3, -0.7);
        let y = nco.mix_up(x);
        assert!((y - x).norm() < 1e-3);
    }

    #[test]
    fn reset_clears_phase_and_frequency() {
        let mut nco = Nco::new();
        nco.set_frequency(0.2);
        nco.mix_up(Complex32::new(1.0, 0.0));
        nco.reset();
        assert_eq!(nco.frequency(), 0.0);
        let y = nco.mix_up(Complex32::new(1.0, 0.0));
        assert!((y - Complex32::new(1.0, 0.0)).norm() < 1e-3);
    }

    #[test]
    fn fixed_frequency_rotates_at_constant_rate_per_sample() {
        let mut nco = Nco::new();
        nco.set_frequency(std::f32::consts::FRAC_PI_2);
        let y0 = nco.mix_up(Complex32::new(1.0, 0.0));
        let y1 = nco.mix_up(Complex32::new(1.0, 0.0));
        let delta = (y1 * y0.conj()).arg();
        assert!((delta.abs() - std::f32::consts::FRAC_PI_2).abs() < 0.05);
    }
}

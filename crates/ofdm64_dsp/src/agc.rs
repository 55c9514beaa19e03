use num::complex::Complex32;

/// Automatic gain control driven by an exponential moving average of signal power.
///
/// Mirrors the single-pole update used elsewhere in this crate for running averages
/// (`signal_l1_average`-style: `avg = beta*avg + (1-beta)*sample`), just applied to
/// power instead of magnitude, and inverted to produce a multiplicative gain.
#[derive(Debug, Clone)]
pub struct Agc {
    bandwidth: f32,
    power_average: f32,
    gain: f32,
}

impl Agc {
    /// `bandwidth` is the update rate of the power average, from 0 (never updates)
    /// to 1 (tracks instantaneously).
    pub fn new(bandwidth: f32) -> Self {
        assert!((0.0..=1.0).contains(&bandwidth), "AGC bandwidth must be within [0,1]");
        Self {
            bandwidth,
            power_average: 1.0,
            gain: 1.0,
        }
    }

    pub fn reset(&mut self) {
        self.power_average = 1.0;
        self.gain = 1.0;
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Updates the running power estimate with `x` and returns `x` scaled to unit
    /// average power.
    pub fn execute(&mut self, x: Complex32) -> Complex32 {
        let power = x.norm_sqr().max(1e-12);
        let beta = self.bandwidth;
        self.power_average = beta*power + (1.0-beta)*self.power_average;
        self.gain = 1.0 / self.power_average.sqrt();
        x * self.gain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_towards_unit_average_power() {
        let mut agc = Agc::new(0.2);
        let mut last = Complex32::new(0.0, 0.0);
        for _ in 0..500 {
            last = agc.execute(Complex32::new(4.0, 0.0));
        }
        assert!((last.norm() - 1.0).abs() < 0.05);
    }

    #[test]
    fn reset_restores_unit_gain() {
        let mut agc = Agc::new(0.5);
        agc.execute(Complex32::new(10.0, 0.0));
        agc.reset();
        assert_eq!(agc.gain(), 1.0);
    }
}

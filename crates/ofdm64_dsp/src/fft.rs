use num::complex::Complex32;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// An unnormalised forward FFT over a fixed transform length.
///
/// The synchroniser is generic over this trait so the backend is chosen once at
/// construction time instead of being hard wired to a single FFT crate.
pub trait ForwardFft: Send + Sync {
    /// Length of the transform this instance was built for.
    fn len(&self) -> usize;

    /// Transforms `buf` in place, time domain to frequency domain, unnormalised.
    fn process(&self, buf: &mut [Complex32]);
}

/// `rustfft`-backed forward FFT of a fixed length.
pub struct RustFftForward {
    fft: Arc<dyn Fft<f32>>,
}

impl RustFftForward {
    pub fn new(len: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            fft: planner.plan_fft_forward(len),
        }
    }
}

impl ForwardFft for RustFftForward {
    fn len(&self) -> usize {
        self.fft.len()
    }

    fn process(&self, buf: &mut [Complex32]) {
        self.fft.process(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dc_input_produces_flat_spectrum_at_bin_zero() {
        let fft = RustFftForward::new(64);
        let mut buf = vec![Complex32::new(1.0, 0.0); 64];
        fft.process(&mut buf);
        assert!((buf[0].re - 64.0).abs() < 1e-3);
        for bin in buf.iter().skip(1) {
            assert!(bin.norm() < 1e-3);
        }
    }

    #[test]
    fn reports_configured_length() {
        let fft = RustFftForward::new(64);
        assert_eq!(fft.len(), 64);
    }
}

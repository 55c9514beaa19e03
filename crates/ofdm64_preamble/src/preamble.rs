use crate::error::PreambleError;
use crate::subcarrier::NUM_SUBCARRIERS;
use num::complex::Complex32;
use ofdm64_dsp::ForwardFft;

/// Frequency-domain PLCP long training sequence, hand-authored from the published
/// IEEE 802.11a long-training BPSK values at the 52 non-NULL bins (raw, unshifted FFT
/// bin order: bin `i` carries frequency `i` for `i < 32` and `i - 64` for `i >= 32`).
/// Bins classified NULL by [`crate::subcarrier_type`] are zero here by construction,
/// since the published training values are themselves zero at DC and undefined
/// (and thus taken as zero) outside `+-26`.
#[rustfmt::skip]
pub const LF_REF: [Complex32; NUM_SUBCARRIERS] = [
    Complex32::new( 0.0, 0.0), Complex32::new( 1.0, 0.0), Complex32::new(-1.0, 0.0), Complex32::new(-1.0, 0.0),
    Complex32::new( 1.0, 0.0), Complex32::new( 1.0, 0.0), Complex32::new(-1.0, 0.0), Complex32::new( 1.0, 0.0),
    Complex32::new(-1.0, 0.0), Complex32::new( 1.0, 0.0), Complex32::new(-1.0, 0.0), Complex32::new(-1.0, 0.0),
    Complex32::new(-1.0, 0.0), Complex32::new(-1.0, 0.0), Complex32::new(-1.0, 0.0), Complex32::new( 1.0, 0.0),
    Complex32::new( 1.0, 0.0), Complex32::new(-1.0, 0.0), Complex32::new(-1.0, 0.0), Complex32::new( 1.0, 0.0),
    Complex32::new(-1.0, 0.0), Complex32::new( 1.0, 0.0), Complex32::new(-1.0, 0.0), Complex32::new( 1.0, 0.0),
    Complex32::new( 1.0, 0.0), Complex32::new( 1.0, 0.0), Complex32::new( 1.0, 0.0), Complex32::new( 0.0, 0.0),
    Complex32::new( 0.0, 0.0), Complex32::new( 0.0, 0.0), Complex32::new( 0.0, 0.0), Complex32::new( 0.0, 0.0),
    Complex32::new( 0.0, 0.0), Complex32::new( 0.0, 0.0), Complex32::new( 0.0, 0.0), Complex32::new( 0.0, 0.0),
    Complex32::new( 0.0, 0.0), Complex32::new( 0.0, 0.0), Complex32::new( 1.0, 0.0), Complex32::new( 1.0, 0.0),
    Complex32::new(-1.0, 0.0), Complex32::new(-1.0, 0.0), Complex32::new( 1.0, 0.0), Complex32::new( 1.0, 0.0),
    Complex32::new(-1.0, 0.0), Complex32::new( 1.0, 0.0), Complex32::new(-1.0, 0.0), Complex32::new( 1.0, 0.0),
    Complex32::new( 1.0, 0.0), Complex32::new( 1.0, 0.0), Complex32::new( 1.0, 0.0), Complex32::new( 1.0, 0.0),
    Complex32::new( 1.0, 0.0), Complex32::new(-1.0, 0.0), Complex32::new(-1.0, 0.0), Complex32::new( 1.0, 0.0),
    Complex32::new( 1.0, 0.0), Complex32::new(-1.0, 0.0), Complex32::new( 1.0, 0.0), Complex32::new(-1.0, 0.0),
    Complex32::new( 1.0, 0.0), Complex32::new( 1.0, 0.0), Complex32::new( 1.0, 0.0), Complex32::new( 1.0, 0.0),
];

/// Derives the time-domain long training sequence from [`LF_REF`] using the same
/// forward-FFT backend the synchronizer core drives elsewhere, rather than carrying a
/// second, independently transcribed time-domain table that could drift out of sync
/// with the frequency-domain one.
///
/// Uses the conjugate identity `idft(X) = conj(dft(conj(X))) / N`, so only a forward
/// transform is required.
pub fn derive_lt_ref<F: ForwardFft>(fft: &F) -> [Complex32; NUM_SUBCARRIERS] {
    assert_eq!(fft.len(), NUM_SUBCARRIERS, "preamble FFT backend must be configured for length 64");
    let mut buf = LF_REF;
    for v in buf.iter_mut() {
        *v = v.conj();
    }
    fft.process(&mut buf);
    let n = buf.len() as f32;
    for v in buf.iter_mut() {
        *v = v.conj() / n;
    }
    buf
}

/// The matched time/frequency-domain PLCP long training sequence pair a
/// `FrameSynchronizer` acquires against.
#[derive(Debug, Clone, Copy)]
pub struct PreambleReferences {
    /// Time-domain long training sequence.
    pub lt_ref: [Complex32; NUM_SUBCARRIERS],
    /// Frequency-domain long training sequence (its forward FFT image).
    pub lf_ref: [Complex32; NUM_SUBCARRIERS],
}

impl PreambleReferences {
    /// Builds the compiled-in 802.11a-style reference, deriving `lt_ref` from
    /// [`LF_REF`] through `fft` so the pair is correct by construction.
    pub fn standard<F: ForwardFft>(fft: &F) -> Self {
        Self {
            lt_ref: derive_lt_ref(fft),
            lf_ref: LF_REF,
        }
    }

    /// Builds a reference pair from caller-supplied tables, validating that neither
    /// is degenerate (all-zero).
    pub fn from_tables(
        lt_ref: [Complex32; NUM_SUBCARRIERS],
        lf_ref: [Complex32; NUM_SUBCARRIERS],
    ) -> Result<Self, PreambleError> {
        let refs = Self { lt_ref, lf_ref };
        refs.validate()?;
        Ok(refs)
    }

    /// Checks that both tables carry nonzero energy.
    pub fn validate(&self) -> Result<(), PreambleError> {
        let lt_energy: f32 = self.lt_ref.iter().map(Complex32::norm_sqr).sum();
        let lf_energy: f32 = self.lf_ref.iter().map(Complex32::norm_sqr).sum();
        if lt_energy <= 0.0 || lf_energy <= 0.0 {
            return Err(PreambleError::DegenerateReference);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ofdm64_dsp::RustFftForward;

    #[test]
    fn lf_ref_has_52_nonzero_bins() {
        let nonzero = LF_REF.iter().filter(|v| v.norm() > 0.0).count();
        assert_eq!(nonzero, 52);
    }

    #[test]
    fn lt_ref_round_trips_back_to_lf_ref_under_forward_fft() {
        let fft = RustFftForward::new(NUM_SUBCARRIERS);
        let mut lt_ref = derive_lt_ref(&fft);
        fft.process(&mut lt_ref);
        for (computed, expected) in lt_ref.iter().zip(LF_REF.iter()) {
            assert!((computed - expected).norm() < 1e-3);
        }
    }

    #[test]
    fn standard_preamble_validates() {
        let fft = RustFftForward::new(NUM_SUBCARRIERS);
        let refs = PreambleReferences::standard(&fft);
        assert!(refs.validate().is_ok());
    }

    #[test]
    fn all_zero_tables_fail_validation() {
        let zero = [Complex32::default(); NUM_SUBCARRIERS];
        let err = PreambleReferences::from_tables(zero, zero).unwrap_err();
        assert_eq!(err, PreambleError::DegenerateReference);
    }
}

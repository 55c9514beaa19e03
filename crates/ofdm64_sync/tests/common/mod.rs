use num::complex::Complex32;
use ofdm64_dsp::{ForwardFft, RustFftForward};
use ofdm64_preamble::{subcarrier_type, PreambleReferences, SubcarrierType, NUM_SUBCARRIERS};

/// Inverse of a length-64 forward FFT, via the conjugate identity used throughout
/// `ofdm64_preamble` to derive time-domain references from frequency-domain ones.
pub fn idft(fft: &RustFftForward, freq: &[Complex32; NUM_SUBCARRIERS]) -> [Complex32; NUM_SUBCARRIERS] {
    let mut buf = *freq;
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

/// The per-sample RMS amplitude `lt_ref` naturally carries under this crate's
/// unitary-IDFT derivation. The short training tone is generated at this same
/// amplitude so that the AGC gain it locks onto also normalizes the long training
/// sequence to the unit-ish scale the cross-correlation threshold assumes, mirroring
/// a real transmitter holding consistent power across its own preamble.
pub fn matched_amplitude(refs: &PreambleReferences) -> f32 {
    let energy: f32 = refs.lt_ref.iter().map(Complex32::norm_sqr).sum();
    (energy / NUM_SUBCARRIERS as f32).sqrt()
}

/// A period-16 tone used as a stand-in PLCP short training sequence: detection only
/// relies on its periodicity, not its bit content, so an exact integer-cycle tone is
/// sufficient to trigger the auto-correlator.
pub fn short_training_tone(amplitude: f32) -> [Complex32; 16] {
    let mut out = [Complex32::default(); 16];
    for (n, v) in out.iter_mut().enumerate() {
        let theta = std::f32::consts::TAU * 3.0 * n as f32 / 16.0;
        *v = Complex32::from_polar(amplitude, theta);
    }
    out
}

/// Builds `repeats * 16` samples of the short training tone.
pub fn plcp_short(repeats: usize, amplitude: f32) -> Vec<Complex32> {
    let tone = short_training_tone(amplitude);
    (0..repeats * 16).map(|n| tone[n % 16]).collect()
}

/// Builds the 160-sample PLCP long sequence (32-sample cyclic prefix + two copies of
/// `lt_ref`) against the standard reference pair.
pub fn plcp_long(fft: &RustFftForward) -> Vec<Complex32> {
    let refs = PreambleReferences::standard(fft);
    let mut out = Vec::with_capacity(160);
    out.extend_from_slice(&refs.lt_ref[32..64]);
    out.extend_from_slice(&refs.lt_ref);
    out.extend_from_slice(&refs.lt_ref);
    out
}

/// Builds one 80-sample payload OFDM symbol (16-sample cyclic prefix + 64-sample
/// body) whose data and pilot subcarriers both carry `bpsk_value`, with every NULL
/// subcarrier left at zero.
pub fn payload_symbol(fft: &RustFftForward, bpsk_value: f32) -> [Complex32; 80] {
    let mut freq = [Complex32::default(); NUM_SUBCARRIERS];
    for i in 0..NUM_SUBCARRIERS {
        if subcarrier_type(i) != SubcarrierType::Null {
            freq[i] = Complex32::new(bpsk_value, 0.0);
        }
    }
    let body = idft(fft, &freq);

    let mut out = [Complex32::default(); 80];
    out[0..16].copy_from_slice(&body[48..64]);
    out[16..80].copy_from_slice(&body);
    out
}

/// Applies a constant per-sample carrier-frequency offset starting from `phase0`.
pub fn apply_cfo(samples: &[Complex32], nu: f32, phase0: f32) -> Vec<Complex32> {
    samples
        .iter()
        .enumerate()
        .map(|(n, &x)| x * Complex32::from_polar(1.0, phase0 + nu * n as f32))
        .collect()
}

/// One full preamble (short + long) with no payload.
pub fn preamble(fft: &RustFftForward) -> Vec<Complex32> {
    let refs = PreambleReferences::standard(fft);
    let amplitude = matched_amplitude(&refs);
    let mut out = plcp_short(10, amplitude);
    out.extend(plcp_long(fft));
    out
}

/// A preamble followed by `num_symbols` payload symbols of all-`+1` BPSK.
pub fn preambled_frame(fft: &RustFftForward, num_symbols: usize) -> Vec<Complex32> {
    let mut out = preamble(fft);
    for _ in 0..num_symbols {
        out.extend_from_slice(&payload_symbol(fft, 1.0));
    }
    out
}

/// Tunable thresholds gating the synchronizer's acquisition state machine.
///
/// Mirrors the shape of the teacher crate's `OfdmDemodulatorSettings`: the structural
/// constants (64 subcarriers, 16-sample cyclic prefix, 2-sample backoff) are compiled
/// in, but the sensitivity knobs that decide when a state transition fires are
/// collected here so a caller can retune acquisition without forking the state
/// machine.
#[derive(Debug, Clone)]
pub struct SynchronizerSettings {
    /// AGC power-average update rate, from 0 (never updates) to 1 (instantaneous).
    pub agc_bandwidth: f32,
    /// Magnitude the AGC output is clipped to before entering the auto-correlator,
    /// angle preserved.
    pub agc_clip_magnitude: f32,
    /// Fraction of the ideal auto-correlation magnitude (`autocorr_len`) that must be
    /// exceeded to declare a PLCP-short detection.
    pub autocorr_trigger_ratio: f32,
    /// Cross-correlation magnitude (out of an ideal peak of 64) that must be
    /// exceeded to declare a PLCP-long detection.
    pub crosscorr_trigger_magnitude: f32,
    /// Number of samples SeekLong0 will wait for a PLCP-long cross-correlation peak
    /// before giving up and resetting.
    pub seek_long0_watchdog: usize,
}

impl Default for SynchronizerSettings {
    fn default() -> Self {
        Self {
            agc_bandwidth: 0.1,
            agc_clip_magnitude: 2.0,
            autocorr_trigger_ratio: 0.75,
            crosscorr_trigger_magnitude: 48.0,
            seek_long0_watchdog: 320,
        }
    }
}

use crate::consumer::{ConsumerAction, IngestOutcome};
use crate::observer::{NullObserver, Observer};
use crate::settings::SynchronizerSettings;
use crate::state::SyncState;
use num::complex::Complex32;
use ofdm64_dsp::{AutoCorrelator, CircularBucket, CrossCorrelator, ForwardFft, Nco, PnSequence};
use ofdm64_dsp::{polyfit, polyval, Agc, RustFftForward};
use ofdm64_preamble::{subcarrier_type, PreambleReferences, SubcarrierType};
use ofdm64_preamble::{NUM_DATA_SUBCARRIERS, NUM_SUBCARRIERS, PILOT_FREQUENCIES, PILOT_INDICES};

const N: usize = NUM_SUBCARRIERS;
const CP: usize = 16;
const BACKOFF: usize = 2;
const SYMBOL_LEN: usize = CP + N;
const AUTOCORR_DELAY: usize = 16;
const AUTOCORR_WINDOW: usize = 96;
const RXY_WINDOW: usize = 64;
const LT_BUF_LEN: usize = 160;

/// Streaming OFDM frame synchronizer: signal detection, coarse/fine CFO estimation,
/// symbol-timing acquisition, per-subcarrier channel-gain estimation, pilot-tracked
/// residual phase correction, and subcarrier demultiplexing, over a 64-subcarrier,
/// 16-sample-cyclic-prefix 802.11a-style PLCP preamble.
///
/// Generic over the forward-FFT backend (`F`), the consumer closure (`C`) that
/// receives each demodulated payload symbol, and an optional [`Observer`] (`O`). The
/// FFT backend is a construction-time, monomorphized choice rather than a runtime
/// `dyn` dispatch or a compile-time feature switch, per the source's conditional
/// compilation between FFT backends.
pub struct FrameSynchronizer<F, C, O = NullObserver>
where
    F: ForwardFft,
    C: FnMut(&[Complex32; NUM_DATA_SUBCARRIERS]) -> ConsumerAction,
    O: Observer,
{
    settings: SynchronizerSettings,
    preamble: PreambleReferences,
    fft: F,
    consumer: C,
    observer: O,

    agc: Agc,
    nco: Nco,
    autocorr: AutoCorrelator,
    cross_correlator: CrossCorrelator,
    pn: PnSequence,

    rxy_buf: CircularBucket<Complex32>,
    lt_buf: CircularBucket<Complex32>,

    lt0: [Complex32; N],
    lt1: [Complex32; N],
    lf0: [Complex32; N],
    lf1: [Complex32; N],
    gain0: [Complex32; N],
    gain1: [Complex32; N],
    gain: [Complex32; N],

    g: f32,
    nu_hat0: f32,
    nu_hat1: f32,

    symbol: [Complex32; SYMBOL_LEN],
    data: [Complex32; NUM_DATA_SUBCARRIERS],
    timer: usize,

    state: SyncState,

    total_frames_read: u64,
    total_frames_desync: u64,
}

impl<C> FrameSynchronizer<RustFftForward, C, NullObserver>
where
    C: FnMut(&[Complex32; NUM_DATA_SUBCARRIERS]) -> ConsumerAction,
{
    /// Builds a synchronizer with the default `rustfft`-backed transform and no
    /// observer.
    pub fn new(settings: SynchronizerSettings, consumer: C) -> Self {
        Self::with_fft_and_observer(settings, RustFftForward::new(N), consumer, NullObserver)
    }

    /// Builds a synchronizer with the default FFT backend and a caller-supplied
    /// observer.
    pub fn with_observer<O: Observer>(
        settings: SynchronizerSettings,
        consumer: C,
        observer: O,
    ) -> FrameSynchronizer<RustFftForward, C, O> {
        FrameSynchronizer::with_fft_and_observer(settings, RustFftForward::new(N), consumer, observer)
    }
}

impl<F, C, O> FrameSynchronizer<F, C, O>
where
    F: ForwardFft,
    C: FnMut(&[Complex32; NUM_DATA_SUBCARRIERS]) -> ConsumerAction,
    O: Observer,
{
    /// Builds a synchronizer over an arbitrary length-64 forward-FFT backend and
    /// observer.
    pub fn with_fft_and_observer(
        settings: SynchronizerSettings,
        fft: F,
        consumer: C,
        observer: O,
    ) -> Self {
        assert_eq!(fft.len(), N, "forward FFT backend must be configured for length 64");

        let preamble = PreambleReferences::standard(&fft);
        let cross_reference: Vec<Complex32> = preamble.lt_ref.iter().map(|v| v.conj()).collect();
        let cross_correlator = CrossCorrelator::new(&cross_reference);
        let agc = Agc::new(settings.agc_bandwidth);

        let mut sync = Self {
            settings,
            preamble,
            fft,
            consumer,
            observer,
            agc,
            nco: Nco::new(),
            autocorr: AutoCorrelator::new(AUTOCORR_DELAY, AUTOCORR_WINDOW),
            cross_correlator,
            pn: PnSequence::new(),
            rxy_buf: CircularBucket::new(RXY_WINDOW),
            lt_buf: CircularBucket::new(LT_BUF_LEN),
            lt0: [Complex32::default(); N],
            lt1: [Complex32::default(); N],
            lf0: [Complex32::default(); N],
            lf1: [Complex32::default(); N],
            gain0: [Complex32::default(); N],
            gain1: [Complex32::default(); N],
            gain: [Complex32::default(); N],
            g: 1.0,
            nu_hat0: 0.0,
            nu_hat1: 0.0,
            symbol: [Complex32::default(); SYMBOL_LEN],
            data: [Complex32::default(); NUM_DATA_SUBCARRIERS],
            timer: 0,
            state: SyncState::SeekShort,
            total_frames_read: 0,
            total_frames_desync: 0,
        };
        sync.fill_sliding_buffers_with_zero();
        sync
    }

    /// Restores the synchronizer to its freshly created state without deallocating
    /// any buffers. Idempotent.
    pub fn reset(&mut self) {
        self.pn.reset();
        self.agc.reset();
        self.g = 1.0;
        self.nco.reset();
        self.autocorr.reset();
        self.rxy_buf.reset();
        self.lt_buf.reset();
        self.fill_sliding_buffers_with_zero();
        self.timer = 0;
        self.nu_hat0 = 0.0;
        self.nu_hat1 = 0.0;
        self.state = SyncState::SeekShort;
        tracing::trace!("synchronizer reset");
    }

    /// Pushes a batch of complex baseband samples through the synchronizer, in
    /// order. Never blocks or allocates. The consumer may be invoked synchronously,
    /// zero or more times, once complete payload symbols are demodulated.
    pub fn process(&mut self, samples: &[Complex32]) -> IngestOutcome {
        for &raw in samples {
            self.observer.on_sample(raw);

            let mut x = raw * self.g;
            x = self.nco.mix_up(x);

            match self.state {
                SyncState::SeekShort => self.step_seek_short(x),
                SyncState::SeekLong0 => self.step_seek_long0(x),
                SyncState::SeekLong1 => self.step_seek_long1(x),
                SyncState::RxPayload => {
                    if let Some(action) = self.step_rx_payload(x) {
                        match action {
                            ConsumerAction::Continue => {}
                            ConsumerAction::Reset => self.reset(),
                            ConsumerAction::Stop => return IngestOutcome::Stopped,
                        }
                    }
                }
            }
        }
        IngestOutcome::Continued
    }

    /// Current acquisition state.
    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Net NCO frequency, in radians/sample (`nu_hat0 + nu_hat1` once acquisition is
    /// complete).
    pub fn frequency(&self) -> f32 {
        self.nco.frequency()
    }

    /// Coarse CFO estimate from the PLCP-short auto-correlation angle.
    pub fn nu_hat0(&self) -> f32 {
        self.nu_hat0
    }

    /// Fine CFO estimate from the PLCP-long inter-half correlation.
    pub fn nu_hat1(&self) -> f32 {
        self.nu_hat1
    }

    /// Number of samples buffered into the current state.
    pub fn timer(&self) -> usize {
        self.timer
    }

    /// Coarse gain frozen from the AGC at PLCP-short detection.
    pub fn coarse_gain(&self) -> f32 {
        self.g
    }

    /// Per-subcarrier equalizer gain, zero at every NULL index.
    pub fn gain(&self) -> &[Complex32; N] {
        &self.gain
    }

    /// Number of payload symbols demodulated and handed to the consumer.
    pub fn total_frames_read(&self) -> u64 {
        self.total_frames_read
    }

    /// Number of times acquisition restarted due to a watchdog timeout or a failed
    /// cross-correlation check.
    pub fn total_frames_desync(&self) -> u64 {
        self.total_frames_desync
    }

    fn fill_sliding_buffers_with_zero(&mut self) {
        let zeros_rxy = [Complex32::default(); RXY_WINDOW];
        self.rxy_buf.consume(&zeros_rxy, true);
        let zeros_lt = [Complex32::default(); LT_BUF_LEN];
        self.lt_buf.consume(&zeros_lt, true);
    }

    fn step_seek_short(&mut self, x: Complex32) {
        let mut y = self.agc.execute(x);
        if y.norm() > self.settings.agc_clip_magnitude {
            y = Complex32::from_polar(self.settings.agc_clip_magnitude, y.arg());
        }

        self.autocorr.push(y);
        let Some(rxx) = self.autocorr.execute() else {
            return;
        };
        self.observer.on_autocorrelation(rxx);

        let threshold = self.settings.autocorr_trigger_ratio * AUTOCORR_WINDOW as f32;
        if rxx.norm() > threshold {
            self.nu_hat0 = -rxx.arg() / AUTOCORR_DELAY as f32;
            self.nco.set_frequency(self.nu_hat0);
            self.g = self.agc.gain();
            self.timer = 0;
            self.state = SyncState::SeekLong0;
            tracing::debug!(nu_hat0 = self.nu_hat0, "PLCP short detected, entering SeekLong0");
        }
    }

    fn step_seek_long0(&mut self, x: Complex32) {
        self.lt_buf.consume(&[x], true);
        self.rxy_buf.consume(&[x], true);
        let rxy = self.cross_correlator.execute(&snapshot(&self.rxy_buf));
        self.observer.on_crosscorrelation(rxy);
        self.timer += 1;

        if rxy.norm() > self.settings.crosscorr_trigger_magnitude {
            self.state = SyncState::SeekLong1;
            self.timer = 0;
            tracing::debug!("PLCP long0 detected, entering SeekLong1");
            return;
        }

        if self.timer > self.settings.seek_long0_watchdog {
            self.total_frames_desync += 1;
            tracing::debug!("SeekLong0 watchdog fired, resetting");
            self.reset();
        }
    }

    fn step_seek_long1(&mut self, x: Complex32) {
        self.lt_buf.consume(&[x], true);
        self.rxy_buf.consume(&[x], true);
        self.timer += 1;
        if self.timer < 64 {
            return;
        }
        self.timer = 0;

        let rxy = self.cross_correlator.execute(&snapshot(&self.rxy_buf));
        self.observer.on_crosscorrelation(rxy);
        if rxy.norm() <= self.settings.crosscorr_trigger_magnitude {
            self.total_frames_desync += 1;
            tracing::debug!("second PLCP long missing, resetting");
            self.reset();
            return;
        }

        let mut r = snapshot(&self.lt_buf);

        // nu_hat1 = arg(Σ_{j=0}^{95} r[j] * conj(r[j+64])) / 64
        let mut acc_fine = Complex32::default();
        for j in 0..96 {
            acc_fine += r[j] * r[j + N].conj();
        }
        self.nu_hat1 = acc_fine.arg() / N as f32;

        let mut theta = 0.0f32;
        for v in r.iter_mut() {
            *v *= Complex32::from_polar(1.0, theta);
            theta += self.nu_hat1;
        }

        let rxy0 = self.cross_correlator.execute(&r[32..32 + N]);
        let rxy1 = self.cross_correlator.execute(&r[32 + N..32 + 2 * N]);
        self.observer.on_crosscorrelation(rxy0);
        self.observer.on_crosscorrelation(rxy1);

        self.lt0.copy_from_slice(&r[32 - BACKOFF..32 - BACKOFF + N]);
        self.lt1.copy_from_slice(&r[32 + N - BACKOFF..32 + N - BACKOFF + N]);

        let rot0 = Complex32::from_polar(1.0, rxy0.arg());
        let rot1 = Complex32::from_polar(1.0, rxy1.arg());
        for v in self.lt0.iter_mut() {
            *v *= rot0;
        }
        for v in self.lt1.iter_mut() {
            *v *= rot1;
        }

        self.nco.adjust_frequency(self.nu_hat1);
        self.estimate_gain();

        self.timer = 0;
        self.state = SyncState::RxPayload;
        tracing::debug!(nu_hat1 = self.nu_hat1, "PLCP long1 acquired, entering RxPayload");
    }

    fn estimate_gain(&mut self) {
        let mut x0 = self.lt0;
        self.fft.process(&mut x0);
        self.lf0 = x0;

        let mut x1 = self.lt1;
        self.fft.process(&mut x1);
        self.lf1 = x1;

        let phi = BACKOFF as f32 * std::f32::consts::TAU / N as f32;
        for i in 0..N {
            if subcarrier_type(i) == SubcarrierType::Null {
                self.gain0[i] = Complex32::default();
                self.gain1[i] = Complex32::default();
                self.gain[i] = Complex32::default();
                continue;
            }

            let rot = Complex32::from_polar(1.0, i as f32 * phi);
            let one = Complex32::new(1.0, 0.0);
            self.gain0[i] = one / (self.lf0[i] * rot * self.preamble.lf_ref[i].conj());
            self.gain1[i] = one / (self.lf1[i] * rot * self.preamble.lf_ref[i].conj());

            let (mag0, mut ang0) = self.gain0[i].to_polar();
            let (mag1, mut ang1) = self.gain1[i].to_polar();
            if ang0 < 0.0 {
                ang0 += std::f32::consts::TAU;
            }
            if ang1 < 0.0 {
                ang1 += std::f32::consts::TAU;
            }
            self.gain[i] = Complex32::from_polar(0.5 * (mag0 + mag1), 0.5 * (ang0 + ang1));
        }
    }

    fn step_rx_payload(&mut self, x: Complex32) -> Option<ConsumerAction> {
        self.symbol[self.timer] = x;
        self.timer += 1;
        if self.timer < SYMBOL_LEN {
            return None;
        }
        self.timer = 0;
        Some(self.demodulate_symbol())
    }

    fn demodulate_symbol(&mut self) -> ConsumerAction {
        let phi = BACKOFF as f32 * std::f32::consts::TAU / N as f32;
        let start = CP - BACKOFF;
        let mut x: [Complex32; N] = self.symbol[start..start + N].try_into().unwrap();
        self.fft.process(&mut x);

        for i in 0..N {
            let rot = Complex32::from_polar(1.0, i as f32 * phi);
            x[i] *= self.gain[i] * rot;
        }

        let mut y_phase = [0.0f32; 4];
        for (slot, &idx) in y_phase.iter_mut().zip(PILOT_INDICES.iter()) {
            *slot = x[idx].arg();
        }
        for i in 1..4 {
            while y_phase[i] - y_phase[i - 1] > std::f32::consts::PI {
                y_phase[i] -= std::f32::consts::TAU;
            }
            while y_phase[i] - y_phase[i - 1] < -std::f32::consts::PI {
                y_phase[i] += std::f32::consts::TAU;
            }
        }

        let pilot_bit = self.pn.advance();
        if pilot_bit == 0 {
            for v in y_phase.iter_mut() {
                *v -= std::f32::consts::PI;
            }
        }

        let p = polyfit(&PILOT_FREQUENCIES, &y_phase, 1);

        for i in 0..N {
            let theta = polyval(&p, i as f32 - 32.0);
            x[i] *= Complex32::from_polar(1.0, -theta);
        }

        let mut count = 0;
        for i in 0..N {
            if subcarrier_type(i) == SubcarrierType::Data {
                self.data[count] = x[i];
                count += 1;
            }
        }
        assert_eq!(count, NUM_DATA_SUBCARRIERS, "demultiplexer must emit exactly 48 data subcarriers");

        self.observer.on_frame_symbol(&self.data);
        self.total_frames_read += 1;

        (self.consumer)(&self.data)
    }
}

impl<F, C, O> Drop for FrameSynchronizer<F, C, O>
where
    F: ForwardFft,
    C: FnMut(&[Complex32; NUM_DATA_SUBCARRIERS]) -> ConsumerAction,
    O: Observer,
{
    fn drop(&mut self) {
        self.observer.on_finalize();
    }
}

fn snapshot(buf: &CircularBucket<Complex32>) -> Vec<Complex32> {
    buf.iter().copied().collect()
}

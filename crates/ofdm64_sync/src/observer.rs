use num::complex::Complex32;

/// Rearchitected replacement for the source's compile-time debug buffers
/// (`DEBUG_OFDMFRAME64SYNC`) and end-of-run plot-script emission: an optional
/// observer capability notified at the points the original wrote into its debug
/// windows.
///
/// All methods have no-op default implementations, so an observer only needs to
/// implement the hooks it cares about. [`NullObserver`] implements none of them and
/// is the default, compiled away entirely by the optimizer.
pub trait Observer {
    /// Called once per input sample, before coarse-gain and NCO correction.
    fn on_sample(&mut self, _x: Complex32) {}
    /// Called whenever the auto-correlator produces a reading in `SeekShort`.
    fn on_autocorrelation(&mut self, _rxx: Complex32) {}
    /// Called whenever the cross-correlator produces a reading in `SeekLong0`/`SeekLong1`.
    fn on_crosscorrelation(&mut self, _rxy: Complex32) {}
    /// Called with the 48 demodulated data subcarriers of each accepted payload symbol.
    fn on_frame_symbol(&mut self, _data: &[Complex32; 48]) {}
    /// Called when the synchronizer is dropped, the rearchitected replacement for
    /// the source's destroy-time debug file emission.
    fn on_finalize(&mut self) {}
}

/// No-op [`Observer`]; the default when a caller does not need diagnostics.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl Observer for NullObserver {}

use num::complex::Complex32;
use ofdm64_sync::Observer;

/// Minimal [`Observer`] for the CLI demo: emits `tracing` events at the points the
/// source's debug build would have written into its global debug buffers, instead of
/// serializing a plot script (plot emission is out of scope here).
#[derive(Debug, Default)]
pub struct LoggingObserver {
    samples_seen: u64,
    symbols_seen: u64,
}

impl Observer for LoggingObserver {
    fn on_sample(&mut self, _x: Complex32) {
        self.samples_seen += 1;
    }

    fn on_autocorrelation(&mut self, rxx: Complex32) {
        tracing::trace!(magnitude = rxx.norm(), angle = rxx.arg(), "autocorrelation");
    }

    fn on_crosscorrelation(&mut self, rxy: Complex32) {
        tracing::trace!(magnitude = rxy.norm(), angle = rxy.arg(), "crosscorrelation");
    }

    fn on_frame_symbol(&mut self, data: &[Complex32; 48]) {
        self.symbols_seen += 1;
        let power: f32 = data.iter().map(Complex32::norm_sqr).sum::<f32>() / data.len() as f32;
        tracing::debug!(symbol = self.symbols_seen, avg_power = power, "accepted payload symbol");
    }

    fn on_finalize(&mut self) {
        tracing::info!(
            samples = self.samples_seen,
            symbols = self.symbols_seen,
            "synchronizer finalized"
        );
    }
}

use crate::circular_bucket::CircularBucket;
use num::complex::Complex32;

/// Sliding-window auto-correlator at a fixed delay, used to detect a signal's
/// periodic repeat structure (e.g. a short training sequence repeated every
/// `delay` samples).
///
/// `execute()` returns `sum(x[n-k] * conj(x[n-k-delay]))` for `k` in `0..window`,
/// where `n` is the sample most recently pushed.
pub struct AutoCorrelator {
    delay: usize,
    history: CircularBucket<Complex32>,
}

impl AutoCorrelator {
    pub fn new(delay: usize, window: usize) -> Self {
        Self {
            delay,
            history: CircularBucket::new(delay + window),
        }
    }

    pub fn reset(&mut self) {
        self.history.reset();
    }

    pub fn push(&mut self, x: Complex32) {
        self.history.consume(&[x], true);
    }

    /// `None` until the delay+window history has been filled at least once.
    pub fn execute(&self) -> Option<Complex32> {
        let capacity = self.history.capacity();
        if self.history.length() < capacity {
            return None;
        }
        let window = capacity - self.delay;
        let mut sum = Complex32::new(0.0, 0.0);
        for k in 0..window {
            let recent = self.history[self.delay + k];
            let delayed = self.history[k];
            sum += recent * delayed.conj();
        }
        Some(sum)
    }
}

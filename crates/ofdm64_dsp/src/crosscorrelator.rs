use num::complex::Complex32;

/// Dot-product cross-correlator against a fixed reference sequence.
///
/// `execute(v)` returns `sum(v[k] * h[k])`. Callers that want the usual
/// matched-filter form should pass the conjugate of their reference as `h`.
pub struct CrossCorrelator {
    reference: Vec<Complex32>,
}

impl CrossCorrelator {
    pub fn new(reference: &[Complex32]) -> Self {
        Self { reference: reference.to_vec() }
    }

    pub fn len(&self) -> usize {
        self.reference.len()
    }

    pub fn execute(&self, v: &[Complex32]) -> Complex32 {
        assert_eq!(v.len(), self.reference.len(), "cross correlator input length mismatch");
        v.iter()
            .zip(self.reference.iter())
            .map(|(&a, &b)| a * b)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matched_reference_produces_peak_equal_to_length() {
        let reference: Vec<Complex32> = (0..64).map(|_| Complex32::new(1.0, 0.0)).collect();
        let corr = CrossCorrelator::new(&reference);
        let peak = corr.execute(&reference);
        assert!((peak.norm() - 64.0).abs() < 1e-3);
    }

    #[test]
    #[should_panic]
    fn mismatched_length_panics() {
        let reference = vec![Complex32::new(1.0, 0.0); 64];
        let corr = CrossCorrelator::new(&reference);
        corr.execute(&reference[..32]);
    }
}

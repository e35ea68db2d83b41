//! Reference transform backed by rustfft
//!
//! Applies the same padding rule as [`transform`](super::fft::transform) so
//! the two spectra can be compared bin for bin.

use super::fft::padded_len;
use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// Planned rustfft transform for one signal length
pub struct ReferenceFft {
    /// Spectrum length (power of two, or 0/1)
    size: usize,

    /// Forward plan, absent for the identity sizes 0 and 1
    plan: Option<Arc<dyn Fft<f64>>>,

    /// Reusable scratch buffer
    scratch: Vec<Complex64>,
}

impl ReferenceFft {
    /// Plan a transform for signals of `signal_len` samples
    pub fn new(signal_len: usize) -> Self {
        let size = padded_len(signal_len);
        let plan = if size > 1 {
            let mut planner = FftPlanner::<f64>::new();
            Some(planner.plan_fft_forward(size))
        } else {
            None
        };
        let scratch_len = plan.as_ref().map_or(0, |p| p.get_inplace_scratch_len());

        Self {
            size,
            plan,
            scratch: vec![Complex64::new(0.0, 0.0); scratch_len],
        }
    }

    /// Compute the spectrum of `signal`
    ///
    /// # Arguments
    /// * `signal` - Input signal (zero-padded to the planned size, truncated if longer)
    ///
    /// # Returns
    /// Spectrum of length `self.size()`
    pub fn process(&mut self, signal: &[Complex64]) -> Vec<Complex64> {
        let copy_len = signal.len().min(self.size);
        let mut buffer = Vec::with_capacity(self.size);
        buffer.extend_from_slice(&signal[..copy_len]);
        buffer.resize(self.size, Complex64::new(0.0, 0.0));

        if let Some(plan) = &self.plan {
            plan.process_with_scratch(&mut buffer, &mut self.scratch);
        }

        buffer
    }

    /// Planned spectrum length
    pub fn size(&self) -> usize {
        self.size
    }
}

/// Compute the forward DFT of `signal` with a freshly planned rustfft transform
pub fn reference_transform(signal: &[Complex64]) -> Vec<Complex64> {
    ReferenceFft::new(signal.len()).process(signal)
}

/// Largest per-bin distance between two spectra (`f64::INFINITY` on length mismatch)
pub fn max_abs_error(a: &[Complex64], b: &[Complex64]) -> f64 {
    if a.len() != b.len() {
        return f64::INFINITY;
    }
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).norm())
        .fold(0.0, f64::max)
}

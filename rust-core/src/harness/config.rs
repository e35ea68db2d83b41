//! Verification harness configuration

use super::VerificationError;
use std::time::Duration;

/// Harness configuration
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Absolute tolerance for known-value checks
    pub tolerance: f64,

    /// Signal lengths to time (signal is `i % 2`)
    pub benchmark_sizes: Vec<usize>,

    /// Length used for the time-limit assertion
    pub performance_size: usize,

    /// Upper bound on wall-clock time for `performance_size` samples
    pub time_limit: Duration,

    /// Largest per-bin distance allowed against the rustfft reference
    pub reference_tolerance: f64,

    /// Sample rate in Hz for the metrics tone
    pub sample_rate: f64,

    /// Frequency of the metrics tone in Hz (below Nyquist)
    pub tone_hz: f64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            benchmark_sizes: vec![64, 256, 1024, 4096],
            performance_size: 4096,
            time_limit: Duration::from_secs(5),
            reference_tolerance: 1e-9,
            sample_rate: 48000.0,
            tone_hz: 1000.0,
        }
    }
}

impl HarnessConfig {
    /// Reject configurations the harness cannot run with
    pub fn validate(&self) -> Result<(), VerificationError> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(VerificationError::InvalidConfig(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if !(self.reference_tolerance.is_finite() && self.reference_tolerance > 0.0) {
            return Err(VerificationError::InvalidConfig(format!(
                "reference tolerance must be positive and finite, got {}",
                self.reference_tolerance
            )));
        }
        if self.time_limit.is_zero() {
            return Err(VerificationError::InvalidConfig(
                "time limit must be non-zero".to_string(),
            ));
        }
        if self.benchmark_sizes.is_empty() {
            return Err(VerificationError::InvalidConfig(
                "at least one benchmark size is required".to_string(),
            ));
        }
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(VerificationError::InvalidConfig(format!(
                "sample rate must be positive and finite, got {}",
                self.sample_rate
            )));
        }
        if !(self.tone_hz > 0.0 && self.tone_hz < self.sample_rate / 2.0) {
            return Err(VerificationError::InvalidConfig(format!(
                "tone must lie between 0 and {} Hz, got {}",
                self.sample_rate / 2.0,
                self.tone_hz
            )));
        }
        if self.performance_size == 0 {
            return Err(VerificationError::InvalidConfig(
                "performance size must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Build a time limit from seconds given on the command line
    pub fn time_limit_from_secs(secs: f64) -> Result<Duration, VerificationError> {
        Duration::try_from_secs_f64(secs).map_err(|e| {
            VerificationError::InvalidConfig(format!("time limit {} s is not usable: {}", secs, e))
        })
    }
}

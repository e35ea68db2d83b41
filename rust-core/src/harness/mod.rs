//! Verification harness for the transform
//!
//! Runs known-value, edge-case, reference and timing checks against any
//! function with the transform's signature. Panics inside a check are caught
//! and reported as [`VerificationError::Unexpected`].

mod checks;
pub mod config;
pub mod metrics;

pub use checks::{alternating_signal, benchmark, tone_signal};
pub use config::HarnessConfig;
pub use metrics::{Metrics, MetricsCollector, MetricsError};

use num_complex::Complex64;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;
use thiserror::Error;

/// Signature shared by the engine and any transform under test
pub type TransformFn = fn(&[Complex64]) -> Vec<Complex64>;

#[derive(Error, Debug)]
pub enum VerificationError {
    #[error("{check} check failed: {message}")]
    Failure { check: &'static str, message: String },

    #[error("unexpected error during {check} check: {message}")]
    Unexpected { check: &'static str, message: String },

    #[error("Invalid harness configuration: {0}")]
    InvalidConfig(String),
}

/// Notes from one passed group of checks
#[derive(Debug, Clone)]
pub struct Section {
    pub title: &'static str,
    pub notes: Vec<String>,
}

/// Wall-clock time for one transform
#[derive(Debug, Clone, Copy)]
pub struct Timing {
    pub size: usize,
    pub elapsed: Duration,
}

impl Timing {
    pub fn millis(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// Everything a passing run produced
#[derive(Debug, Clone)]
pub struct Report {
    pub sections: Vec<Section>,
    pub metrics: MetricsCollector,
}

type Check = fn(TransformFn, &HarnessConfig, &mut MetricsCollector) -> Result<Section, VerificationError>;

const CHECKS: [(&str, Check); 4] = [
    ("correctness", checks::correctness),
    ("edge cases", checks::edge_cases),
    ("reference agreement", checks::reference_agreement),
    ("performance", checks::performance),
];

/// Runs every check in order, stopping at the first failure
pub struct Harness {
    config: HarnessConfig,
    transform: TransformFn,
}

impl Harness {
    /// Create a harness for the crate's own transform
    pub fn new(config: HarnessConfig) -> Result<Self, VerificationError> {
        Self::with_transform(config, crate::spectrum::transform)
    }

    /// Create a harness for an arbitrary transform
    pub fn with_transform(config: HarnessConfig, transform: TransformFn) -> Result<Self, VerificationError> {
        config.validate()?;
        Ok(Self { config, transform })
    }

    /// Run all checks, calling `on_section` after each one passes
    pub fn run_with<F>(&self, mut on_section: F) -> Result<Report, VerificationError>
    where
        F: FnMut(&Section),
    {
        let mut sections = Vec::with_capacity(CHECKS.len());
        let mut metrics = MetricsCollector::default();
        for (name, check) in CHECKS {
            tracing::info!(check = name, "running check");
            let section = guarded(name, || check(self.transform, &self.config, &mut metrics)).map_err(|e| {
                tracing::warn!(check = name, error = %e, "check failed");
                e
            })?;
            on_section(&section);
            sections.push(section);
        }
        Ok(Report { sections, metrics })
    }

    /// Run all checks
    pub fn run(&self) -> Result<Report, VerificationError> {
        self.run_with(|_| {})
    }
}

fn guarded<F>(check: &'static str, f: F) -> Result<Section, VerificationError>
where
    F: FnOnce() -> Result<Section, VerificationError>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(VerificationError::Unexpected { check, message })
        }
    }
}

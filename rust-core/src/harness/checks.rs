//! Individual verification checks
//!
//! Each check returns the notes it wants printed, or the first failure.

use super::metrics::{Metrics, MetricsCollector, ENGINE, REFERENCE};
use super::{HarnessConfig, Section, Timing, TransformFn, VerificationError};
use crate::spectrum::analysis::{divergence, dominant_frequency, magnitudes, peak};
use crate::spectrum::padded_len;
use crate::spectrum::reference::{max_abs_error, reference_transform, ReferenceFft};
use num_complex::Complex64;
use std::f64::consts::PI;
use std::time::Instant;

fn ensure(ok: bool, check: &'static str, message: impl FnOnce() -> String) -> Result<(), VerificationError> {
    if ok {
        Ok(())
    } else {
        Err(VerificationError::Failure {
            check,
            message: message(),
        })
    }
}

fn reals(values: &[f64]) -> Vec<Complex64> {
    values.iter().map(|&re| Complex64::new(re, 0.0)).collect()
}

/// Alternating 0/1 signal used for timing
pub fn alternating_signal(len: usize) -> Vec<Complex64> {
    (0..len).map(|i| Complex64::new((i % 2) as f64, 0.0)).collect()
}

/// Unit-amplitude sine at `freq_hz` sampled at `sample_rate`
pub fn tone_signal(len: usize, freq_hz: f64, sample_rate: f64) -> Vec<Complex64> {
    (0..len)
        .map(|i| Complex64::new((2.0 * PI * freq_hz * i as f64 / sample_rate).sin(), 0.0))
        .collect()
}

pub(super) fn correctness(
    transform: TransformFn,
    config: &HarnessConfig,
    _metrics: &mut MetricsCollector,
) -> Result<Section, VerificationError> {
    const CHECK: &str = "correctness";
    let tol = config.tolerance;
    let mut notes = Vec::new();

    let result = transform(&reals(&[1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0]));
    ensure(!result.is_empty(), CHECK, || "empty spectrum for 8 samples".to_string())?;
    let dc = result[0];
    ensure((dc.re - 4.0).abs() < tol, CHECK, || format!("DC component should be 4, got {}", dc.re))?;
    ensure(dc.im.abs() < tol, CHECK, || format!("DC imaginary part should be 0, got {}", dc.im))?;
    notes.push(format!("DC component test passed: {:.4}", dc.re));

    let result = transform(&reals(&[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]));
    ensure(result.len() == 8, CHECK, || format!("impulse spectrum has {} bins", result.len()))?;
    for (k, bin) in result.iter().enumerate() {
        ensure((bin.re - 1.0).abs() < tol && bin.im.abs() < tol, CHECK, || {
            format!("impulse bin {} should be 1+0i, got {}", k, bin)
        })?;
    }
    notes.push("Impulse test passed".to_string());

    let result = transform(&reals(&[1.0; 8]));
    ensure(result.len() == 8, CHECK, || format!("constant spectrum has {} bins", result.len()))?;
    ensure((result[0].re - 8.0).abs() < tol, CHECK, || format!("DC should be 8, got {}", result[0]))?;
    for (k, bin) in result.iter().enumerate().skip(1) {
        ensure(bin.norm() < tol, CHECK, || format!("bin {} should be zero, got {}", k, bin))?;
    }
    notes.push("Constant signal test passed".to_string());

    Ok(Section { title: "Correctness", notes })
}

pub(super) fn edge_cases(
    transform: TransformFn,
    _config: &HarnessConfig,
    _metrics: &mut MetricsCollector,
) -> Result<Section, VerificationError> {
    const CHECK: &str = "edge cases";
    let mut notes = Vec::new();

    let result = transform(&[]);
    ensure(result.is_empty(), CHECK, || "empty input should return empty output".to_string())?;
    notes.push("Empty input test passed".to_string());

    let single = Complex64::new(5.0, 0.0);
    let result = transform(&[single]);
    ensure(result == [single], CHECK, || format!("single element should return itself, got {:?}", result))?;
    notes.push("Single element test passed".to_string());

    let result = transform(&reals(&[1.0, 0.0, 1.0, 0.0]));
    ensure(result.len() == 4, CHECK, || "length should be preserved for power of 2".to_string())?;
    notes.push("Power of 2 test passed".to_string());

    let result = transform(&reals(&[1.0, 2.0, 3.0]));
    ensure(result.len() == 4, CHECK, || "non-power of 2 should be padded to next power".to_string())?;
    notes.push("Non-power of 2 padding test passed".to_string());

    Ok(Section { title: "Edge Cases", notes })
}

pub(super) fn reference_agreement(
    transform: TransformFn,
    config: &HarnessConfig,
    _metrics: &mut MetricsCollector,
) -> Result<Section, VerificationError> {
    const CHECK: &str = "reference agreement";
    let mut notes = Vec::new();

    for &size in &config.benchmark_sizes {
        // Odd length exercises the padding path too
        let len = size.saturating_sub(1).max(1);
        let signal: Vec<Complex64> = (0..len)
            .map(|i| {
                let t = i as f64;
                Complex64::new((0.37 * t).sin() + 0.5 * (1.3 * t).cos(), (0.11 * t).cos())
            })
            .collect();

        let ours = transform(&signal);
        let theirs = reference_transform(&signal);
        ensure(ours.len() == padded_len(len), CHECK, || {
            format!("length {} produced {} bins, expected {}", len, ours.len(), padded_len(len))
        })?;

        let max_err = max_abs_error(&ours, &theirs);
        ensure(max_err < config.reference_tolerance, CHECK, || {
            format!("length {} differs from reference by {:e}", len, max_err)
        })?;

        let rms_div = divergence(&magnitudes(&ours), &magnitudes(&theirs));
        notes.push(format!("Size {:5}: max error {:.3e}, magnitude divergence {:.3e}", len, max_err, rms_div));
    }

    Ok(Section { title: "Reference Agreement", notes })
}

/// Time one transform per size
pub fn benchmark(transform: TransformFn, sizes: &[usize]) -> Vec<Timing> {
    sizes
        .iter()
        .map(|&size| {
            let signal = alternating_signal(size);
            let start = Instant::now();
            let _spectrum = transform(&signal);
            Timing { size, elapsed: start.elapsed() }
        })
        .collect()
}

// Times the engine and a pre-planned reference on a tone, one record each
fn record_tone_metrics(transform: TransformFn, config: &HarnessConfig, size: usize, metrics: &mut MetricsCollector) {
    let signal = tone_signal(size, config.tone_hz, config.sample_rate);
    let mut reference = ReferenceFft::new(size);

    let start = Instant::now();
    let ours = transform(&signal);
    let engine_elapsed = start.elapsed();

    let start = Instant::now();
    let theirs = reference.process(&signal);
    let reference_elapsed = start.elapsed();

    let reference_mags = magnitudes(&theirs);
    for (implementation, spectrum, elapsed) in [
        (ENGINE, &ours, engine_elapsed),
        (REFERENCE, &theirs, reference_elapsed),
    ] {
        let mags = magnitudes(spectrum);
        let mut record = Metrics::new(implementation, size, elapsed);
        record.detected_frequency = dominant_frequency(&mags, config.sample_rate);
        record.peak_magnitude = peak(&mags).map_or(0.0, |(_, mag)| mag);
        record.divergence_from_reference = divergence(&mags, &reference_mags);
        tracing::debug!(
            implementation,
            size,
            ms = record.processing_time_ms,
            freq = record.detected_frequency,
            "recorded metrics"
        );
        metrics.add(record);
    }
}

pub(super) fn performance(
    transform: TransformFn,
    config: &HarnessConfig,
    metrics: &mut MetricsCollector,
) -> Result<Section, VerificationError> {
    const CHECK: &str = "performance";
    let mut notes: Vec<String> = benchmark(transform, &config.benchmark_sizes)
        .iter()
        .map(|t| format!("Size {:5}: {:8.4} ms", t.size, t.millis()))
        .collect();

    let timing = benchmark(transform, &[config.performance_size])
        .pop()
        .ok_or_else(|| VerificationError::Failure {
            check: CHECK,
            message: "no timing recorded".to_string(),
        })?;
    ensure(timing.elapsed < config.time_limit, CHECK, || {
        format!(
            "FFT of {} samples took too long: {:.4}s",
            timing.size,
            timing.elapsed.as_secs_f64()
        )
    })?;
    notes.push(format!(
        "Performance test passed ({} samples: {:.4} ms)",
        timing.size,
        timing.millis()
    ));

    for &size in &config.benchmark_sizes {
        record_tone_metrics(transform, config, size, metrics);
    }
    notes.push(format!(
        "Average latency: {} {:.4} ms, {} {:.4} ms",
        ENGINE,
        metrics.average_latency(ENGINE),
        REFERENCE,
        metrics.average_latency(REFERENCE)
    ));

    Ok(Section { title: "Performance Benchmark", notes })
}

//! Per-run performance metrics and CSV export
//!
//! One [`Metrics`] record per timed transform; the collector keeps the most
//! recent [`DEFAULT_CAPACITY`] records.

use serde::Serialize;
use std::collections::VecDeque;
use std::io;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Label for the recursive engine
pub const ENGINE: &str = "recursive";

/// Label for the rustfft reference
pub const REFERENCE: &str = "rustfft";

/// History bound
pub const DEFAULT_CAPACITY: usize = 1000;

/// CSV column names, in field order
pub const CSV_HEADER: [&str; 8] = [
    "Timestamp",
    "Implementation",
    "Size",
    "Processing Time (ms)",
    "FPS",
    "Detected Frequency (Hz)",
    "Peak Magnitude",
    "Divergence",
];

#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to flush CSV output: {0}")]
    Io(#[from] io::Error),
}

/// One timed transform
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
    pub implementation: String,
    /// Signal length in samples
    pub size: usize,
    pub processing_time_ms: f64,
    /// Transforms per second at this latency (0 when unmeasurably fast)
    pub fps: f64,
    pub detected_frequency: f64,
    pub peak_magnitude: f64,
    /// RMS magnitude difference from the reference spectrum
    pub divergence_from_reference: f64,
}

impl Metrics {
    pub fn new(implementation: &str, size: usize, elapsed: Duration) -> Self {
        let processing_time_ms = elapsed.as_nanos() as f64 / 1e6;
        let fps = if processing_time_ms > 0.0 {
            1000.0 / processing_time_ms
        } else {
            0.0
        };
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();

        Self {
            timestamp,
            implementation: implementation.to_string(),
            size,
            processing_time_ms,
            fps,
            detected_frequency: 0.0,
            peak_magnitude: 0.0,
            divergence_from_reference: 0.0,
        }
    }
}

/// Bounded history of metrics, oldest dropped first
#[derive(Debug, Clone)]
pub struct MetricsCollector {
    history: VecDeque<Metrics>,
    capacity: usize,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl MetricsCollector {
    /// Create a collector holding at most `capacity` records (minimum 1)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            history: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity,
        }
    }

    pub fn add(&mut self, metrics: Metrics) {
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(metrics);
    }

    /// Records for one implementation, oldest first
    pub fn for_implementation<'a>(&'a self, implementation: &'a str) -> impl Iterator<Item = &'a Metrics> + 'a {
        self.history.iter().filter(move |m| m.implementation == implementation)
    }

    /// All records, oldest first
    pub fn all(&self) -> impl Iterator<Item = &Metrics> {
        self.history.iter()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Mean processing time in ms for one implementation (0.0 when none recorded)
    pub fn average_latency(&self, implementation: &str) -> f64 {
        let (sum, count) = self
            .for_implementation(implementation)
            .fold((0.0, 0usize), |(sum, count), m| (sum + m.processing_time_ms, count + 1));
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }

    /// Mean transforms per second for one implementation (0.0 when none recorded)
    pub fn average_fps(&self, implementation: &str) -> f64 {
        let (sum, count) = self
            .for_implementation(implementation)
            .fold((0.0, 0usize), |(sum, count), m| (sum + m.fps, count + 1));
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }

    /// Write the header and every record as CSV
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), MetricsError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        csv_writer.write_record(CSV_HEADER)?;
        for metrics in &self.history {
            csv_writer.serialize(metrics)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Write the history to a CSV file at `path`
    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), MetricsError> {
        let file = std::fs::File::create(path)?;
        self.write_csv(io::BufWriter::new(file))
    }
}

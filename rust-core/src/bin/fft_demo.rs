//! Transform a short real signal and print every bin
//!
//! Run with: cargo run --bin fft-demo -- --signal 1,1,1,1,0,0,0,0

use clap::Parser;
use radix2_fft::logging::{init_logging, LogConfig};
use radix2_fft::spectrum::analysis::{dominant_frequency, magnitudes};
use radix2_fft::transform_real;
use std::str::FromStr;

/// Comma-separated real samples; blank means an empty signal
#[derive(Debug, Clone, PartialEq)]
struct Samples(Vec<f64>);

impl FromStr for Samples {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Samples(Vec::new()));
        }
        s.split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<f64>()
                    .map_err(|e| format!("invalid sample '{}': {}", part, e))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Samples)
    }
}

#[derive(Parser, Debug)]
#[command(name = "fft-demo", about = "Print the FFT of a real signal")]
struct Args {
    /// Comma-separated real samples (pass "" or a bare --signal for an empty signal)
    #[arg(
        long,
        allow_hyphen_values = true,
        num_args = 0..=1,
        default_value = "1,1,1,1,0,0,0,0",
        default_missing_value = ""
    )]
    signal: Samples,

    /// Sample rate in Hz, used to report the dominant frequency
    #[arg(long)]
    sample_rate: Option<f64>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(&if args.verbose { LogConfig::verbose() } else { LogConfig::default() });

    let signal = &args.signal.0;
    let result = transform_real(signal);
    tracing::debug!(input = signal.len(), output = result.len(), "transform complete");

    println!("Input signal: {:?}", signal);
    println!("FFT result:");
    for (i, val) in result.iter().enumerate() {
        println!("  {}: {:.4} + {:.4}i", i, val.re, val.im);
    }

    if let Some(sample_rate) = args.sample_rate {
        let freq = dominant_frequency(&magnitudes(&result), sample_rate);
        println!("Dominant frequency: {:.2} Hz", freq);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_signal() {
        let args = Args::try_parse_from(["fft-demo"]).unwrap();
        assert_eq!(args.signal, Samples(vec![1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0]));
    }

    #[test]
    fn test_empty_signal_is_accepted() {
        let args = Args::try_parse_from(["fft-demo", "--signal", ""]).unwrap();
        assert!(args.signal.0.is_empty());
        assert!(transform_real(&args.signal.0).is_empty());

        let args = Args::try_parse_from(["fft-demo", "--signal"]).unwrap();
        assert!(args.signal.0.is_empty());
    }

    #[test]
    fn test_negative_and_spaced_samples() {
        let args = Args::try_parse_from(["fft-demo", "--signal", "-1.5, 2,3"]).unwrap();
        assert_eq!(args.signal, Samples(vec![-1.5, 2.0, 3.0]));
        assert_eq!(transform_real(&args.signal.0).len(), 4);
    }

    #[test]
    fn test_bad_sample_is_rejected() {
        assert!(Args::try_parse_from(["fft-demo", "--signal", "1,x"]).is_err());
        assert!("1,,2".parse::<Samples>().is_err());
    }
}

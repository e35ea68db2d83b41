//! Run the verification harness and exit 0 on success, 1 on any failure

use clap::Parser;
use radix2_fft::harness::{Harness, HarnessConfig, Report, VerificationError};
use radix2_fft::logging::{init_logging, LogConfig};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "fft-verify", about = "Verify the FFT against known values and timing bounds")]
struct Args {
    /// Absolute tolerance for known-value checks
    #[arg(long, default_value_t = 1e-10, allow_hyphen_values = true)]
    tolerance: f64,

    /// Time limit in seconds for the largest transform
    #[arg(long, default_value_t = 5.0, allow_hyphen_values = true)]
    time_limit: f64,

    /// Write the collected metrics to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn banner() {
    println!("{}", "=".repeat(50));
}

fn config_from_args(args: &Args) -> Result<HarnessConfig, VerificationError> {
    Ok(HarnessConfig {
        tolerance: args.tolerance,
        time_limit: HarnessConfig::time_limit_from_secs(args.time_limit)?,
        ..Default::default()
    })
}

fn run_suite(config: HarnessConfig) -> Result<Report, VerificationError> {
    banner();
    println!("Rust FFT Test Suite");
    banner();

    Harness::new(config)?.run_with(|section| {
        println!("\n=== {} ===", section.title);
        for note in &section.notes {
            println!("✓ {}", note);
        }
        println!("{}: PASSED", section.title);
    })
}

/// Parse `argv`, run the suite and return the process exit status
fn run<I, T>(argv: I) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = match Args::try_parse_from(argv) {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not failures
            return if e.use_stderr() { 1 } else { 0 };
        }
    };
    init_logging(&if args.verbose { LogConfig::verbose() } else { LogConfig::default() });

    let report = match config_from_args(&args).and_then(run_suite) {
        Ok(report) => report,
        Err(e) => {
            println!("\n❌ Test failed: {}", e);
            return 1;
        }
    };

    if let Some(path) = &args.csv {
        if let Err(e) = report.metrics.export_csv(path) {
            println!("\n❌ Could not export metrics to {}: {}", path.display(), e);
            return 1;
        }
        println!("\nMetrics written to {}", path.display());
    }

    println!();
    banner();
    println!("ALL TESTS PASSED");
    banner();
    0
}

fn main() -> ExitCode {
    ExitCode::from(run(std::env::args_os()))
}

//! Radix-2 FFT Workbench
//!
//! Recursive Cooley-Tukey transform with zero-padding to power-of-two
//! lengths, spectrum measurements and a verification harness.

pub mod harness;
pub mod logging;
pub mod spectrum;

pub use num_complex::Complex64;
pub use spectrum::{padded_len, transform, transform_real};

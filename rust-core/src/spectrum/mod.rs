//! Spectral analysis with FFT

pub mod fft;
pub mod analysis;
pub mod reference;

pub use fft::{padded_len, transform, transform_real};
pub use reference::{reference_transform, ReferenceFft};

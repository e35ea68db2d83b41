//! Read-only measurements over a computed spectrum
//!
//! Bin k of an N-point spectrum sits at `k * sample_rate / N` Hz.

use num_complex::Complex64;

/// Magnitude |X[k]| of every bin
pub fn magnitudes(spectrum: &[Complex64]) -> Vec<f64> {
    spectrum.iter().map(|c| c.norm()).collect()
}

/// Power |X[k]|^2 of every bin
pub fn power(spectrum: &[Complex64]) -> Vec<f64> {
    spectrum.iter().map(|c| c.norm_sqr()).collect()
}

/// Magnitude spectrum in dB
///
/// # Arguments
/// * `spectrum` - Complex spectrum
/// * `reference` - Reference value for dB calculation
///
/// # Returns
/// 20*log10(|X[k]|/reference), with |X[k]| clamped to 1e-10 to avoid log(0)
pub fn magnitudes_db(spectrum: &[Complex64], reference: f64) -> Vec<f64> {
    spectrum
        .iter()
        .map(|c| {
            let mag_clamped = c.norm().max(1e-10);
            20.0 * (mag_clamped / reference).log10()
        })
        .collect()
}

/// Convert a bin index to Hz for an N-point spectrum
pub fn bin_to_hz(bin: usize, len: usize, sample_rate: f64) -> f64 {
    if len == 0 {
        return 0.0;
    }
    bin as f64 * sample_rate / len as f64
}

/// Frequency of every bin in Hz
pub fn frequency_axis(len: usize, sample_rate: f64) -> Vec<f64> {
    (0..len).map(|bin| bin_to_hz(bin, len, sample_rate)).collect()
}

/// Index and value of the largest magnitude
pub fn peak(magnitudes: &[f64]) -> Option<(usize, f64)> {
    magnitudes
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best, (i, mag)| match best {
            Some((_, best_mag)) if best_mag >= mag => best,
            _ => Some((i, mag)),
        })
}

/// Find the dominant frequency in a magnitude spectrum
///
/// DC (bin 0) is skipped and only bins below N/2 are searched. The first bin
/// wins ties.
///
/// # Arguments
/// * `magnitudes` - Full N-point magnitude spectrum
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
/// Frequency of the strongest bin in Hz, or 0.0 if there are fewer than 2 bins
pub fn dominant_frequency(magnitudes: &[f64], sample_rate: f64) -> f64 {
    if magnitudes.len() < 2 {
        return 0.0;
    }

    let mut max_index = 1;
    let mut max_magnitude = magnitudes[1];
    for (i, &mag) in magnitudes.iter().enumerate().take(magnitudes.len() / 2).skip(2) {
        if mag > max_magnitude {
            max_magnitude = mag;
            max_index = i;
        }
    }

    bin_to_hz(max_index, magnitudes.len(), sample_rate)
}

/// Root mean square of a real signal (0.0 when empty)
pub fn rms(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    let sum_squares: f64 = signal.iter().map(|&s| s * s).sum();
    (sum_squares / signal.len() as f64).sqrt()
}

/// Root mean squared difference between two magnitude spectra
///
/// Returns `f64::MAX` when the lengths differ.
pub fn divergence(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return f64::MAX;
    }
    if a.is_empty() {
        return 0.0;
    }

    let sum_sq_diff: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
    (sum_sq_diff / a.len() as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::fft::transform_real;
    use std::f64::consts::PI;

    #[test]
    fn test_dominant_frequency_of_tone() {
        let sample_rate = 8000.0;
        let n = 256;
        // Bin 32 -> 1000 Hz
        let signal: Vec<f64> = (0..n)
            .map(|i| (2.0 * PI * 1000.0 * i as f64 / sample_rate).sin())
            .collect();

        let mags = magnitudes(&transform_real(&signal));
        let freq = dominant_frequency(&mags, sample_rate);

        assert!((freq - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_dominant_frequency_skips_dc() {
        let mags = [100.0, 1.0, 5.0, 2.0, 0.0, 0.0, 0.0, 50.0];
        assert_eq!(dominant_frequency(&mags, 8.0), 2.0);
        assert_eq!(dominant_frequency(&[3.0], 8.0), 0.0);
        assert_eq!(dominant_frequency(&[], 8.0), 0.0);
    }

    #[test]
    fn test_rms() {
        assert_eq!(rms(&[]), 0.0);
        assert!((rms(&[3.0, -3.0, 3.0, -3.0]) - 3.0).abs() < 1e-12);

        let sine: Vec<f64> = (0..1024).map(|i| (2.0 * PI * 8.0 * i as f64 / 1024.0).sin()).collect();
        assert!((rms(&sine) - 1.0 / 2.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_divergence() {
        let a = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(divergence(&a, &a), 0.0);
        assert!((divergence(&a, &[2.0, 3.0, 4.0, 5.0]) - 1.0).abs() < 1e-12);
        assert_eq!(divergence(&a, &[1.0]), f64::MAX);
        assert_eq!(divergence(&[], &[]), 0.0);
    }

    #[test]
    fn test_magnitudes_and_power() {
        let spectrum = [Complex64::new(3.0, 4.0), Complex64::new(0.0, -2.0)];
        assert_eq!(magnitudes(&spectrum), vec![5.0, 2.0]);
        assert_eq!(power(&spectrum), vec![25.0, 4.0]);

        let db = magnitudes_db(&spectrum, 1.0);
        assert!((db[1] - 20.0 * 2.0_f64.log10()).abs() < 1e-12);
        assert!((magnitudes_db(&[Complex64::new(0.0, 0.0)], 1.0)[0] + 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_frequency_axis_and_peak() {
        let freqs = frequency_axis(8, 48000.0);
        assert_eq!(freqs.len(), 8);
        assert_eq!(freqs[0], 0.0);
        assert_eq!(freqs[4], 24000.0);

        assert_eq!(peak(&[1.0, 7.0, 7.0, 2.0]), Some((1, 7.0)));
        assert_eq!(peak(&[]), None);
    }
}

//! Recursive radix-2 Cooley-Tukey FFT
//!
//! Inputs whose length is not a power of two are zero-padded up to the next
//! power of two, so the spectrum can be longer than the signal.

use num_complex::Complex64;
use std::f64::consts::PI;

/// Length of the spectrum produced for a signal of `len` samples
///
/// 0 and 1 map to themselves, every other length rounds up to a power of two.
pub fn padded_len(len: usize) -> usize {
    if len <= 1 {
        len
    } else {
        len.next_power_of_two()
    }
}

/// Compute the forward DFT of `signal`
///
/// # Arguments
/// * `signal` - Time-domain samples (not modified)
///
/// # Returns
/// Spectrum of length `padded_len(signal.len())`, bin k at k/N cycles per sample
pub fn transform(signal: &[Complex64]) -> Vec<Complex64> {
    let n = signal.len();
    if n <= 1 {
        return signal.to_vec();
    }

    let m = padded_len(n);
    if m != n {
        tracing::trace!(from = n, to = m, "zero-padding signal");
        let mut padded = Vec::with_capacity(m);
        padded.extend_from_slice(signal);
        padded.resize(m, Complex64::new(0.0, 0.0));
        return radix2(&padded);
    }

    radix2(signal)
}

/// Promote real samples to `re + 0i` and transform them
pub fn transform_real(signal: &[f64]) -> Vec<Complex64> {
    let complex: Vec<Complex64> = signal.iter().map(|&re| Complex64::new(re, 0.0)).collect();
    transform(&complex)
}

// `x.len()` must be a power of two (or 0/1).
fn radix2(x: &[Complex64]) -> Vec<Complex64> {
    let n = x.len();
    if n <= 1 {
        return x.to_vec();
    }

    let even: Vec<Complex64> = x.iter().step_by(2).copied().collect();
    let odd: Vec<Complex64> = x.iter().skip(1).step_by(2).copied().collect();

    let even_spectrum = radix2(&even);
    let odd_spectrum = radix2(&odd);

    let half = n / 2;
    let mut result = vec![Complex64::new(0.0, 0.0); n];
    for k in 0..half {
        let theta = -2.0 * PI * k as f64 / n as f64;
        let twiddle = Complex64::new(theta.cos(), theta.sin());
        let t = twiddle * odd_spectrum[k];
        result[k] = even_spectrum[k] + t;
        result[k + half] = even_spectrum[k] - t;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn close(a: Complex64, b: Complex64) -> bool {
        (a.re - b.re).abs() < TOL && (a.im - b.im).abs() < TOL
    }

    #[test]
    fn test_padded_len() {
        assert_eq!(padded_len(0), 0);
        assert_eq!(padded_len(1), 1);
        assert_eq!(padded_len(2), 2);
        assert_eq!(padded_len(3), 4);
        assert_eq!(padded_len(5), 8);
        assert_eq!(padded_len(1024), 1024);
        assert_eq!(padded_len(1025), 2048);
    }

    #[test]
    fn test_length_invariant() {
        for n in 0..70 {
            let signal = vec![Complex64::new(1.0, -1.0); n];
            assert_eq!(transform(&signal).len(), padded_len(n), "length {}", n);
        }
    }

    #[test]
    fn test_trivial_inputs() {
        assert!(transform(&[]).is_empty());

        let c = Complex64::new(5.0, -2.5);
        assert_eq!(transform(&[c]), vec![c]);
    }

    #[test]
    fn test_dc_component() {
        let signal = [1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0];
        let spectrum = transform_real(&signal);

        assert!((spectrum[0].re - 4.0).abs() < TOL);
        assert!(spectrum[0].im.abs() < TOL);
    }

    #[test]
    fn test_dc_equals_sum_after_padding() {
        let signal = [0.5, -2.0, 3.25, 7.0, 1.5];
        let spectrum = transform_real(&signal);
        let sum: f64 = signal.iter().sum();

        assert_eq!(spectrum.len(), 8);
        assert!((spectrum[0].re - sum).abs() < TOL);
        assert!(spectrum[0].im.abs() < TOL);
    }

    #[test]
    fn test_impulse_is_flat() {
        let mut signal = [0.0; 8];
        signal[0] = 1.0;

        for bin in transform_real(&signal) {
            assert!(close(bin, Complex64::new(1.0, 0.0)));
        }
    }

    #[test]
    fn test_constant_is_single_spike() {
        let spectrum = transform_real(&[1.0; 8]);

        assert!(close(spectrum[0], Complex64::new(8.0, 0.0)));
        for bin in &spectrum[1..] {
            assert!(bin.norm() < TOL);
        }
    }

    #[test]
    fn test_padding_matches_explicit_zeros() {
        let short = transform_real(&[1.0, 2.0, 3.0]);
        let explicit = transform_real(&[1.0, 2.0, 3.0, 0.0]);

        assert_eq!(short.len(), 4);
        assert_eq!(short, explicit);
    }

    #[test]
    fn test_power_of_two_passthrough() {
        let spectrum = transform_real(&[1.0, 0.0, 1.0, 0.0]);

        assert_eq!(spectrum.len(), 4);
        assert!(close(spectrum[0], Complex64::new(2.0, 0.0)));
        assert!(close(spectrum[1], Complex64::new(0.0, 0.0)));
        assert!(close(spectrum[2], Complex64::new(2.0, 0.0)));
        assert!(close(spectrum[3], Complex64::new(0.0, 0.0)));
    }

    #[test]
    fn test_matches_naive_dft() {
        let signal: Vec<Complex64> = (0..16)
            .map(|i| Complex64::new((i as f64 * 0.7).sin(), (i as f64 * 0.3).cos()))
            .collect();
        let spectrum = transform(&signal);

        let n = signal.len() as f64;
        for (k, bin) in spectrum.iter().enumerate() {
            let expected: Complex64 = signal
                .iter()
                .enumerate()
                .map(|(t, &x)| x * Complex64::from_polar(1.0, -2.0 * PI * (k * t) as f64 / n))
                .sum();
            assert!((bin - expected).norm() < 1e-9, "bin {}", k);
        }
    }

    #[test]
    fn test_sine_wave_peak() {
        // 3 cycles over 32 samples
        let signal: Vec<f64> = (0..32)
            .map(|i| (2.0 * PI * 3.0 * i as f64 / 32.0).sin())
            .collect();
        let spectrum = transform_real(&signal);

        assert!((spectrum[3].norm() - 16.0).abs() < 1e-9);
        assert!((spectrum[29].norm() - 16.0).abs() < 1e-9);
        assert!(spectrum[5].norm() < 1e-9);
    }

    #[test]
    fn test_nan_propagates() {
        let spectrum = transform_real(&[f64::NAN, 0.0, 0.0, 0.0]);
        assert!(spectrum.iter().all(|bin| bin.re.is_nan()));
    }

    #[test]
    fn test_input_untouched() {
        let signal = vec![Complex64::new(1.0, 2.0), Complex64::new(3.0, 4.0), Complex64::new(5.0, 6.0)];
        let before = signal.clone();
        let _ = transform(&signal);
        assert_eq!(signal, before);
    }
}

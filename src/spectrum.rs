use std::f64::consts::PI;

use crate::types::{ChaosError, C64};
use crate::utils::{mean, validate_finite};

/// One-sided amplitude spectrum of a uniformly sampled scalar series.
#[derive(Debug, Clone)]
pub struct Spectrum {
    /// Frequency bins k/(N·dt), k = 0..⌊N/2⌋.
    pub frequencies: Vec<f64>,
    /// Amplitudes |X_k|·2/N per bin.
    pub amplitudes: Vec<f64>,
}

impl Spectrum {
    /// Index of the largest-amplitude bin.
    pub fn peak_bin(&self) -> usize {
        self.amplitudes
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    /// Frequency of the largest-amplitude bin.
    pub fn peak_frequency(&self) -> f64 {
        self.frequencies[self.peak_bin()]
    }

    /// Width of one frequency bin.
    pub fn bin_width(&self) -> f64 {
        if self.frequencies.len() < 2 {
            0.0
        } else {
            self.frequencies[1] - self.frequencies[0]
        }
    }
}

/// Compute the one-sided amplitude spectrum of a real scalar series with
/// sample spacing `dt`.
///
/// The series is mean-centered, transformed with a direct discrete Fourier
/// transform, and the first ⌊N/2⌋ bins are returned with amplitudes scaled
/// by 2/N, paired with frequencies k/(N·dt).
///
/// No window function is applied: a frequency that falls between bins
/// leaks into its neighbours. That is an accepted limitation of this
/// analyzer, matched by the wide tolerance of its consumers.
///
/// # Errors
/// * `InsufficientData` - fewer than 2 samples.
/// * `DomainError` - non-positive or non-finite `dt`, or non-finite
///   samples.
pub fn power_spectrum(series: &[f64], dt: f64) -> Result<Spectrum, ChaosError> {
    let n = series.len();
    if n < 2 {
        return Err(ChaosError::InsufficientData(format!(
            "power spectrum needs at least 2 samples, got {n}"
        )));
    }
    if !dt.is_finite() || dt <= 0.0 {
        return Err(ChaosError::DomainError(format!(
            "sample spacing must be positive and finite, got {dt}"
        )));
    }
    validate_finite(series, "power spectrum input")?;

    let offset = mean(series);
    let centered: Vec<f64> = series.iter().map(|v| v - offset).collect();

    let n_bins = n / 2;
    let mut frequencies = Vec::with_capacity(n_bins);
    let mut amplitudes = Vec::with_capacity(n_bins);
    let scale = 2.0 / n as f64;

    for k in 0..n_bins {
        let mut sum = C64::zero();
        for (j, &v) in centered.iter().enumerate() {
            let angle = -2.0 * PI * k as f64 * j as f64 / n as f64;
            sum += C64::new(angle.cos(), angle.sin()) * v;
        }
        frequencies.push(k as f64 / (n as f64 * dt));
        amplitudes.push(sum.norm() * scale);
    }

    Ok(Spectrum {
        frequencies,
        amplitudes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_near(a: f64, b: f64, eps: f64) {
        assert!(
            (a - b).abs() < eps,
            "expected {a} ≈ {b} (diff = {})",
            (a - b).abs()
        );
    }

    fn sine_series(f0: f64, dt: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|j| (2.0 * PI * f0 * j as f64 * dt).sin())
            .collect()
    }

    #[test]
    fn test_pure_sine_peak_on_bin() {
        // f0 = 1.25 lands exactly on bin 10 of an N=400, dt=0.02 transform
        let dt = 0.02;
        let n = 400;
        let f0 = 1.25;
        let spectrum = power_spectrum(&sine_series(f0, dt, n), dt).unwrap();
        assert_near(spectrum.peak_frequency(), f0, spectrum.bin_width() / 2.0);
        // On-bin sine recovers its unit amplitude
        assert_near(spectrum.amplitudes[spectrum.peak_bin()], 1.0, 1e-6);
    }

    #[test]
    fn test_off_bin_sine_within_one_bin() {
        let dt = 0.01;
        let n = 512;
        let f0 = 3.3;
        let spectrum = power_spectrum(&sine_series(f0, dt, n), dt).unwrap();
        assert!(
            (spectrum.peak_frequency() - f0).abs() <= spectrum.bin_width(),
            "peak {} more than one bin from {f0}",
            spectrum.peak_frequency()
        );
    }

    #[test]
    fn test_mean_centering_kills_dc_bin() {
        let dt = 0.05;
        let series: Vec<f64> = sine_series(1.0, dt, 200)
            .iter()
            .map(|v| v + 7.5)
            .collect();
        let spectrum = power_spectrum(&series, dt).unwrap();
        assert_near(spectrum.amplitudes[0], 0.0, 1e-9);
    }

    #[test]
    fn test_bin_count_and_width() {
        let spectrum = power_spectrum(&sine_series(1.0, 0.1, 100), 0.1).unwrap();
        assert_eq!(spectrum.frequencies.len(), 50);
        assert_eq!(spectrum.amplitudes.len(), 50);
        assert_near(spectrum.bin_width(), 0.1, 1e-12);
        assert_near(spectrum.frequencies[0], 0.0, 1e-12);
    }

    #[test]
    fn test_too_few_samples() {
        let err = power_spectrum(&[1.0], 0.1).unwrap_err();
        assert!(matches!(err, ChaosError::InsufficientData(_)));
    }

    #[test]
    fn test_invalid_spacing() {
        let err = power_spectrum(&[1.0, 2.0, 3.0], 0.0).unwrap_err();
        assert!(matches!(err, ChaosError::DomainError(_)));
    }

    #[test]
    fn test_non_finite_sample() {
        let err = power_spectrum(&[1.0, f64::NAN, 3.0], 0.1).unwrap_err();
        assert!(matches!(err, ChaosError::DomainError(_)));
    }
}

use rustfft::{num_complex::Complex, FftPlanner};

use super::model::SpectrumPoint;
use crate::error::{EditorError, Result};

/// Frequency-domain transform used to build amplitude spectra.
///
/// Implementations return the full spectrum: one point per transform bin,
/// so the length equals the transform size (including DC and the mirrored
/// upper half).
pub trait SpectrumTransform {
    fn spectrum(&self, samples: &[f64], delta_t: f64) -> Result<Vec<SpectrumPoint>>;
}

/// Fourier amplitude spectrum via `rustfft`.
///
/// Input is zero-padded to the next power of two `n`; bin `k` sits at
/// `k / (n * dt)` Hz and has amplitude `|X_k| * dt`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FftTransform;

impl SpectrumTransform for FftTransform {
    fn spectrum(&self, samples: &[f64], delta_t: f64) -> Result<Vec<SpectrumPoint>> {
        if !(delta_t.is_finite() && delta_t > 0.0) {
            return Err(EditorError::Transform(format!(
                "sample interval must be positive, got {delta_t}"
            )));
        }
        if samples.is_empty() {
            return Ok(Vec::new());
        }
        if let Some(i) = samples.iter().position(|s| !s.is_finite()) {
            return Err(EditorError::Transform(format!("sample {i} is not finite")));
        }

        let n = samples.len().next_power_of_two();
        let mut buffer: Vec<Complex<f64>> =
            samples.iter().map(|&v| Complex::new(v, 0.0)).collect();
        buffer.resize(n, Complex::new(0.0, 0.0));

        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(n);
        fft.process(&mut buffer);

        let df = 1.0 / (n as f64 * delta_t);
        Ok(buffer
            .iter()
            .enumerate()
            .map(|(k, c)| SpectrumPoint {
                frequency: k as f64 * df,
                amplitude: c.norm() * delta_t,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn output_length_is_padded_transform_size() {
        let out = FftTransform.spectrum(&vec![1.0; 300], 0.01).unwrap();
        assert_eq!(out.len(), 512);
        assert_eq!(out[0].frequency, 0.0);
        assert!((out[1].frequency - 1.0 / 5.12).abs() < 1e-12);
    }

    #[test]
    fn sine_peaks_at_its_frequency() {
        let dt = 0.01;
        let samples: Vec<f64> = (0..1024)
            .map(|i| (2.0 * PI * 12.5 * i as f64 * dt).sin())
            .collect();
        let out = FftTransform.spectrum(&samples, dt).unwrap();
        let peak = out[1..512]
            .iter()
            .max_by(|a, b| a.amplitude.total_cmp(&b.amplitude))
            .unwrap();
        assert!((peak.frequency - 12.5).abs() < 0.1, "{}", peak.frequency);
    }

    #[test]
    fn empty_input_gives_empty_spectrum() {
        assert!(FftTransform.spectrum(&[], 0.01).unwrap().is_empty());
    }

    #[test]
    fn bad_interval_or_samples_are_transform_errors() {
        assert!(matches!(
            FftTransform.spectrum(&[1.0], 0.0),
            Err(EditorError::Transform(_))
        ));
        assert!(matches!(
            FftTransform.spectrum(&[1.0, f64::NAN], 0.01),
            Err(EditorError::Transform(_))
        ));
    }
}

use std::f64::consts::PI;

use log::debug;
use rustfft::{num_complex::Complex, FftPlanner};

use crate::data::model::FilterRange;
use crate::error::{EditorError, Result};

/// Applies a band-pass to a time-domain trace for previewing corner choices.
pub trait BandpassFilter {
    fn apply(&self, samples: &[f64], delta_t: f64, range: &FilterRange) -> Result<Vec<f64>>;
}

/// Frequency-domain band-pass with cosine tapers outside each corner.
///
/// A zero taper gives a brick-wall mask.
#[derive(Debug, Clone, Copy)]
pub struct FftBandpass {
    /// Taper width in Hz on each side of the pass band.
    pub taper_hz: f64,
}

impl Default for FftBandpass {
    fn default() -> Self {
        Self { taper_hz: 0.1 }
    }
}

impl FftBandpass {
    /// Gain of the mask at frequency `f` (Hz, non-negative).
    pub fn gain(&self, f: f64, range: &FilterRange) -> f64 {
        let (lo, hi) = (range.low(), range.high());
        if f >= lo && f <= hi {
            return 1.0;
        }
        if self.taper_hz <= 0.0 {
            return 0.0;
        }
        let dist = if f < lo { lo - f } else { f - hi };
        if dist >= self.taper_hz {
            0.0
        } else {
            0.5 * (1.0 + (PI * dist / self.taper_hz).cos())
        }
    }
}

impl BandpassFilter for FftBandpass {
    fn apply(&self, samples: &[f64], delta_t: f64, range: &FilterRange) -> Result<Vec<f64>> {
        if !(delta_t.is_finite() && delta_t > 0.0) {
            return Err(EditorError::Transform(format!(
                "sample interval must be positive, got {delta_t}"
            )));
        }
        if samples.is_empty() {
            return Ok(Vec::new());
        }

        let n = samples.len().next_power_of_two();
        let mut buffer: Vec<Complex<f64>> =
            samples.iter().map(|&v| Complex::new(v, 0.0)).collect();
        buffer.resize(n, Complex::new(0.0, 0.0));

        let mut planner = FftPlanner::<f64>::new();
        planner.plan_fft_forward(n).process(&mut buffer);

        let df = 1.0 / (n as f64 * delta_t);
        for (k, c) in buffer.iter_mut().enumerate() {
            // mirrored bins share the gain of their positive frequency
            let bin = if k <= n / 2 { k } else { n - k };
            *c *= self.gain(bin as f64 * df, range);
        }

        planner.plan_fft_inverse(n).process(&mut buffer);
        let scale = 1.0 / n as f64;
        debug!(
            "band-pass preview {:.3}-{:.3} Hz over {} samples",
            range.low(),
            range.high(),
            samples.len()
        );
        Ok(buffer[..samples.len()].iter().map(|c| c.re * scale).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sines(dt: f64, n: usize, freqs: &[f64]) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let t = i as f64 * dt;
                freqs.iter().map(|f| (2.0 * PI * f * t).sin()).sum()
            })
            .collect()
    }

    fn rms(v: &[f64]) -> f64 {
        (v.iter().map(|x| x * x).sum::<f64>() / v.len() as f64).sqrt()
    }

    #[test]
    fn pass_band_keeps_signal_and_stop_band_removes_it() {
        let dt = 0.01;
        // 1024 samples: 3.125 Hz and 25 Hz fall exactly on bins
        let low_tone = sines(dt, 1024, &[3.125]);
        let mixed = sines(dt, 1024, &[3.125, 25.0]);
        let range = FilterRange::new(1.0, 5.0, 50.0).unwrap();
        let out = FftBandpass { taper_hz: 0.0 }.apply(&mixed, dt, &range).unwrap();
        assert_eq!(out.len(), mixed.len());
        let err: Vec<f64> = out.iter().zip(&low_tone).map(|(a, b)| a - b).collect();
        assert!(rms(&err) < 1e-9, "{}", rms(&err));
    }

    #[test]
    fn taper_is_smooth_between_corners() {
        let f = FftBandpass { taper_hz: 1.0 };
        let range = FilterRange::new(2.0, 10.0, 50.0).unwrap();
        assert_eq!(f.gain(5.0, &range), 1.0);
        assert!((f.gain(1.5, &range) - 0.5).abs() < 1e-12);
        assert_eq!(f.gain(0.5, &range), 0.0);
        assert_eq!(f.gain(12.0, &range), 0.0);
    }

    #[test]
    fn empty_trace_and_bad_interval() {
        let range = FilterRange::new(1.0, 5.0, 50.0).unwrap();
        assert!(FftBandpass::default().apply(&[], 0.01, &range).unwrap().is_empty());
        assert!(FftBandpass::default().apply(&[1.0], -1.0, &range).is_err());
    }
}

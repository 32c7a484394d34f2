//! Windowed forward FFT producing a magnitude spectrum.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

use crate::error::AnalyzerError;

/// Hann-windowed FFT of a fixed size N, emitting N/2 + 1 magnitudes
pub struct SpectralAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    /// Precomputed Hann coefficients (length N)
    window: Vec<f32>,
    buffer: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
    /// Output, sized exactly N/2 + 1
    magnitudes: Vec<f32>,
}

impl SpectralAnalyzer {
    /// Plan a transform of `size` samples. Size must be even and non-zero.
    pub fn new(size: usize) -> Result<Self, AnalyzerError> {
        if size == 0 || size % 2 != 0 {
            return Err(AnalyzerError::InvalidWindowSize(size));
        }

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let scratch_len = fft.get_inplace_scratch_len();

        let window = (0..size).map(|i| hann_window(i, size)).collect();

        Ok(Self {
            fft,
            window,
            buffer: vec![Complex::new(0.0, 0.0); size],
            scratch: vec![Complex::new(0.0, 0.0); scratch_len],
            magnitudes: vec![0.0; size / 2 + 1],
        })
    }

    /// Transform size N
    pub fn size(&self) -> usize {
        self.window.len()
    }

    /// Number of output bins (N/2 + 1)
    pub fn bin_count(&self) -> usize {
        self.magnitudes.len()
    }

    /// Analyze a snapshot of the sample window.
    ///
    /// Uses the newest N samples; a shorter snapshot is zero-filled at the end.
    pub fn process(&mut self, samples: &[i16]) -> &[f32] {
        let size = self.size();
        let start = samples.len().saturating_sub(size);
        let recent = &samples[start..];

        for (i, slot) in self.buffer.iter_mut().enumerate() {
            let value = recent
                .get(i)
                .map(|&s| s as f32 * self.window[i])
                .unwrap_or(0.0);
            *slot = Complex::new(value, 0.0);
        }

        self.fft
            .process_with_scratch(&mut self.buffer, &mut self.scratch);

        for (magnitude, bin) in self.magnitudes.iter_mut().zip(&self.buffer) {
            *magnitude = bin.norm();
        }

        &self.magnitudes
    }
}

/// Hann window function for FFT analysis
pub fn hann_window(index: usize, size: usize) -> f32 {
    if size < 2 {
        return 1.0;
    }
    0.5 * (1.0 - ((2.0 * PI * index as f32) / (size as f32 - 1.0)).cos())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq_hz: f32, sample_rate: f32, len: usize, amplitude: f32) -> Vec<i16> {
        (0..len)
            .map(|i| (amplitude * (2.0 * PI * freq_hz * i as f32 / sample_rate).sin()) as i16)
            .collect()
    }

    fn peak_bin(magnitudes: &[f32]) -> usize {
        magnitudes
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap()
    }

    #[test]
    fn test_hann_window() {
        let size = 1024;

        // Hann window should be 0 at edges, 1 at center
        assert!((hann_window(0, size) - 0.0).abs() < 0.01);
        assert!((hann_window(size - 1, size) - 0.0).abs() < 0.01);
        assert!((hann_window(size / 2, size) - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_invalid_sizes_rejected() {
        assert_eq!(
            SpectralAnalyzer::new(0).err(),
            Some(AnalyzerError::InvalidWindowSize(0))
        );
        assert_eq!(
            SpectralAnalyzer::new(1023).err(),
            Some(AnalyzerError::InvalidWindowSize(1023))
        );
    }

    #[test]
    fn test_output_length_and_sign() {
        for power in 1..=13 {
            let size = 1usize << power;
            let mut analyzer = SpectralAnalyzer::new(size).unwrap();
            let input = sine(440.0, 44100.0, size, 8000.0);
            let magnitudes = analyzer.process(&input);
            assert_eq!(magnitudes.len(), size / 2 + 1);
            assert!(magnitudes.iter().all(|&m| m >= 0.0 && m.is_finite()));
        }
    }

    #[test]
    fn test_silence_is_zero() {
        let mut analyzer = SpectralAnalyzer::new(1024).unwrap();
        let magnitudes = analyzer.process(&vec![0; 1024]);
        assert!(magnitudes.iter().all(|&m| m.abs() < 1e-6));
    }

    #[test]
    fn test_sine_peak_bin() {
        let mut analyzer = SpectralAnalyzer::new(1024).unwrap();
        let input = sine(1034.5, 44100.0, 1024, 10000.0);
        let peak = peak_bin(analyzer.process(&input));
        assert!((23..=25).contains(&peak), "peak at bin {}", peak);
    }

    #[test]
    fn test_underfilled_snapshot_is_zero_padded() {
        let mut analyzer = SpectralAnalyzer::new(1024).unwrap();
        let input = sine(1034.5, 44100.0, 300, 10000.0);
        let magnitudes = analyzer.process(&input).to_vec();
        assert_eq!(magnitudes.len(), 513);
        assert!(magnitudes.iter().any(|&m| m > 0.0));

        // Empty snapshot analyzes as silence
        let silent = analyzer.process(&[]);
        assert!(silent.iter().all(|&m| m.abs() < 1e-6));
    }

    #[test]
    fn test_uses_newest_samples() {
        let mut analyzer = SpectralAnalyzer::new(1024).unwrap();
        let mut input = vec![0i16; 512];
        input.extend(sine(1034.5, 44100.0, 1024, 10000.0));
        let peak = peak_bin(analyzer.process(&input));
        assert!((23..=25).contains(&peak));
    }
}

//! Spectral analysis configuration.

use crate::error::{AnalyzerError, ConfigError};

/// Capture and transform parameters
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Requested capture sample rate (Hz)
    /// The device may negotiate a different rate; the pipeline follows the actual one.
    pub sample_rate_hz: u32,

    /// Transform window size N (samples, even and non-zero)
    /// 8192 @ 44.1kHz = 5.4 Hz per bin, ~186ms of audio
    pub window_size: usize,

    /// Calibration divisor applied to every magnitude before dB conversion
    /// 1.0 = raw 16-bit amplitude units
    pub magnitude_scale: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 44100,
            window_size: 8192,
            magnitude_scale: 1.0,
        }
    }
}

impl AnalysisConfig {
    /// Nyquist frequency (Hz)
    pub fn nyquist_hz(&self) -> f32 {
        self.sample_rate_hz as f32 / 2.0
    }

    /// Validate configuration (window size even, sample rate positive, etc.)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size == 0 || self.window_size % 2 != 0 {
            return Err(AnalyzerError::InvalidWindowSize(self.window_size).into());
        }
        if self.sample_rate_hz == 0 {
            return Err(ConfigError::ZeroSampleRate);
        }
        if !self.magnitude_scale.is_finite() || self.magnitude_scale <= 0.0 {
            return Err(ConfigError::InvalidMagnitudeScale(self.magnitude_scale));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nyquist() {
        let config = AnalysisConfig::default();
        assert_eq!(config.nyquist_hz(), 22050.0);
    }

    #[test]
    fn test_validate_rejects_bad_window() {
        for size in [0, 1, 1023] {
            let config = AnalysisConfig {
                window_size: size,
                ..Default::default()
            };
            assert_eq!(
                config.validate(),
                Err(ConfigError::Analyzer(AnalyzerError::InvalidWindowSize(size)))
            );
        }
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_scale() {
        let config = AnalysisConfig {
            magnitude_scale: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}

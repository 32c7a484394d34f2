//! Spectrum display scaling: frequency axis, dB axis, tilt, smoothing and geometry.

use crate::error::ConfigError;

/// How smoothed bins are turned into geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum RenderMode {
    /// One filled bar per adjacent bin pair
    Bars,

    /// Catmull-Rom interpolated curve through all bins
    #[default]
    Line,
}

/// Screen mapping parameters with physical units
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    /// Frequency at the left edge of the viewport (Hz)
    pub min_frequency_hz: f32,

    /// Level mapped to the bottom of the viewport (dB)
    pub min_db: f32,

    /// Level mapped to the top of the viewport (dB)
    pub max_db: f32,

    /// Tilt compensation slope (dB per octave)
    /// 4.5 dB/oct counteracts most of the natural pink-ish roll-off
    pub tilt_db_per_octave: f32,

    /// Frequency at which tilt compensation is 0 dB (Hz)
    pub tilt_ref_hz: f32,

    /// Added to magnitudes before log10 so silence stays finite
    pub db_epsilon: f32,

    /// EMA weight of the newest frame, in (0, 1]
    /// Lower = smoother, more lag
    pub smoothing_factor: f32,

    /// Narrowest bar drawn in bars mode (pixels)
    pub min_bar_width_px: f32,

    /// Interpolated samples per spline segment (10 = Δt 0.1)
    pub spline_steps: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            min_frequency_hz: 20.0,
            min_db: 55.0,
            max_db: 150.0,
            tilt_db_per_octave: 4.5,
            tilt_ref_hz: 1000.0,
            db_epsilon: 1e-12,
            smoothing_factor: 0.5,
            min_bar_width_px: 2.0,
            spline_steps: 10,
        }
    }
}

impl DisplayConfig {
    /// Validate against the Nyquist frequency of the active analysis setup
    pub fn validate(&self, nyquist_hz: f32) -> Result<(), ConfigError> {
        for freq in [self.min_frequency_hz, self.tilt_ref_hz] {
            if !freq.is_finite() || freq <= 0.0 {
                return Err(ConfigError::InvalidFrequency(freq));
            }
        }
        if self.min_frequency_hz >= nyquist_hz {
            return Err(ConfigError::MinFrequencyAboveNyquist {
                min: self.min_frequency_hz,
                nyquist: nyquist_hz,
            });
        }
        if !(self.min_db < self.max_db) {
            return Err(ConfigError::InvalidDbRange {
                min: self.min_db,
                max: self.max_db,
            });
        }
        if !(self.smoothing_factor > 0.0 && self.smoothing_factor <= 1.0) {
            return Err(ConfigError::InvalidSmoothing(self.smoothing_factor));
        }
        if self.spline_steps == 0 {
            return Err(ConfigError::ZeroSplineSteps);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(DisplayConfig::default().validate(22050.0).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_smoothing = DisplayConfig {
            smoothing_factor: 0.0,
            ..Default::default()
        };
        assert_eq!(
            bad_smoothing.validate(22050.0),
            Err(ConfigError::InvalidSmoothing(0.0))
        );

        let inverted = DisplayConfig {
            min_db: 150.0,
            max_db: 55.0,
            ..Default::default()
        };
        assert!(inverted.validate(22050.0).is_err());

        // 20 Hz minimum cannot exceed Nyquist of a 32 Hz capture
        assert!(DisplayConfig::default().validate(16.0).is_err());
    }
}

//! Magnitude bins → screen coordinates.
//!
//! The x axis is logarithmic in frequency between `min_frequency_hz` and
//! Nyquist, so every octave occupies the same width. The y axis is dB with a
//! per-octave tilt added around a reference frequency, clamped to the
//! configured dB range and scaled to the viewport height.

use super::Viewport;
use crate::params::DisplayConfig;

/// Per-bin frequency table plus the dB and log-frequency scaling
#[derive(Debug, Clone)]
pub struct FrequencyMapper {
    /// Effective frequency of every bin (Hz); bin 0 is lifted off 0 Hz
    frequencies: Vec<f32>,
    log2_min_hz: f32,
    log2_span: f32,
    min_db: f32,
    max_db: f32,
    tilt_db_per_octave: f32,
    tilt_ref_hz: f32,
    db_epsilon: f32,
    magnitude_scale: f32,
}

impl FrequencyMapper {
    /// Build the table for the N/2 + 1 bins of an N-point transform at `sample_rate` Hz.
    ///
    /// DC has no position on a log axis, so bin 0 is placed at half a bin
    /// width. This keeps every coordinate finite and the table monotonic.
    pub fn new(
        display: &DisplayConfig,
        magnitude_scale: f32,
        sample_rate: u32,
        window_size: usize,
    ) -> Self {
        let bin_width = sample_rate as f32 / window_size as f32;
        let bin_count = window_size / 2 + 1;
        let nyquist = sample_rate as f32 / 2.0;

        let frequencies = (0..bin_count)
            .map(|k| if k == 0 { bin_width / 2.0 } else { k as f32 * bin_width })
            .collect();

        let log2_min_hz = display.min_frequency_hz.log2();

        Self {
            frequencies,
            log2_min_hz,
            log2_span: nyquist.log2() - log2_min_hz,
            min_db: display.min_db,
            max_db: display.max_db,
            tilt_db_per_octave: display.tilt_db_per_octave,
            tilt_ref_hz: display.tilt_ref_hz,
            db_epsilon: display.db_epsilon,
            magnitude_scale,
        }
    }

    /// Horizontal position of `freq_hz` in a viewport `width` pixels wide.
    /// Frequencies below the minimum land at negative x.
    pub fn x_position(&self, freq_hz: f32, width: f32) -> f32 {
        width * (freq_hz.log2() - self.log2_min_hz) / self.log2_span
    }

    /// Tilt-compensated, clamped level of one bin (dB)
    pub fn level_db(&self, magnitude: f32, freq_hz: f32) -> f32 {
        let db = 20.0 * (magnitude / self.magnitude_scale + self.db_epsilon).log10();
        let tilt = self.tilt_db_per_octave * (freq_hz / self.tilt_ref_hz).log2();
        let level = db + tilt;
        if level.is_nan() {
            return self.min_db;
        }
        level.clamp(self.min_db, self.max_db)
    }

    /// Pixel height of one bin, in [0, height]
    pub fn height(&self, magnitude: f32, freq_hz: f32, height: f32) -> f32 {
        let level = self.level_db(magnitude, freq_hz);
        (level - self.min_db) / (self.max_db - self.min_db) * height
    }

    /// Map a whole spectrum into x positions and target heights.
    pub fn map_into(
        &self,
        magnitudes: &[f32],
        viewport: Viewport,
        xs: &mut Vec<f32>,
        heights: &mut Vec<f32>,
    ) {
        xs.clear();
        heights.clear();

        for (&magnitude, &freq) in magnitudes.iter().zip(&self.frequencies) {
            xs.push(self.x_position(freq, viewport.width));
            heights.push(self.height(magnitude, freq, viewport.height));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 1024.0,
        height: 768.0,
    };

    fn mapper(window_size: usize) -> FrequencyMapper {
        FrequencyMapper::new(&DisplayConfig::default(), 1.0, 44100, window_size)
    }

    #[test]
    fn test_silence_maps_to_floor() {
        let mapper = mapper(1024);
        let magnitudes = vec![0.0; 513];
        let (mut xs, mut heights) = (Vec::new(), Vec::new());
        mapper.map_into(&magnitudes, VIEWPORT, &mut xs, &mut heights);

        assert_eq!(xs.len(), 513);
        assert!(heights.iter().all(|&h| h == 0.0));
        assert!(xs.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_x_strictly_monotonic() {
        let mapper = mapper(8192);
        let (mut xs, mut heights) = (Vec::new(), Vec::new());
        mapper.map_into(&vec![0.0; 4097], VIEWPORT, &mut xs, &mut heights);
        assert_eq!(xs.len(), 4097);
        assert!(xs.windows(2).all(|w| w[1] > w[0]));

        // Range endpoints
        assert!(mapper.x_position(20.0, VIEWPORT.width).abs() < 1e-3);
        assert!((mapper.x_position(22050.0, VIEWPORT.width) - VIEWPORT.width).abs() < 1e-2);
    }

    #[test]
    fn test_equal_octave_spacing() {
        let mapper = mapper(8192);
        let octave = mapper.x_position(40.0, VIEWPORT.width) - mapper.x_position(20.0, VIEWPORT.width);
        for f in [55.0, 110.0, 440.0, 1000.0, 5000.0, 11000.0] {
            let width = mapper.x_position(2.0 * f, VIEWPORT.width) - mapper.x_position(f, VIEWPORT.width);
            assert!((width - octave).abs() < 1e-2, "{} vs {}", width, octave);
        }
    }

    #[test]
    fn test_tilt_zero_at_reference() {
        let mapper = mapper(8192);
        // 1e4 magnitude = 80 dB, no tilt at 1 kHz
        assert!((mapper.level_db(1e4, 1000.0) - 80.0).abs() < 1e-3);
        // One octave up gains 4.5 dB
        assert!((mapper.level_db(1e4, 2000.0) - 84.5).abs() < 1e-3);
    }

    #[test]
    fn test_levels_clamped_to_range() {
        let mapper = mapper(8192);
        assert_eq!(mapper.height(1e12, 1000.0, 768.0), 768.0);
        assert_eq!(mapper.height(0.0, 1000.0, 768.0), 0.0);
        assert_eq!(mapper.height(f32::NAN, 1000.0, 768.0), 0.0);
    }

    #[test]
    fn test_magnitude_scale_shifts_level() {
        let scaled = FrequencyMapper::new(&DisplayConfig::default(), 10.0, 44100, 8192);
        let plain = mapper(8192);
        let diff = plain.level_db(1e4, 1000.0) - scaled.level_db(1e4, 1000.0);
        assert!((diff - 20.0).abs() < 1e-3);
    }
}

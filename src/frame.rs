//! Per-frame orchestration: snapshot → spectrum → screen mapping → smoothing → geometry.

use glam::Vec2;

use crate::audio::{CaptureSource, SpectralAnalyzer};
use crate::error::{ConfigError, RenderError};
use crate::geometry::{Geometry, GeometryBuilder, Rect};
use crate::params::{AnalysisConfig, DisplayConfig, RenderMode};
use crate::spectrum::{FrequencyMapper, TemporalSmoother, Viewport};

/// Drawing surface the pipeline hands its geometry to
pub trait RenderSink {
    /// Start a new frame filled with `color`
    fn clear(&mut self, color: [f32; 4]);

    fn fill_rect(&mut self, rect: Rect, color: [f32; 4]);

    /// Connected line segments through `points`
    fn line_strip(&mut self, points: &[Vec2], color: [f32; 4]);

    /// Flush everything drawn since `clear` to the screen
    fn present(&mut self) -> Result<(), RenderError>;
}

/// Draw one frame of geometry (or a blank frame) and present it
pub fn draw_geometry(
    sink: &mut dyn RenderSink,
    geometry: Option<&Geometry>,
    background: [f32; 4],
    foreground: [f32; 4],
) -> Result<(), RenderError> {
    sink.clear(background);
    match geometry {
        Some(Geometry::Bars(bars)) => {
            for bar in bars {
                sink.fill_rect(*bar, foreground);
            }
        }
        Some(Geometry::Line(points)) => sink.line_strip(points, foreground),
        None => {}
    }
    sink.present()
}

/// Analysis state that persists across frames
pub struct SpectrumPipeline {
    analyzer: SpectralAnalyzer,
    mapper: FrequencyMapper,
    smoother: TemporalSmoother,
    builder: GeometryBuilder,
    display: DisplayConfig,
    magnitude_scale: f32,
    viewport: Viewport,
    sample_rate: u32,
    xs: Vec<f32>,
    targets: Vec<f32>,
}

impl SpectrumPipeline {
    pub fn new(
        analysis: &AnalysisConfig,
        display: &DisplayConfig,
        mode: RenderMode,
        viewport: Viewport,
    ) -> Result<Self, ConfigError> {
        analysis.validate()?;
        display.validate(analysis.nyquist_hz())?;

        let analyzer = SpectralAnalyzer::new(analysis.window_size)?;
        let bins = analyzer.bin_count();

        Ok(Self {
            analyzer,
            mapper: FrequencyMapper::new(
                display,
                analysis.magnitude_scale,
                analysis.sample_rate_hz,
                analysis.window_size,
            ),
            smoother: TemporalSmoother::new(bins, display.smoothing_factor)?,
            builder: GeometryBuilder::new(mode, display),
            display: display.clone(),
            magnitude_scale: analysis.magnitude_scale,
            viewport,
            sample_rate: analysis.sample_rate_hz,
            xs: Vec::with_capacity(bins),
            targets: Vec::with_capacity(bins),
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn smoothed(&self) -> &[f32] {
        self.smoother.values()
    }

    /// Track a new window size; smoothed heights keep their proportion
    pub fn resize(&mut self, viewport: Viewport) {
        self.smoother.rescale(self.viewport.height, viewport.height);
        self.viewport = viewport;
    }

    /// Rebuild the frequency table for a newly negotiated capture rate.
    /// Smoothing history is kept.
    pub fn set_sample_rate(&mut self, sample_rate: u32) -> Result<(), ConfigError> {
        if sample_rate == self.sample_rate {
            return Ok(());
        }
        if sample_rate == 0 {
            return Err(ConfigError::ZeroSampleRate);
        }
        self.display.validate(sample_rate as f32 / 2.0)?;
        self.mapper = FrequencyMapper::new(
            &self.display,
            self.magnitude_scale,
            sample_rate,
            self.analyzer.size(),
        );
        self.sample_rate = sample_rate;
        Ok(())
    }

    /// Run one frame over a sample snapshot. Empty snapshots produce nothing.
    pub fn process(&mut self, samples: &[i16]) -> Option<Geometry> {
        if samples.is_empty() {
            return None;
        }

        let magnitudes = self.analyzer.process(samples);
        self.mapper
            .map_into(magnitudes, self.viewport, &mut self.xs, &mut self.targets);
        let heights = self.smoother.update(&self.targets, self.viewport.height);

        Some(self.builder.build(&self.xs, heights, self.viewport))
    }

    /// Pull a snapshot from `source` and process it
    pub fn tick(&mut self, source: &dyn CaptureSource) -> Option<Geometry> {
        let samples = source.samples();
        let geometry = self.process(&samples);
        if geometry.is_none() {
            log::debug!("Empty sample snapshot, skipping frame");
        }
        geometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline(mode: RenderMode) -> SpectrumPipeline {
        let analysis = AnalysisConfig {
            window_size: 1024,
            ..Default::default()
        };
        SpectrumPipeline::new(
            &analysis,
            &DisplayConfig::default(),
            mode,
            Viewport::new(1024, 768),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_snapshot_skipped() {
        let mut pipeline = pipeline(RenderMode::Line);
        assert!(pipeline.process(&[]).is_none());
        assert!(pipeline.smoothed().iter().all(|&h| h == 0.0));
    }

    #[test]
    fn test_silence_renders_floor() {
        let mut pipeline = pipeline(RenderMode::Bars);
        match pipeline.process(&vec![0; 1024]) {
            Some(Geometry::Bars(bars)) => {
                assert_eq!(bars.len(), 512);
                assert!(bars.iter().all(|b| b.height == 0.0 && b.y == 768.0));
            }
            other => panic!("expected bars, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_window_rejected() {
        let analysis = AnalysisConfig {
            window_size: 1023,
            ..Default::default()
        };
        let result = SpectrumPipeline::new(
            &analysis,
            &DisplayConfig::default(),
            RenderMode::Line,
            Viewport::new(100, 100),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_sample_rate_change_keeps_history() {
        let mut pipeline = pipeline(RenderMode::Line);
        let loud: Vec<i16> = (0..1024).map(|i| if i % 2 == 0 { 20000 } else { -20000 }).collect();
        pipeline.process(&loud);
        let before = pipeline.smoothed().to_vec();

        pipeline.set_sample_rate(48000).unwrap();
        assert_eq!(pipeline.sample_rate(), 48000);
        assert_eq!(pipeline.smoothed(), before.as_slice());
        assert!(pipeline.set_sample_rate(0).is_err());
    }
}

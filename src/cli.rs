//! Command-line argument parsing.

use clap::Parser;

use specviz::params::{AnalysisConfig, DisplayConfig, RenderConfig, RenderMode};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "specviz")]
#[command(about = "Real-time audio spectrum analyzer", long_about = None)]
pub struct Args {
    /// Render mode
    #[arg(value_enum, value_name = "MODE")]
    pub mode: Option<RenderMode>,

    /// Transform window size in samples (even)
    #[arg(long, value_name = "SAMPLES", default_value_t = 8192)]
    pub window_size: usize,

    /// Requested capture sample rate
    #[arg(long, value_name = "HZ", default_value_t = 44100)]
    pub sample_rate: u32,

    /// Smoothing factor in (0, 1]; lower is smoother
    #[arg(long, value_name = "ALPHA", default_value_t = 0.5)]
    pub smoothing: f32,

    /// Tilt compensation slope
    #[arg(long, value_name = "DB_PER_OCTAVE", default_value_t = 4.5)]
    pub tilt: f32,

    /// Frame rate
    #[arg(long, value_name = "FPS", default_value_t = 30)]
    pub fps: u32,

    /// Capture device to open instead of the system default
    #[arg(long, value_name = "NAME")]
    pub device: Option<String>,
}

impl Args {
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            sample_rate_hz: self.sample_rate,
            window_size: self.window_size,
            ..Default::default()
        }
    }

    pub fn display_config(&self) -> DisplayConfig {
        DisplayConfig {
            smoothing_factor: self.smoothing,
            tilt_db_per_octave: self.tilt,
            ..Default::default()
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            fps: self.fps,
            mode: self.mode.unwrap_or_default(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_argument() {
        let args = Args::try_parse_from(["specviz", "bars"]).unwrap();
        assert_eq!(args.render_config().mode, RenderMode::Bars);

        let args = Args::try_parse_from(["specviz"]).unwrap();
        assert_eq!(args.render_config().mode, RenderMode::Line);
        assert_eq!(args.analysis_config().window_size, 8192);
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(Args::try_parse_from(["specviz", "dots"]).is_err());
    }
}

//! Window, pacing and color configuration.

use std::time::Duration;

use super::display::RenderMode;
use crate::error::ConfigError;

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Initial window width (pixels)
    pub window_width: u32,

    /// Initial window height (pixels)
    pub window_height: u32,

    /// Analysis and redraw rate (frames per second)
    pub fps: u32,

    /// Geometry style, fixed for the lifetime of the process
    pub mode: RenderMode,

    /// Clear color (linear RGBA)
    pub background: [f32; 4],

    /// Bar and curve color (linear RGBA)
    pub foreground: [f32; 4],

    /// Minimum time between two device switches (milliseconds)
    pub device_switch_debounce_ms: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1024,
            window_height: 768,
            fps: 30,
            mode: RenderMode::default(),
            background: [0.0, 0.0, 0.0, 1.0],
            foreground: [1.0, 1.0, 1.0, 1.0],
            device_switch_debounce_ms: 200,
        }
    }
}

impl RenderConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }

    pub fn device_switch_debounce(&self) -> Duration {
        Duration::from_millis(self.device_switch_debounce_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        Ok(())
    }
}

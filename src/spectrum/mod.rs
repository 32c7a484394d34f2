//! Spectrum scaling and temporal smoothing.

mod mapping;
mod smoothing;

pub use mapping::FrequencyMapper;
pub use smoothing::TemporalSmoother;

/// Drawable area in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
        }
    }
}

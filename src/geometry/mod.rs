//! Renderable geometry built from smoothed bin heights.

mod bars;
mod spline;

pub use spline::{catmull_rom, interpolate};

use glam::Vec2;

use crate::params::{DisplayConfig, RenderMode};
use crate::spectrum::Viewport;

/// Axis-aligned rectangle in screen pixels (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One frame's drawable output
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Bars(Vec<Rect>),
    Line(Vec<Vec2>),
}

/// Turns bin positions and heights into bars or a spline, per a fixed mode
#[derive(Debug, Clone)]
pub struct GeometryBuilder {
    mode: RenderMode,
    min_bar_width: f32,
    spline_steps: usize,
}

impl GeometryBuilder {
    pub fn new(mode: RenderMode, display: &DisplayConfig) -> Self {
        Self {
            mode,
            min_bar_width: display.min_bar_width_px,
            spline_steps: display.spline_steps,
        }
    }

    pub fn build(&self, xs: &[f32], heights: &[f32], viewport: Viewport) -> Geometry {
        match self.mode {
            RenderMode::Bars => Geometry::Bars(bars::layout(
                xs,
                heights,
                self.min_bar_width,
                viewport.height,
            )),
            RenderMode::Line => {
                let points: Vec<Vec2> = xs
                    .iter()
                    .zip(heights)
                    .map(|(&x, &h)| Vec2::new(x, viewport.height - h))
                    .collect();
                Geometry::Line(interpolate(&points, self.spline_steps))
            }
        }
    }
}

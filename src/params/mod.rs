//! Parameter definitions with physical units and documented semantics.
//!
//! All tunables are collected here with:
//! - Physical units (Hz, dB, pixels, milliseconds)
//! - Documented ranges and meanings
//! - A `validate()` that rejects values the pipeline cannot honor

mod analysis;
mod display;
mod render;

// Re-export all types
pub use analysis::AnalysisConfig;
pub use display::{DisplayConfig, RenderMode};
pub use render::RenderConfig;

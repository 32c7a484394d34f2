//! Specviz library - real-time log-frequency spectrum display

pub mod audio;
pub mod devices;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod pacing;
pub mod params;
pub mod rendering;
pub mod spectrum;

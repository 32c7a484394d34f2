//! Audio capture and spectral analysis.

pub mod capture;
pub mod fft;
pub mod input;
pub mod window;

pub use capture::{switch_device, switch_or_restore, CaptureSource};
pub use fft::SpectralAnalyzer;
pub use input::CpalInput;
pub use window::SampleWindow;

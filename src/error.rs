//! Error types for configuration, analysis, capture and rendering.

use thiserror::Error;

/// Invalid configuration value, detected at startup.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("sample rate must be > 0")]
    ZeroSampleRate,

    #[error("magnitude scale must be finite and > 0, got {0}")]
    InvalidMagnitudeScale(f32),

    #[error("smoothing factor must be in (0, 1], got {0}")]
    InvalidSmoothing(f32),

    #[error("dB range must satisfy min < max, got {min}..{max}")]
    InvalidDbRange { min: f32, max: f32 },

    #[error("frequency must be finite and > 0 Hz, got {0}")]
    InvalidFrequency(f32),

    #[error("minimum frequency {min} Hz must be below Nyquist {nyquist} Hz")]
    MinFrequencyAboveNyquist { min: f32, nyquist: f32 },

    #[error("spline steps must be > 0")]
    ZeroSplineSteps,

    #[error("frame rate must be > 0")]
    ZeroFrameRate,

    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),
}

/// Spectral analyzer construction failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalyzerError {
    #[error("window size must be even and non-zero, got {0}")]
    InvalidWindowSize(usize),
}

/// Audio capture failure.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no audio input device available")]
    NoDevice,

    #[error("input device '{0}' not found")]
    DeviceNotFound(String),

    #[error("failed to enumerate input devices: {0}")]
    Enumerate(#[from] cpal::DevicesError),

    #[error("failed to query input configuration: {0}")]
    Config(#[from] cpal::DefaultStreamConfigError),

    #[error("unsupported input sample format: {0:?}")]
    UnsupportedFormat(cpal::SampleFormat),

    #[error("failed to build input stream: {0}")]
    Build(#[from] cpal::BuildStreamError),

    #[error("failed to start input stream: {0}")]
    Play(#[from] cpal::PlayStreamError),
}

/// GPU rendering failure.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter found")]
    NoAdapter,

    #[error("failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,

    #[error("surface error: {0}")]
    Frame(#[from] wgpu::SurfaceError),
}

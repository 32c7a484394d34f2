//! Capture source contract consumed by the frame pipeline.

use crate::error::CaptureError;

/// A live mono input that keeps a rolling window of its newest samples.
///
/// The capture side runs on its own thread or callback; `samples` must be
/// safe to call from the render loop at any time and must not block on it.
pub trait CaptureSource {
    /// Whether any input device can be opened at all
    fn is_available(&self) -> bool;

    /// Open the selected device and begin streaming at (or near) `sample_rate`
    fn start(&mut self, sample_rate: u32) -> Result<(), CaptureError>;

    /// Stop streaming; the current device selection is kept
    fn stop(&mut self);

    /// Names of all input devices, in host order
    fn list_devices(&self) -> Vec<String>;

    /// Name of the selected device
    fn current_device(&self) -> Option<String>;

    /// Select a device for the next `start`
    fn set_device(&mut self, name: &str) -> Result<(), CaptureError>;

    /// Sample rate actually negotiated by the last successful `start`
    fn sample_rate(&self) -> u32;

    /// Snapshot of up to N most recent samples, oldest first.
    /// May be shorter than N (or empty) right after starting.
    fn samples(&self) -> Vec<i16>;
}

/// Stop, reselect and restart a capture source.
pub fn switch_device(
    source: &mut dyn CaptureSource,
    name: &str,
    sample_rate: u32,
) -> Result<(), CaptureError> {
    source.stop();
    source.set_device(name)?;
    source.start(sample_rate)
}

/// Switch to `name`, falling back to the previously selected device if the
/// new one cannot be started. The original switch error is returned either way.
pub fn switch_or_restore(
    source: &mut dyn CaptureSource,
    name: &str,
    sample_rate: u32,
) -> Result<(), CaptureError> {
    let previous = source.current_device();

    let Err(e) = switch_device(source, name, sample_rate) else {
        return Ok(());
    };

    match previous {
        Some(previous) => {
            if let Err(restore) = switch_device(source, &previous, sample_rate) {
                log::error!("Failed to restore input device '{}': {}", previous, restore);
            }
        }
        None => log::error!("No previous input device to restore"),
    }
    Err(e)
}

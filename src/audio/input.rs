//! System audio input via cpal.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, Stream, StreamConfig};
use crossbeam::queue::ArrayQueue;
use std::sync::{Arc, Mutex, MutexGuard};

use super::capture::CaptureSource;
use super::window::SampleWindow;
use crate::error::CaptureError;

/// Preferred formats, in order, when the requested rate is supported
const FORMAT_PREFERENCE: [SampleFormat; 3] =
    [SampleFormat::I16, SampleFormat::F32, SampleFormat::U16];

/// Input capture keeping the newest `window_size` mono samples.
///
/// The stream callback only touches the lock-free queue. The window mutex is
/// taken by the reader side alone, while draining and copying out.
pub struct CpalInput {
    host: cpal::Host,
    device: Option<cpal::Device>,
    stream: Option<Stream>,
    queue: Arc<ArrayQueue<i16>>,
    window: Mutex<SampleWindow>,
    sample_rate: u32,
}

impl CpalInput {
    /// Create an input bound to the host's default device (not started yet)
    pub fn new(window_size: usize) -> Self {
        let host = cpal::default_host();
        let device = host.default_input_device();

        Self {
            host,
            device,
            stream: None,
            queue: Arc::new(ArrayQueue::new(window_size.max(1))),
            window: Mutex::new(SampleWindow::new(window_size)),
            sample_rate: 0,
        }
    }

    fn find_device(&self, name: &str) -> Result<cpal::Device, CaptureError> {
        self.host
            .input_devices()?
            .find(|d| d.name().map(|n| n == name).unwrap_or(false))
            .ok_or_else(|| CaptureError::DeviceNotFound(name.to_string()))
    }

    fn clear_buffers(&self) {
        clear_into(&self.queue, &mut lock_window(&self.window));
    }
}

impl CaptureSource for CpalInput {
    fn is_available(&self) -> bool {
        self.host.default_input_device().is_some()
            || self
                .host
                .input_devices()
                .map(|mut devices| devices.next().is_some())
                .unwrap_or(false)
    }

    fn start(&mut self, sample_rate: u32) -> Result<(), CaptureError> {
        if self.device.is_none() {
            self.device = self.host.default_input_device();
        }
        let device = self.device.as_ref().ok_or(CaptureError::NoDevice)?;
        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());

        let (config, sample_format) = select_stream_config(device, sample_rate)?;

        self.clear_buffers();

        let err_fn = |err: cpal::StreamError| log::warn!("Audio input stream error: {}", err);
        let stream = build_input_stream(
            device,
            &config,
            sample_format,
            Arc::clone(&self.queue),
            err_fn,
        )?;
        stream.play()?;

        log::info!(
            "Audio input: {} @ {}Hz, {} ch, {:?}",
            device_name,
            config.sample_rate.0,
            config.channels,
            sample_format
        );

        self.sample_rate = config.sample_rate.0;
        self.stream = Some(stream);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(stream) = self.stream.take() {
            if let Err(e) = stream.pause() {
                log::debug!("Failed to pause input stream: {}", e);
            }
        }
    }

    fn list_devices(&self) -> Vec<String> {
        self.host
            .input_devices()
            .map(|devices| devices.filter_map(|d| d.name().ok()).collect())
            .unwrap_or_default()
    }

    fn current_device(&self) -> Option<String> {
        self.device.as_ref().and_then(|d| d.name().ok())
    }

    fn set_device(&mut self, name: &str) -> Result<(), CaptureError> {
        self.device = Some(self.find_device(name)?);
        Ok(())
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn samples(&self) -> Vec<i16> {
        let mut window = lock_window(&self.window);
        drain_into(&self.queue, &mut window);
        window.snapshot()
    }
}

impl Drop for CpalInput {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Pick a stream config at the requested rate, else the device default
fn select_stream_config(
    device: &cpal::Device,
    sample_rate: u32,
) -> Result<(StreamConfig, SampleFormat), CaptureError> {
    let supported = device
        .supported_input_configs()
        .map(|configs| configs.collect::<Vec<_>>())
        .unwrap_or_default();

    for format in FORMAT_PREFERENCE {
        if let Some(range) = supported.iter().find(|range| {
            range.sample_format() == format
                && range.min_sample_rate().0 <= sample_rate
                && range.max_sample_rate().0 >= sample_rate
        }) {
            let config = range.clone().with_sample_rate(SampleRate(sample_rate));
            return Ok((config.config(), format));
        }
    }

    let default_config = device.default_input_config()?;
    log::warn!(
        "{}Hz not supported by input device, using {}Hz",
        sample_rate,
        default_config.sample_rate().0
    );
    let sample_format = default_config.sample_format();
    Ok((default_config.config(), sample_format))
}

fn build_input_stream<E>(
    device: &cpal::Device,
    config: &StreamConfig,
    sample_format: SampleFormat,
    queue: Arc<ArrayQueue<i16>>,
    err_fn: E,
) -> Result<Stream, CaptureError>
where
    E: FnMut(cpal::StreamError) + Send + 'static,
{
    let channels = config.channels.max(1) as usize;

    let stream = match sample_format {
        SampleFormat::I16 => device.build_input_stream(
            config,
            move |data: &[i16], _: &cpal::InputCallbackInfo| {
                push_samples(&queue, data.iter().step_by(channels).copied());
            },
            err_fn,
            None,
        )?,
        SampleFormat::F32 => device.build_input_stream(
            config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                push_samples(
                    &queue,
                    data.iter().step_by(channels).map(|&s| f32_to_i16(s)),
                );
            },
            err_fn,
            None,
        )?,
        SampleFormat::U16 => device.build_input_stream(
            config,
            move |data: &[u16], _: &cpal::InputCallbackInfo| {
                push_samples(
                    &queue,
                    data.iter().step_by(channels).map(|&s| u16_to_i16(s)),
                );
            },
            err_fn,
            None,
        )?,
        other => return Err(CaptureError::UnsupportedFormat(other)),
    };

    Ok(stream)
}

/// Append samples, evicting the oldest when the queue is full
fn push_samples<I>(queue: &ArrayQueue<i16>, samples: I)
where
    I: IntoIterator<Item = i16>,
{
    for sample in samples {
        queue.force_push(sample);
    }
}

/// Move everything the callback has queued into the rolling window
fn drain_into(queue: &ArrayQueue<i16>, window: &mut SampleWindow) {
    while let Some(sample) = queue.pop() {
        window.push(sample);
    }
}

/// Discard queued and windowed samples from a previous stream
fn clear_into(queue: &ArrayQueue<i16>, window: &mut SampleWindow) {
    while queue.pop().is_some() {}
    window.clear();
}

/// Lock the window, recovering it if a reader panicked while holding it.
/// The window holds no invariant a half-finished push can break.
fn lock_window(window: &Mutex<SampleWindow>) -> MutexGuard<'_, SampleWindow> {
    window.lock().unwrap_or_else(|poisoned| {
        log::warn!("Sample window lock poisoned, recovering");
        poisoned.into_inner()
    })
}

fn f32_to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}

fn u16_to_i16(sample: u16) -> i16 {
    (sample as i32 - 32768) as i16
}

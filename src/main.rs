//! Specviz - real-time audio spectrum analyzer
//!
//! Captures the selected input device, and at a fixed frame rate draws its
//! spectrum as bars or a smooth curve on a log-frequency axis.
//! Tab cycles through input devices, Escape quits.

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use cli::Args;
use specviz::audio::{switch_or_restore, CaptureSource, CpalInput};
use specviz::devices::DeviceCycler;
use specviz::frame::{draw_geometry, SpectrumPipeline};
use specviz::geometry::Geometry;
use specviz::pacing::FramePacer;
use specviz::params::{AnalysisConfig, RenderConfig};
use specviz::rendering::RenderSystem;
use specviz::spectrum::Viewport;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Capture and analysis
    capture: CpalInput,
    pipeline: SpectrumPipeline,
    devices: DeviceCycler,

    // Configuration
    render_config: RenderConfig,
    requested_sample_rate: u32,

    // Frame timing and the last thing drawn
    pacer: FramePacer,
    last_geometry: Option<Geometry>,
}

impl App {
    fn new(
        capture: CpalInput,
        pipeline: SpectrumPipeline,
        render_config: RenderConfig,
        requested_sample_rate: u32,
    ) -> Self {
        let devices = DeviceCycler::new(
            capture.list_devices(),
            capture.current_device().as_deref(),
            render_config.device_switch_debounce(),
        );
        let pacer = FramePacer::new(render_config.frame_interval(), Instant::now());

        Self {
            window: None,
            render_system: None,
            capture,
            pipeline,
            devices,
            render_config,
            requested_sample_rate,
            pacer,
            last_geometry: None,
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            if self.pacer.try_begin_frame(Instant::now()) {
                window.request_redraw();
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.pacer.deadline()));
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        // Create window
        let window_attributes = Window::default_attributes()
            .with_title("Spectrum Analyzer")
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        // Initialize rendering system
        let render_system = match pollster::block_on(RenderSystem::new(Arc::clone(&window))) {
            Ok(render_system) => render_system,
            Err(e) => {
                log::error!("Failed to initialize renderer: {}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.pipeline.resize(Viewport::new(size.width, size.height));

        log::info!("Press Tab to switch input device, Escape to quit");

        self.window = Some(window);
        self.render_system = Some(render_system);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(size.width, size.height);
                }
                if size.width > 0 && size.height > 0 {
                    self.pipeline.resize(Viewport::new(size.width, size.height));
                    // Cached geometry was laid out for the old size
                    self.last_geometry = None;
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        ..
                    },
                ..
            } => match code {
                KeyCode::Escape => event_loop.exit(),
                KeyCode::Tab => self.cycle_device(),
                _ => {}
            },
            WindowEvent::RedrawRequested => self.render_frame(),
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.capture.stop();
    }
}

impl App {
    /// Analyze the newest samples and draw a frame.
    /// A skipped frame re-presents the previous geometry.
    fn render_frame(&mut self) {
        let Some(render_system) = self.render_system.as_mut() else {
            return;
        };

        if let Some(geometry) = self.pipeline.tick(&self.capture) {
            self.last_geometry = Some(geometry);
        }

        if let Err(e) = draw_geometry(
            render_system,
            self.last_geometry.as_ref(),
            self.render_config.background,
            self.render_config.foreground,
        ) {
            log::error!("Render error: {}", e);
        }
    }

    /// Stop, reselect and restart capture on the next device in the list
    fn cycle_device(&mut self) {
        let Some(name) = self.devices.advance(Instant::now()).map(str::to_owned) else {
            return;
        };

        match switch_or_restore(&mut self.capture, &name, self.requested_sample_rate) {
            Ok(()) => log::info!("Switched to input device: {}", name),
            Err(e) => log::warn!("Failed to switch to input device '{}': {}", name, e),
        }

        // Follow whichever device ended up running
        if let Err(e) = self.pipeline.set_sample_rate(self.capture.sample_rate()) {
            log::warn!("Keeping previous frequency table: {}", e);
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let analysis = args.analysis_config();
    let display = args.display_config();
    let render_config = args.render_config();

    analysis.validate().context("Invalid analysis configuration")?;
    render_config
        .validate()
        .context("Invalid render configuration")?;

    // Check if audio input exists
    let mut capture = CpalInput::new(analysis.window_size);
    if !capture.is_available() {
        bail!("Audio capture not available");
    }
    if let Some(name) = &args.device {
        capture
            .set_device(name)
            .context("Failed to select input device")?;
    }

    // Set up and run audio input
    capture
        .start(analysis.sample_rate_hz)
        .context("Error starting audio input")?;

    // Analyze at whatever rate the device actually negotiated
    let effective = AnalysisConfig {
        sample_rate_hz: capture.sample_rate(),
        ..analysis.clone()
    };
    let pipeline = SpectrumPipeline::new(
        &effective,
        &display,
        render_config.mode,
        Viewport::new(render_config.window_width, render_config.window_height),
    )
    .context("Invalid display configuration")?;

    log::info!(
        "Window size {} @ {}Hz, mode {:?}",
        effective.window_size,
        effective.sample_rate_hz,
        render_config.mode
    );

    let mut app = App::new(capture, pipeline, render_config, analysis.sample_rate_hz);
    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.run_app(&mut app).context("Event loop failed")?;

    Ok(())
}

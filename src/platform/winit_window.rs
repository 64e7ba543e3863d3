//=========================================================================
// Winit Window System
//=========================================================================
//
// OS window backed by winit, pumped on the engine thread.
//
// Each `process()` call pumps pending OS events with a zero timeout,
// flushes the frame's input into the channel, and collects it. The
// event loop is created by `create_window()`; winit allows only one per
// process.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use crossbeam_channel::{bounded, Sender, TrySendError};
use log::{debug, error, info, trace, warn};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

//=== Internal Dependencies ===============================================

use super::event_collector::{EventCollector, TickControl};
use super::input_buffer::InputBuffer;
use super::input_processor::InputProcessor;
use super::PlatformEvent;
use crate::core::backend::WindowSystem;
use crate::core::input::StateTracker;
use crate::engine::EngineConfig;
use crate::error::EngineError;

//=== WinitApp ============================================================

/// Producer side: receives winit callbacks and buffers input.
struct WinitApp {
    attributes: WindowAttributes,
    window: Option<Window>,
    buffer: InputBuffer,
    processor: InputProcessor,
    sender: Sender<PlatformEvent>,
}

impl WinitApp {
    fn new(config: &EngineConfig, sender: Sender<PlatformEvent>) -> Self {
        let mut attributes = Window::default_attributes()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(config.window_width, config.window_height));
        if config.fullscreen {
            attributes = attributes.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        Self {
            attributes,
            window: None,
            buffer: InputBuffer::new(),
            processor: InputProcessor::new(),
            sender,
        }
    }

    /// Sends the buffered input as one batch.
    fn flush(&mut self) {
        let pending = self.buffer.len();
        if let Some(event) = self.buffer.flush() {
            trace!(target: "platform::input", "Flushing {} input events", pending);
            self.send(event);
        }
    }

    fn send(&self, event: PlatformEvent) {
        match self.sender.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                warn!(target: "platform::input", "Input queue full, dropping events");
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!(target: "platform::input", "Input channel disconnected");
            }
        }
    }
}

impl ApplicationHandler for WinitApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Poll);
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists, resume ignored");
            return;
        }

        match event_loop.create_window(self.attributes.clone()) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    size.width,
                    size.height,
                    window.scale_factor()
                );
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.send(PlatformEvent::CloseRequested);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let WindowEvent::CloseRequested = event {
            info!(target: "platform", "Window close requested");
            self.flush();
            self.send(PlatformEvent::CloseRequested);
            event_loop.exit();
            return;
        }

        if let Some(input) = self.processor.translate(&event) {
            self.buffer.push(input);
        }
    }
}

//=== WinitWindowSystem ===================================================

pub struct WinitWindowSystem {
    event_loop: Option<EventLoop<()>>,
    app: Option<WinitApp>,
    collector: Option<EventCollector>,
    exit: bool,
}

impl WinitWindowSystem {
    pub fn new() -> Self {
        Self {
            event_loop: None,
            app: None,
            collector: None,
            exit: false,
        }
    }
}

impl Default for WinitWindowSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowSystem for WinitWindowSystem {
    fn create_window(&mut self, config: &EngineConfig) -> Result<(), EngineError> {
        if self.event_loop.is_some() {
            debug!(target: "platform", "Event loop already created");
            return Ok(());
        }

        let event_loop = EventLoop::new().map_err(|e| {
            error!(target: "platform", "Event loop creation failed: {}", e);
            EngineError::Window(e.to_string())
        })?;
        let (sender, receiver) = bounded(config.input_capacity.max(1));

        self.app = Some(WinitApp::new(config, sender));
        self.collector = Some(EventCollector::new(receiver));
        self.event_loop = Some(event_loop);
        info!(target: "platform", "Winit window system ready");
        Ok(())
    }

    fn process(&mut self) {
        let (Some(event_loop), Some(app)) = (self.event_loop.as_mut(), self.app.as_mut()) else {
            return;
        };

        if let PumpStatus::Exit(code) = event_loop.pump_app_events(Some(Duration::ZERO), &mut *app) {
            info!(target: "platform", "Event loop exited with code {}", code);
            self.exit = true;
        }
        app.flush();

        if let Some(collector) = self.collector.as_mut() {
            if collector.collect() == TickControl::Exit {
                self.exit = true;
            }
        }
    }

    fn dispatch(&mut self, input: &mut StateTracker) {
        match self.collector.as_mut() {
            Some(collector) => collector.dispatch(input),
            None => input.dispatch(&[]),
        }
    }

    fn exit_request(&self) -> bool {
        self.exit
    }

    fn request_exit(&mut self) {
        self.exit = true;
    }
}

impl std::fmt::Debug for WinitWindowSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WinitWindowSystem")
            .field("created", &self.event_loop.is_some())
            .field("exit", &self.exit)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

//=========================================================================
// Engine Builder
//=========================================================================
//
// Fluent construction of an [`Engine`]. Backends, the clock and the
// config are injected here; the engine owns them from then on.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use super::listener::Listeners;
use super::tick_state::{Clock, SystemClock, TickState};
use super::{Engine, EngineConfig, EngineListener};
use crate::core::backend::{RenderBackend, WindowSystem};
use crate::platform::{HeadlessWindowSystem, InputSender};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60 (logic ticks per second)
/// - **Channel capacity**: 128 input events
/// - **Clock**: [`SystemClock`]
///
/// # Examples
///
/// ```no_run
/// use gamekit_engine::prelude::*;
/// # fn backend() -> Box<dyn RenderBackend> { unimplemented!() }
///
/// let mut engine = EngineBuilder::new()
///     .with_tps(120)
///     .with_channel_capacity(256)
///     .with_window_system(WinitWindowSystem::new())
///     .with_boxed_render_backend(backend())
///     .build();
///
/// engine.initialize().expect("engine setup");
/// ```
pub struct EngineBuilder {
    config: EngineConfig,
    window: Option<Box<dyn WindowSystem>>,
    render: Option<Box<dyn RenderBackend>>,
    clock: Box<dyn Clock>,
    listeners: Listeners,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            window: None,
            render: None,
            clock: Box::new(SystemClock::new()),
            listeners: Listeners::default(),
        }
    }

    /// Replaces the whole config. Call before the `with_tps` style
    /// setters, which edit the config in place.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the fixed logic tick rate.
    ///
    /// # Panics
    ///
    /// Panics if `tps == 0`.
    pub fn with_tps(mut self, tps: u32) -> Self {
        assert!(tps > 0, "TPS must be positive, got {}", tps);
        self.config.tick_rate = tps;
        self
    }

    /// Sets the capacity of the input event queue between the window
    /// system and logic.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.config.input_capacity = capacity;
        self
    }

    pub fn with_window_system(self, window: impl WindowSystem + 'static) -> Self {
        self.with_boxed_window_system(Box::new(window))
    }

    pub fn with_boxed_window_system(mut self, window: Box<dyn WindowSystem>) -> Self {
        self.window = Some(window);
        self
    }

    /// Installs a [`HeadlessWindowSystem`] sized by the channel capacity
    /// and returns the handle that feeds it.
    pub fn with_headless_window(self) -> (Self, InputSender) {
        let (window, sender) = HeadlessWindowSystem::new(self.config.input_capacity);
        (self.with_window_system(window), sender)
    }

    pub fn with_render_backend(self, render: impl RenderBackend + 'static) -> Self {
        self.with_boxed_render_backend(Box::new(render))
    }

    pub fn with_boxed_render_backend(mut self, render: Box<dyn RenderBackend>) -> Self {
        self.render = Some(render);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Registers a listener that stays for the engine's lifetime. Use
    /// [`Engine::add_listener`] for one that may be removed later.
    pub fn with_listener(mut self, listener: impl EngineListener + 'static) -> Self {
        self.listeners.add(Box::new(listener));
        self
    }

    /// Builds the engine in the uninitialized state.
    pub fn build(self) -> Engine {
        info!(
            "Building engine (TPS: {}, channel: {})",
            self.config.tick_rate, self.config.input_capacity
        );

        let tick_state = TickState::new(self.config.tick_rate, self.config.frame_skip());
        Engine::from_parts(
            self.config,
            self.window,
            self.render,
            self.clock,
            self.listeners,
            tick_state,
        )
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

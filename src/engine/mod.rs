//=========================================================================
// GameKit Engine
//
// Fixed-rate tick driver composing scenes, listeners and the render
// backend into one frame loop.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Frame Loop]
//         │                          │
//         ├─ with_tps()              ├─ initialize()
//         ├─ with_window_system()    ├─ initialize_step_loop()
//         └─ with_render_backend()   ├─ step_one_frame() ...
//                                    └─ finalize_step_loop()
// ```
//
// State machine:
//   Uninitialized → Initialized → Running → Stopped → Finalized
//
// Per tick, in order:
//   1. dispatch input           window system → StateTracker
//   2. update active scenes     logic bricks → logic trees → physics
//   3. listeners
//   4. apply constraints
//   5. object post-process      queued loads/unloads, instance sync
//   6. scene post-process       queued restart/replace requests
//   7. swap message buffers
//
//=========================================================================

//=== Module Declarations =================================================

mod builder;
mod config;
mod listener;
pub mod logging;
mod tick_state;

//=== External Dependencies ===============================================

use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::backend::{RenderBackend, WindowSystem};
use crate::core::input::StateTracker;
use crate::core::message::MessageManager;
use crate::core::scene::{Scene, SceneManager};
use crate::error::EngineError;
use listener::Listeners;

//=== Public API ==========================================================

pub use builder::EngineBuilder;
pub use config::{EngineConfig, RenderSystem};
pub use listener::{EngineListener, ListenerId};
pub use tick_state::{Clock, ManualClock, SystemClock, TickState};

//=== EngineState =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Initialized,
    Running,
    Stopped,
    Finalized,
}

//=== Engine ==============================================================

/// GameKit engine runtime.
///
/// Owns the window system, the render backend, every scene, the
/// listeners, the message bus and the input state. Create it with
/// [`EngineBuilder`].
pub struct Engine {
    config: EngineConfig,
    state: EngineState,
    window: Option<Box<dyn WindowSystem>>,
    render: Option<Box<dyn RenderBackend>>,
    scenes: SceneManager,
    listeners: Listeners,
    messages: MessageManager,
    input: StateTracker,
    tick_state: TickState,
    clock: Box<dyn Clock>,
}

impl Engine {
    //--- Construction -----------------------------------------------------

    pub(crate) fn from_parts(
        config: EngineConfig,
        window: Option<Box<dyn WindowSystem>>,
        render: Option<Box<dyn RenderBackend>>,
        clock: Box<dyn Clock>,
        listeners: Listeners,
        tick_state: TickState,
    ) -> Self {
        Self {
            config,
            state: EngineState::Uninitialized,
            window,
            render,
            scenes: SceneManager::new(),
            listeners,
            messages: MessageManager::new(),
            input: StateTracker::new(),
            tick_state,
            clock,
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        matches!(
            self.state,
            EngineState::Initialized | EngineState::Running | EngineState::Stopped
        )
    }

    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    pub fn scenes(&self) -> &SceneManager {
        &self.scenes
    }

    pub fn scenes_mut(&mut self) -> &mut SceneManager {
        &mut self.scenes
    }

    /// The current scene.
    pub fn active_scene(&self) -> Option<&Scene> {
        self.scenes.current()
    }

    pub fn messages(&self) -> &MessageManager {
        &self.messages
    }

    pub fn messages_mut(&mut self) -> &mut MessageManager {
        &mut self.messages
    }

    pub fn input(&self) -> &StateTracker {
        &self.input
    }

    pub fn tick_state(&self) -> &TickState {
        &self.tick_state
    }

    pub fn has_window_system(&self) -> bool {
        self.window.is_some()
    }

    //--- Registration -----------------------------------------------------

    /// Registers a scene; it becomes active once loaded.
    pub fn add_scene(&mut self, scene: Scene) -> bool {
        self.scenes.add(scene)
    }

    /// Loads a registered scene with the engine's render backend.
    pub fn load_scene(&mut self, name: &str) -> bool {
        match self.render.as_deref_mut() {
            Some(render) => self.scenes.load(name, render),
            None => {
                warn!("Cannot load scene '{}' without a render backend", name);
                false
            }
        }
    }

    pub fn unload_scene(&mut self, name: &str) -> bool {
        match self.render.as_deref_mut() {
            Some(render) => self.scenes.unload(name, render),
            None => false,
        }
    }

    /// Registers a listener after those already registered.
    pub fn add_listener(&mut self, listener: impl EngineListener + 'static) -> ListenerId {
        self.listeners.add(Box::new(listener))
    }

    /// Unregisters a listener. `false` if the id is unknown or was
    /// already removed.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let removed = self.listeners.remove(id);
        if removed {
            debug!("Removed listener {id:?}");
        }
        removed
    }

    //--- Lifecycle --------------------------------------------------------

    /// Brings up logging, the render backend and the main window.
    /// Does nothing if already initialized.
    pub fn initialize(&mut self) -> Result<(), EngineError> {
        match self.state {
            EngineState::Uninitialized => {}
            EngineState::Finalized => {
                error!("Engine was finalized and cannot be initialized again");
                return Err(EngineError::Finalized);
            }
            _ => return Ok(()),
        }

        if self.config.enable_logging {
            logging::init(&self.config);
        }
        self.config.validate().map_err(|e| {
            error!("Invalid engine config: {}", e);
            EngineError::from(e)
        })?;

        if self.config.render_system == RenderSystem::Unknown {
            error!("Unknown render system");
            return Err(EngineError::UnknownRenderSystem);
        }
        let Some(render) = self.render.as_deref_mut() else {
            error!("No render backend present");
            return Err(EngineError::NoRenderBackend);
        };
        render.initialize(&self.config)?;

        if let Some(window) = self.window.as_deref_mut() {
            window.create_window(&self.config)?;
        }

        self.state = EngineState::Initialized;
        info!(
            "Engine initialized ({:?}, {} TPS)",
            self.config.render_system, self.config.tick_rate
        );
        Ok(())
    }

    /// Tears down every scene and the render backend. Idempotent.
    pub fn finalize(&mut self) {
        if self.state == EngineState::Finalized {
            return;
        }
        let was_initialized = self.is_initialized();
        if self.state == EngineState::Running {
            self.finalize_step_loop();
        }

        if let Some(render) = self.render.as_deref_mut() {
            self.scenes.destroy_all(render);
            if was_initialized {
                render.finalize();
            }
        }
        self.messages.clear();

        self.state = EngineState::Finalized;
        info!("Engine finalized");
    }

    //--- Step Loop --------------------------------------------------------

    /// Checks the run preconditions and starts the tick schedule.
    pub fn initialize_step_loop(&mut self) -> Result<(), EngineError> {
        match self.state {
            EngineState::Initialized | EngineState::Stopped => {}
            EngineState::Running => return Ok(()),
            EngineState::Finalized => return Err(EngineError::Finalized),
            EngineState::Uninitialized => {
                error!("Engine is not initialized");
                return Err(EngineError::NotInitialized);
            }
        }

        if !self.scenes.has_active() {
            error!("Can't run without a registered scene");
            return Err(EngineError::NoRegisteredScene);
        }
        if self.window.is_none() {
            error!("Can't run without a window system");
            return Err(EngineError::NoWindowSystem);
        }

        self.tick_state.reset(self.clock.now());
        self.state = EngineState::Running;
        info!("Step loop started");
        Ok(())
    }

    /// Runs one frame: process the window, run the due ticks, render.
    /// Returns `false` when the loop should end.
    pub fn step_one_frame(&mut self) -> bool {
        debug_assert!(self.is_running(), "step_one_frame on an engine that is not running");
        if !self.is_running() {
            return false;
        }

        let now = self.clock.now();
        if let Some(window) = self.window.as_deref_mut() {
            window.process();
        }

        let due = self.tick_state.advance(now);
        for _ in 0..due {
            self.tick();
        }

        let rendered = self.render_frame();
        let exit = self.window.as_ref().is_some_and(|w| w.exit_request());
        if exit {
            debug!("Window system requested exit");
        }
        rendered && !exit
    }

    pub fn finalize_step_loop(&mut self) {
        if self.state == EngineState::Running {
            self.state = EngineState::Stopped;
            info!("Step loop stopped after {} ticks", self.tick_state.ticks());
        }
    }

    /// `initialize_step_loop`, frames until one returns `false`, then
    /// `finalize_step_loop`.
    pub fn run(&mut self) -> Result<(), EngineError> {
        self.initialize_step_loop()?;
        while self.step_one_frame() {}
        self.finalize_step_loop();
        Ok(())
    }

    /// Asks the loop to stop at the end of the current frame.
    pub fn request_exit(&mut self) {
        if let Some(window) = self.window.as_deref_mut() {
            window.request_exit();
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn tick(&mut self) {
        let dt = self.tick_state.step();

        if let Some(window) = self.window.as_deref_mut() {
            window.dispatch(&mut self.input);
        }

        self.scenes.update(dt, &self.input, &mut self.messages);

        self.listeners.tick(&mut self.scenes, dt);

        self.scenes.apply_constraints();

        if let Some(render) = self.render.as_deref_mut() {
            self.scenes.post_process_objects(render);
            self.scenes.post_process_queue(render);
        }

        self.messages.swap();
    }

    fn render_frame(&mut self) -> bool {
        if !self.scenes.has_active() {
            debug!("No active scene left, ending loop");
            return false;
        }
        self.render
            .as_deref_mut()
            .is_some_and(|render| render.render_one_frame())
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.finalize();
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state)
            .field("scenes", &self.scenes.len())
            .field("listeners", &self.listeners.len())
            .field("tick_state", &self.tick_state)
            .finish()
    }
}

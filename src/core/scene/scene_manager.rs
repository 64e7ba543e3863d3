//=========================================================================
// Scene Manager
//=========================================================================
//
// Engine-owned registry of scenes.
//
// Scenes are registered once by name and become active when they load.
// Active scenes tick in activation order; at most one is "current", the
// scene single-scene queries resolve to.
//
// Scene changes requested during a tick (restart, replace) are queued
// and applied by `post_process_queue()` at the tick boundary, in FIFO
// order.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::{FrameContext, Scene};
use crate::core::backend::RenderBackend;
use crate::core::input::StateTracker;
use crate::core::message::MessageManager;

//=== SceneRequest ========================================================

/// A deferred scene change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneRequest {
    Load(String),
    Unload(String),
    /// Unload, restore the initial state, load again.
    Restart(String),
    /// Unload `from` and load `to` in its place.
    Replace { from: String, to: String },
}

//=== SceneManager ========================================================

#[derive(Debug, Default)]
pub struct SceneManager {
    scenes: Vec<Scene>,
    active: Vec<usize>,
    current: Option<usize>,
    requests: Vec<SceneRequest>,
}

impl SceneManager {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self::default()
    }

    //--- Registration -----------------------------------------------------

    /// Registers a scene. Returns `false` if the name is already taken.
    pub fn add(&mut self, scene: Scene) -> bool {
        if self.index_of(scene.name()).is_some() {
            warn!("Scene '{}' is already registered", scene.name());
            return false;
        }
        debug!("Registered scene '{}'", scene.name());
        self.scenes.push(scene);
        true
    }

    //--- Queries ----------------------------------------------------------

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Scene> {
        self.index_of(name).map(|i| &self.scenes[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Scene> {
        self.index_of(name).map(|i| &mut self.scenes[i])
    }

    pub fn has_active(&self) -> bool {
        !self.active.is_empty()
    }

    /// Names of the loaded scenes in activation order.
    pub fn active_names(&self) -> impl Iterator<Item = &str> {
        self.active.iter().map(|&i| self.scenes[i].name())
    }

    pub fn current(&self) -> Option<&Scene> {
        self.current.map(|i| &self.scenes[i])
    }

    pub fn current_mut(&mut self) -> Option<&mut Scene> {
        self.current.map(|i| &mut self.scenes[i])
    }

    /// Makes an active scene current.
    pub fn set_current(&mut self, name: &str) -> bool {
        match self.index_of(name).filter(|i| self.active.contains(i)) {
            Some(index) => {
                self.current = Some(index);
                true
            }
            None => {
                warn!("Scene '{}' is not active, cannot make it current", name);
                false
            }
        }
    }

    //--- Load / Unload ----------------------------------------------------

    /// Loads a registered scene and activates it. Returns `false` if the
    /// scene is unknown or did not load.
    pub fn load(&mut self, name: &str, render: &mut dyn RenderBackend) -> bool {
        let Some(index) = self.index_of(name) else {
            warn!("Cannot load unknown scene '{}'", name);
            return false;
        };

        self.scenes[index].load(render);
        if !self.scenes[index].is_loaded() {
            return false;
        }
        self.activate(index);
        true
    }

    /// Unloads an active scene and deactivates it.
    pub fn unload(&mut self, name: &str, render: &mut dyn RenderBackend) -> bool {
        let Some(index) = self.index_of(name) else {
            warn!("Cannot unload unknown scene '{}'", name);
            return false;
        };
        self.scenes[index].unload(render);
        self.deactivate(index);
        true
    }

    pub fn restart(&mut self, name: &str, render: &mut dyn RenderBackend) -> bool {
        let Some(index) = self.index_of(name) else {
            warn!("Cannot restart unknown scene '{}'", name);
            return false;
        };

        self.scenes[index].restart(render);
        if self.scenes[index].is_loaded() {
            self.activate(index);
        } else {
            self.deactivate(index);
        }
        true
    }

    /// Unloads `from` and loads `to`, which takes over as current if
    /// `from` was.
    pub fn replace(&mut self, from: &str, to: &str, render: &mut dyn RenderBackend) -> bool {
        let Some(target) = self.index_of(to) else {
            warn!("Cannot replace '{}' with unknown scene '{}'", from, to);
            return false;
        };
        let was_current = self.index_of(from).is_some_and(|i| self.current == Some(i));

        self.unload(from, render);
        if !self.load(to, render) {
            return false;
        }
        if was_current {
            self.current = Some(target);
        }
        info!("Replaced scene '{}' with '{}'", from, to);
        true
    }

    /// Unloads every scene. Registrations are kept.
    pub fn unload_all(&mut self, render: &mut dyn RenderBackend) {
        for scene in &mut self.scenes {
            scene.unload(render);
        }
        self.active.clear();
        self.current = None;
    }

    /// Unloads and drops every scene.
    pub fn destroy_all(&mut self, render: &mut dyn RenderBackend) {
        self.unload_all(render);
        self.scenes.clear();
        self.requests.clear();
    }

    //--- Requests ---------------------------------------------------------

    /// Queues a scene change for the end of the tick.
    pub fn request(&mut self, request: SceneRequest) {
        self.requests.push(request);
    }

    pub fn pending_requests(&self) -> usize {
        self.requests.len()
    }

    //--- Tick -------------------------------------------------------------

    /// Updates every active scene. Requests raised by logic are queued.
    pub fn update(&mut self, tick: f32, input: &StateTracker, messages: &mut MessageManager) {
        let mut ctx = FrameContext {
            input,
            messages,
            scene_requests: &mut self.requests,
        };
        for &index in &self.active {
            self.scenes[index].update(tick, &mut ctx);
        }
    }

    pub fn apply_constraints(&mut self) {
        for &index in &self.active {
            self.scenes[index].apply_constraints();
        }
    }

    /// Applies each active scene's object queue and syncs its instances.
    pub fn post_process_objects(&mut self, render: &mut dyn RenderBackend) {
        for &index in &self.active {
            let scene = &mut self.scenes[index];
            scene.post_process_queue(render);
            scene.sync(render);
        }
    }

    /// Applies queued scene changes in request order.
    pub fn post_process_queue(&mut self, render: &mut dyn RenderBackend) {
        if self.requests.is_empty() {
            return;
        }
        for request in std::mem::take(&mut self.requests) {
            debug!("Scene request {:?}", request);
            match request {
                SceneRequest::Load(name) => {
                    self.load(&name, render);
                }
                SceneRequest::Unload(name) => {
                    self.unload(&name, render);
                }
                SceneRequest::Restart(name) => {
                    self.restart(&name, render);
                }
                SceneRequest::Replace { from, to } => {
                    self.replace(&from, &to, render);
                }
            }
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn index_of(&self, name: &str) -> Option<usize> {
        self.scenes.iter().position(|s| s.name() == name)
    }

    fn activate(&mut self, index: usize) {
        if !self.active.contains(&index) {
            self.active.push(index);
        }
        if self.current.is_none() {
            self.current = Some(index);
        }
    }

    fn deactivate(&mut self, index: usize) {
        self.active.retain(|&i| i != index);
        if self.current == Some(index) {
            self.current = self.active.first().copied();
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

//=========================================================================
// Shared Test Backends
//=========================================================================
//
// Render and physics backends that record every call into a shared
// journal, so tests can assert on call order across subsystems.
//
//=========================================================================

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gamekit_engine::core::backend::{
    BodyHandle, Contact, InstanceHandle, PhysicsWorld, RenderBackend, SceneManagerHandle,
    ViewportHandle,
};
use gamekit_engine::core::math::{Aabb, Colour};
use gamekit_engine::core::object::{GameObject, ObjectId, ObjectProperties, PhysicsProperties};
use gamekit_engine::prelude::*;

//=== Journal =============================================================

#[derive(Debug, Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.0.borrow().iter().filter(|e| e.starts_with(prefix)).count()
    }

    pub fn position(&self, entry: &str) -> Option<usize> {
        self.0.borrow().iter().position(|e| e == entry)
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

//=== MockRender ==========================================================

pub struct MockRender {
    journal: Journal,
    next_handle: u64,
    /// Frames left before `render_one_frame` returns `false`.
    frames_left: Option<u32>,
}

impl MockRender {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            next_handle: 0,
            frames_left: None,
        }
    }

    pub fn with_frame_limit(mut self, frames: u32) -> Self {
        self.frames_left = Some(frames);
        self
    }

    fn handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl RenderBackend for MockRender {
    fn initialize(&mut self, config: &EngineConfig) -> Result<(), EngineError> {
        self.journal.push(format!("render.init:{:?}", config.render_system));
        Ok(())
    }

    fn finalize(&mut self) {
        self.journal.push("render.finalize");
    }

    fn create_scene_manager(&mut self, scene: &str) -> SceneManagerHandle {
        self.journal.push(format!("render.manager:{}", scene));
        SceneManagerHandle(self.handle())
    }

    fn destroy_scene_manager(&mut self, _manager: SceneManagerHandle) {
        self.journal.push("render.destroy_manager");
    }

    fn set_sky_box(&mut self, _manager: SceneManagerHandle, material: &str, _distance: f32) {
        self.journal.push(format!("render.sky:{}", material));
    }

    fn set_ambient_light(&mut self, _manager: SceneManagerHandle, _colour: Colour) {}

    fn create_instance(&mut self, _manager: SceneManagerHandle, object: &GameObject) -> InstanceHandle {
        self.journal.push(format!("render.instance:{}", object.name()));
        InstanceHandle(self.handle())
    }

    fn destroy_instance(&mut self, _manager: SceneManagerHandle, _instance: InstanceHandle) {
        self.journal.push("render.destroy_instance");
    }

    fn sync_instance(&mut self, _instance: InstanceHandle, object: &GameObject) {
        self.journal
            .push(format!("render.sync:{}:{:.2}", object.name(), object.position().x));
    }

    fn create_viewport(&mut self, _camera: InstanceHandle) -> Option<ViewportHandle> {
        self.journal.push("render.viewport");
        Some(ViewportHandle(self.handle()))
    }

    fn set_viewport_camera(&mut self, _viewport: ViewportHandle, _camera: InstanceHandle) {
        self.journal.push("render.viewport_camera");
    }

    fn destroy_viewport(&mut self, _viewport: ViewportHandle) {}

    fn set_background_colour(&mut self, _viewport: ViewportHandle, _colour: Colour) {}

    fn render_one_frame(&mut self) -> bool {
        self.journal.push("render.frame");
        match &mut self.frames_left {
            Some(0) => false,
            Some(left) => {
                *left -= 1;
                *left > 0
            }
            None => true,
        }
    }
}

//=== ContactScript =======================================================

/// Contacts the mock world reports, keyed by body owner. Shared with the
/// test so it can change them while the engine runs.
#[derive(Debug, Clone, Default)]
pub struct ContactScript(Rc<RefCell<HashMap<ObjectId, Vec<Contact>>>>);

impl ContactScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn touch(&self, owner: ObjectId, collider: ObjectId, material: &str) {
        self.0
            .borrow_mut()
            .entry(owner)
            .or_default()
            .push(Contact { collider, material: material.to_string() });
    }

    pub fn separate(&self, owner: ObjectId) {
        self.0.borrow_mut().remove(&owner);
    }

    fn contacts_of(&self, owner: ObjectId) -> Vec<Contact> {
        self.0.borrow().get(&owner).cloned().unwrap_or_default()
    }
}

//=== MockPhysics =========================================================

pub struct MockPhysics {
    journal: Journal,
    next_body: u64,
    owners: HashMap<u64, ObjectId>,
    script: ContactScript,
}

impl MockPhysics {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            next_body: 0,
            owners: HashMap::new(),
            script: ContactScript::new(),
        }
    }

    pub fn with_contacts(mut self, script: ContactScript) -> Self {
        self.script = script;
        self
    }
}

impl PhysicsWorld for MockPhysics {
    fn load(&mut self) {
        self.journal.push("physics.load");
    }

    fn unload(&mut self) {
        self.journal.push("physics.unload");
    }

    fn step(&mut self, _dt: f32) {
        self.journal.push("physics.step");
    }

    fn create_body(
        &mut self,
        owner: ObjectId,
        _properties: &ObjectProperties,
        _physics: &PhysicsProperties,
    ) -> BodyHandle {
        self.journal.push(format!("physics.body:{}", owner.0));
        self.next_body += 1;
        self.owners.insert(self.next_body, owner);
        BodyHandle(self.next_body)
    }

    fn destroy_body(&mut self, body: BodyHandle) {
        self.journal.push("physics.destroy_body");
        self.owners.remove(&body.0);
    }

    fn aabb(&self, _body: BodyHandle) -> Aabb {
        Aabb::from_center(Vec3::ZERO, Vec3::splat(0.5))
    }

    fn contacts(&self, body: BodyHandle) -> Vec<Contact> {
        self.owners
            .get(&body.0)
            .map(|owner| self.script.contacts_of(*owner))
            .unwrap_or_default()
    }
}

//=== Helpers =============================================================

pub fn quiet_config() -> EngineConfig {
    EngineConfig {
        enable_logging: false,
        tick_rate: 10,
        max_frame_skip: Some(8),
        ..EngineConfig::default()
    }
}

/// Engine on a headless window and a manual clock, ticking at 10 Hz.
/// The clock starts at zero, so the first frame runs exactly one tick.
pub fn headless_engine(journal: &Journal) -> (Engine, InputSender, ManualClock) {
    let clock = ManualClock::new();
    let (builder, input) = EngineBuilder::new()
        .with_config(quiet_config())
        .with_clock(clock.clone())
        .with_headless_window();
    let engine = builder
        .with_render_backend(MockRender::new(journal.clone()))
        .build();
    (engine, input, clock)
}

/// A scene holding one camera and the given objects.
pub fn scene_with(name: &str, objects: Vec<GameObject>) -> Scene {
    let mut scene = Scene::new(name);
    scene.create_camera("Camera");
    for object in objects {
        scene.add_object(object);
    }
    scene
}

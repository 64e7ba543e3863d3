//=========================================================================
// Physics Backend
//=========================================================================
//
// `PhysicsWorld` is the solver-facing interface; `DynamicsWorld` is the
// scene-owned wrapper that tracks load state and live bodies so scene
// load/unload stays symmetric whatever the backend does.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::math::{Aabb, Quat, Vec3};
use crate::core::object::{ObjectId, ObjectProperties, PhysicsProperties};

//=== Handles =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub u64);

/// One contact of a body during the last step.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub collider: ObjectId,

    /// Sensor material of the collider, empty if it has none.
    pub material: String,
}

//=== PhysicsWorld ========================================================

/// Rigid body simulation service.
pub trait PhysicsWorld {
    fn load(&mut self);
    fn unload(&mut self);
    fn step(&mut self, dt: f32);

    fn create_body(
        &mut self,
        owner: ObjectId,
        properties: &ObjectProperties,
        physics: &PhysicsProperties,
    ) -> BodyHandle;
    fn destroy_body(&mut self, body: BodyHandle);

    fn aabb(&self, body: BodyHandle) -> Aabb;

    /// Contacts of `body` produced by the last step.
    fn contacts(&self, body: BodyHandle) -> Vec<Contact>;

    /// Simulated transform, for bodies the solver moves.
    fn transform(&self, _body: BodyHandle) -> Option<(Vec3, Quat)> {
        None
    }

    /// Teleports a body to the object's current transform.
    fn set_transform(&mut self, _body: BodyHandle, _position: Vec3, _orientation: Quat) {}
}

//=== DynamicsWorld =======================================================

/// A scene's physics world.
pub struct DynamicsWorld {
    backend: Box<dyn PhysicsWorld>,
    loaded: bool,
    bodies: Vec<BodyHandle>,
}

impl DynamicsWorld {
    pub fn new(backend: Box<dyn PhysicsWorld>) -> Self {
        Self {
            backend,
            loaded: false,
            bodies: Vec::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn load(&mut self) {
        if !self.loaded {
            self.backend.load();
            self.loaded = true;
            debug!("Physics world loaded");
        }
    }

    /// Destroys any remaining bodies, then unloads the backend world.
    pub fn unload(&mut self) {
        if !self.loaded {
            return;
        }
        for body in self.bodies.drain(..) {
            self.backend.destroy_body(body);
        }
        self.backend.unload();
        self.loaded = false;
        debug!("Physics world unloaded");
    }

    pub fn step(&mut self, dt: f32) {
        if self.loaded {
            self.backend.step(dt);
        }
    }

    pub fn create_body(
        &mut self,
        owner: ObjectId,
        properties: &ObjectProperties,
        physics: &PhysicsProperties,
    ) -> BodyHandle {
        let body = self.backend.create_body(owner, properties, physics);
        self.bodies.push(body);
        body
    }

    pub fn destroy_body(&mut self, body: BodyHandle) {
        if let Some(pos) = self.bodies.iter().position(|b| *b == body) {
            self.bodies.swap_remove(pos);
            self.backend.destroy_body(body);
        }
    }

    pub fn aabb(&self, body: BodyHandle) -> Aabb {
        self.backend.aabb(body)
    }

    pub fn contacts(&self, body: BodyHandle) -> Vec<Contact> {
        self.backend.contacts(body)
    }

    pub fn transform(&self, body: BodyHandle) -> Option<(Vec3, Quat)> {
        self.backend.transform(body)
    }

    pub fn set_transform(&mut self, body: BodyHandle, position: Vec3, orientation: Quat) {
        self.backend.set_transform(body, position, orientation);
    }
}

impl std::fmt::Debug for DynamicsWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicsWorld")
            .field("loaded", &self.loaded)
            .field("bodies", &self.bodies.len())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

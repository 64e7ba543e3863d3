//=========================================================================
// Game Objects
//=========================================================================
//
// Scene-owned objects: transform, per-kind data, named variables, an
// optional logic brick template and the runtime handles created on
// load (render instance, physics body, per-tick contacts).
//
// Objects are addressed by `ObjectId`, a stable index into the owning
// scene's `GameObjects` store. Ids are never reused within a scene.
//
//=========================================================================

//=== Module Declarations =================================================

mod queue;
mod store;

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::backend::physics::{BodyHandle, Contact, DynamicsWorld};
use crate::core::backend::render::{InstanceHandle, RenderBackend, SceneManagerHandle};
use crate::core::bricks::LogicLink;
use crate::core::math::{Aabb, Quat, Vec3};
use crate::core::value::Value;

//=== Public API ==========================================================

pub use queue::{ObjectQueue, ObjectRequest};
pub use store::GameObjects;

//=== ObjectId ============================================================

/// Index of a game object within its scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub usize);

//=== ObjectKind ==========================================================

/// What a game object represents to the render backend.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    /// Plain transform node.
    Object,
    Camera,
    Light,
    /// Mesh instance.
    Entity { mesh: String },
    Skeleton,
}

//=== Properties ==========================================================

/// Rigid body parameters. Objects without these never get a body.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsProperties {
    pub mass: f32,
    pub half_extents: Vec3,

    /// Material tag reported to collision sensors of other objects.
    pub sensor_material: String,
}

impl Default for PhysicsProperties {
    fn default() -> Self {
        Self {
            mass: 1.0,
            half_extents: Vec3::splat(0.5),
            sensor_material: String::new(),
        }
    }
}

/// Load-time description of a game object.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectProperties {
    pub position: Vec3,
    pub orientation: Quat,
    pub scale: Vec3,
    pub is_static: bool,

    /// Layer bit mask, tested against the scene's active layers.
    pub layer: u32,
    pub physics: Option<PhysicsProperties>,
}

impl Default for ObjectProperties {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            scale: Vec3::ONE,
            is_static: false,
            layer: 1,
            physics: None,
        }
    }
}

//=== GameObject ==========================================================

/// A named object in a scene.
#[derive(Debug, Clone)]
pub struct GameObject {
    name: String,
    kind: ObjectKind,
    properties: ObjectProperties,
    variables: HashMap<String, Value>,
    logic: Option<LogicLink>,
    visible: bool,

    //--- Runtime ---------------------------------------------------------
    loaded: bool,
    instance: Option<InstanceHandle>,
    body: Option<BodyHandle>,
    contacts: Vec<Contact>,
}

impl GameObject {
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            properties: ObjectProperties::default(),
            variables: HashMap::new(),
            logic: None,
            visible: true,
            loaded: false,
            instance: None,
            body: None,
            contacts: Vec::new(),
        }
    }

    //--- Identity ---------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    pub fn is_camera(&self) -> bool {
        matches!(self.kind, ObjectKind::Camera)
    }

    //--- Properties -------------------------------------------------------

    pub fn properties(&self) -> &ObjectProperties {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut ObjectProperties {
        &mut self.properties
    }

    pub fn position(&self) -> Vec3 {
        self.properties.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.properties.position = position;
    }

    pub fn orientation(&self) -> Quat {
        self.properties.orientation
    }

    pub fn set_orientation(&mut self, orientation: Quat) {
        self.properties.orientation = orientation.normalize();
    }

    /// Moves the object. Local deltas are rotated by the orientation.
    pub fn translate(&mut self, delta: Vec3, local: bool) {
        let delta = if local {
            self.properties.orientation * delta
        } else {
            delta
        };
        self.properties.position += delta;
    }

    /// Rotates by Euler angles in radians (XYZ order).
    pub fn rotate(&mut self, euler: Vec3, local: bool) {
        let q = Quat::from_euler(crate::core::math::EulerRot::XYZ, euler.x, euler.y, euler.z);
        let current = self.properties.orientation;
        let rotated = if local { current * q } else { q * current };
        self.properties.orientation = rotated.normalize();
    }

    /// `true` if the object's layer intersects `mask`.
    pub fn in_layer(&self, mask: u32) -> bool {
        self.properties.layer & mask != 0
    }

    /// World-space bounds from the physics shape, or null without one.
    pub fn aabb(&self) -> Aabb {
        match &self.properties.physics {
            Some(physics) => Aabb::from_center(
                self.properties.position,
                physics.half_extents * self.properties.scale,
            ),
            None => Aabb::NULL,
        }
    }

    //--- Variables --------------------------------------------------------

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.variables.insert(name.into(), value.into());
    }

    pub fn variables(&self) -> &HashMap<String, Value> {
        &self.variables
    }

    //--- Logic ------------------------------------------------------------

    /// Brick template instantiated into the scene's logic manager on load.
    pub fn logic(&self) -> Option<&LogicLink> {
        self.logic.as_ref()
    }

    pub fn set_logic(&mut self, link: LogicLink) {
        self.logic = Some(link);
    }

    //--- Visibility -------------------------------------------------------

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    //--- Runtime ----------------------------------------------------------

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn instance(&self) -> Option<InstanceHandle> {
        self.instance
    }

    pub fn body(&self) -> Option<BodyHandle> {
        self.body
    }

    /// Contacts reported by the last physics step.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub(crate) fn set_contacts(&mut self, contacts: Vec<Contact>) {
        self.contacts = contacts;
    }

    /// Creates the render instance and, if the object has physics
    /// properties and the scene has a world, its rigid body.
    pub(crate) fn load(
        &mut self,
        id: ObjectId,
        render: &mut dyn RenderBackend,
        scene: SceneManagerHandle,
        world: Option<&mut DynamicsWorld>,
    ) {
        if self.loaded {
            return;
        }

        self.instance = Some(render.create_instance(scene, self));

        if let (Some(physics), Some(world)) = (&self.properties.physics, world) {
            self.body = Some(world.create_body(id, &self.properties, physics));
        }

        self.loaded = true;
        debug!("Loaded object '{}'", self.name);
    }

    /// Releases everything `load` created.
    pub(crate) fn unload(
        &mut self,
        render: &mut dyn RenderBackend,
        scene: SceneManagerHandle,
        world: Option<&mut DynamicsWorld>,
    ) {
        if !self.loaded {
            return;
        }

        if let Some(instance) = self.instance.take() {
            render.destroy_instance(scene, instance);
        }

        if let Some(body) = self.body.take() {
            if let Some(world) = world {
                world.destroy_body(body);
            }
        }

        self.contacts.clear();
        self.loaded = false;
        debug!("Unloaded object '{}'", self.name);
    }

    #[cfg(test)]
    pub(crate) fn set_loaded(&mut self, loaded: bool) {
        self.loaded = loaded;
    }

    #[cfg(test)]
    pub(crate) fn set_body(&mut self, body: Option<BodyHandle>) {
        self.body = body;
    }

    /// Copy under a new name: properties, variables and logic template,
    /// without any runtime state.
    pub(crate) fn duplicate(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: self.kind.clone(),
            properties: self.properties.clone(),
            variables: self.variables.clone(),
            logic: self.logic.clone(),
            visible: self.visible,
            loaded: false,
            instance: None,
            body: None,
            contacts: Vec::new(),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn defaults() {
        let obj = GameObject::new("Cube", ObjectKind::Object);
        assert_eq!(obj.name(), "Cube");
        assert!(obj.is_visible());
        assert!(!obj.is_loaded());
        assert!(obj.body().is_none());
        assert!(obj.in_layer(1));
        assert!(!obj.in_layer(2));
    }

    #[test]
    fn local_translation_follows_orientation() {
        let mut obj = GameObject::new("Cube", ObjectKind::Object);
        obj.set_orientation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2));

        obj.translate(Vec3::X, true);

        assert_relative_eq!(obj.position().x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(obj.position().y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn aabb_requires_physics_shape() {
        let mut obj = GameObject::new("Cube", ObjectKind::Object);
        assert!(obj.aabb().is_null());

        obj.properties_mut().physics = Some(PhysicsProperties::default());
        obj.set_position(Vec3::new(2.0, 0.0, 0.0));

        let aabb = obj.aabb();
        assert_eq!(aabb.min, Vec3::new(1.5, -0.5, -0.5));
        assert_eq!(aabb.max, Vec3::new(2.5, 0.5, 0.5));
    }

    #[test]
    fn duplicate_drops_runtime_state() {
        let mut obj = GameObject::new("Cube", ObjectKind::Object);
        obj.set_variable("health", 10);
        obj.contacts.push(Contact { collider: ObjectId(3), material: String::new() });
        obj.loaded = true;

        let copy = obj.duplicate("Cube.001");

        assert_eq!(copy.name(), "Cube.001");
        assert_eq!(copy.variable("health"), Some(&Value::Int(10)));
        assert!(!copy.is_loaded());
        assert!(copy.contacts().is_empty());
    }
}

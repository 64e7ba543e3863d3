//=========================================================================
// Scene System
//=========================================================================
//
// A scene owns its game objects, an optional physics world, the logic
// bricks and logic trees of its objects, and the render resources it
// created on load.
//
// Architecture:
//   Scene
//     ├─ objects: GameObjects        unique names, registration order
//     ├─ world: Option<DynamicsWorld>
//     ├─ logic: LogicManager         instantiated brick links
//     ├─ nodes: NodeManager          logic trees
//     ├─ constraints
//     └─ object_queue                deferred load / unload requests
//
// Flow per tick:
//   update() → logic bricks → logic trees → physics step → contacts
//   apply_constraints() → post_process_queue() → sync()
//
//=========================================================================

//=== Module Declarations =================================================

mod constraint;
mod scene_manager;

//=== External Dependencies ===============================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::backend::{
    DynamicsWorld, PhysicsWorld, RenderBackend, SceneManagerHandle, ViewportHandle,
};
use crate::core::bricks::{LogicFrame, LogicManager};
use crate::core::input::StateTracker;
use crate::core::logic::{LogicTree, NodeManager};
use crate::core::math::{Aabb, Colour, Quat, Vec3};
use crate::core::message::MessageManager;
use crate::core::object::{GameObject, GameObjects, ObjectId, ObjectKind, ObjectQueue, ObjectRequest};

//=== Public API ==========================================================

pub use constraint::Constraint;
pub use scene_manager::{SceneManager, SceneRequest};

//=== Constants ===========================================================

/// Name of the camera synthesised when a scene has none.
pub const FALLBACK_CAMERA: &str = " -- No Camera -- ";

const FALLBACK_CAMERA_POSITION: Vec3 = Vec3::new(0.0, -5.0, 0.0);

//=== SceneProperties =====================================================

#[derive(Debug, Clone, PartialEq)]
pub struct SceneProperties {
    pub ambient: Colour,
    /// Viewport background.
    pub world_colour: Colour,
    pub sky_material: Option<String>,
    pub sky_distance: f32,
    /// Layer bit mask; only objects in these layers load.
    pub layers: u32,
}

impl Default for SceneProperties {
    fn default() -> Self {
        Self {
            ambient: Colour::rgb(0.1, 0.1, 0.1),
            world_colour: Colour::BLACK,
            sky_material: None,
            sky_distance: 5000.0,
            layers: 1,
        }
    }
}

//=== FrameContext ========================================================

/// Engine-owned state a scene reads and writes during its update.
pub struct FrameContext<'a> {
    pub input: &'a StateTracker,
    pub messages: &'a mut MessageManager,
    pub scene_requests: &'a mut Vec<SceneRequest>,
}

//=== Snapshot ============================================================

/// Object and tree state captured on first load, restored on restart.
#[derive(Debug, Clone)]
struct Snapshot {
    objects: GameObjects,
    nodes: NodeManager,
}

//=== Scene ===============================================================

#[derive(Debug)]
pub struct Scene {
    name: String,
    properties: SceneProperties,
    objects: GameObjects,
    world: Option<DynamicsWorld>,
    constraints: Vec<Constraint>,
    object_queue: ObjectQueue,
    logic: LogicManager,
    nodes: NodeManager,
    snapshot: Option<Snapshot>,

    //--- Runtime ---------------------------------------------------------
    loaded: bool,
    manager: Option<SceneManagerHandle>,
    start_camera: Option<ObjectId>,
    camera_changed: bool,
    viewport: Option<ViewportHandle>,
    limits: Aabb,
}

impl Scene {
    //--- Construction -----------------------------------------------------

    pub fn new(name: impl Into<String>) -> Self {
        Self::with_properties(name, SceneProperties::default())
    }

    pub fn with_properties(name: impl Into<String>, properties: SceneProperties) -> Self {
        Self {
            name: name.into(),
            properties,
            objects: GameObjects::new(),
            world: None,
            constraints: Vec::new(),
            object_queue: ObjectQueue::new(),
            logic: LogicManager::new(),
            nodes: NodeManager::new(),
            snapshot: None,
            loaded: false,
            manager: None,
            start_camera: None,
            camera_changed: false,
            viewport: None,
            limits: Aabb::NULL,
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &SceneProperties {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut SceneProperties {
        &mut self.properties
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn objects(&self) -> &GameObjects {
        &self.objects
    }

    pub fn object(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.get(id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.get_mut(id)
    }

    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.objects.find(name)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn start_camera(&self) -> Option<ObjectId> {
        self.start_camera
    }

    pub fn viewport(&self) -> Option<ViewportHandle> {
        self.viewport
    }

    /// Render scene manager, present while loaded.
    pub fn scene_manager(&self) -> Option<SceneManagerHandle> {
        self.manager
    }

    /// Bounds of the static bodies found on load.
    pub fn limits(&self) -> Aabb {
        self.limits
    }

    pub fn has_world(&self) -> bool {
        self.world.is_some()
    }

    pub fn world(&self) -> Option<&DynamicsWorld> {
        self.world.as_ref()
    }

    pub fn logic(&self) -> &LogicManager {
        &self.logic
    }

    pub fn nodes(&self) -> &NodeManager {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut NodeManager {
        &mut self.nodes
    }

    //--- Object Creation --------------------------------------------------

    /// Adds a prepared object. Duplicate names are rejected.
    pub fn add_object(&mut self, object: GameObject) -> Option<ObjectId> {
        let name = object.name().to_string();
        let id = self.objects.insert(object);
        match id {
            Some(id) => debug!("Scene '{}': created object '{}' ({})", self.name, name, id.0),
            None => warn!("Scene '{}': object '{}' already exists", self.name, name),
        }
        id
    }

    pub fn create_object(&mut self, name: impl Into<String>) -> Option<ObjectId> {
        self.add_object(GameObject::new(name, ObjectKind::Object))
    }

    pub fn create_light(&mut self, name: impl Into<String>) -> Option<ObjectId> {
        self.add_object(GameObject::new(name, ObjectKind::Light))
    }

    pub fn create_camera(&mut self, name: impl Into<String>) -> Option<ObjectId> {
        self.add_object(GameObject::new(name, ObjectKind::Camera))
    }

    pub fn create_entity(&mut self, name: impl Into<String>, mesh: impl Into<String>) -> Option<ObjectId> {
        self.add_object(GameObject::new(name, ObjectKind::Entity { mesh: mesh.into() }))
    }

    pub fn create_skeleton(&mut self, name: impl Into<String>) -> Option<ObjectId> {
        self.add_object(GameObject::new(name, ObjectKind::Skeleton))
    }

    /// Copies `source` under `name`, along with its logic trees. A clone
    /// made while the scene is loaded is queued for loading.
    pub fn clone_object(&mut self, source: ObjectId, name: impl Into<String>) -> Option<ObjectId> {
        let copy = self.objects.get(source)?.duplicate(name);
        let id = self.add_object(copy)?;
        self.nodes.clone_trees(source, id);
        if self.loaded {
            self.object_queue.push(ObjectRequest::Load(id));
        }
        Some(id)
    }

    /// Creates the physics world. Returns `None` if one already exists.
    pub fn create_world(&mut self, backend: Box<dyn PhysicsWorld>) -> Option<&mut DynamicsWorld> {
        if self.world.is_some() {
            warn!("Scene '{}': physics world already created", self.name);
            return None;
        }
        debug!("Scene '{}': created physics world", self.name);
        Some(self.world.insert(DynamicsWorld::new(backend)))
    }

    /// Registers a logic tree owned by one of this scene's objects.
    pub fn add_tree(&mut self, tree: LogicTree) -> usize {
        self.nodes.add_tree(tree)
    }

    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Makes `camera` the viewport camera. Rebinding happens on the next
    /// post-process when the scene is loaded.
    pub fn set_main_camera(&mut self, camera: ObjectId) -> bool {
        if !self.objects.get(camera).is_some_and(GameObject::is_camera) {
            warn!("Scene '{}': object {} is not a camera", self.name, camera.0);
            return false;
        }
        self.start_camera = Some(camera);
        self.camera_changed = true;
        true
    }

    /// Queues an object load or unload for the end of the tick.
    pub fn request(&mut self, request: ObjectRequest) {
        self.object_queue.push(request);
    }

    //--- Load / Unload ----------------------------------------------------

    /// Instantiates render, physics and logic state for every object in
    /// an active layer.
    pub fn load(&mut self, render: &mut dyn RenderBackend) {
        if self.loaded {
            return;
        }
        if self.objects.is_empty() {
            warn!("Scene '{}' has no objects, nothing to load", self.name);
            return;
        }
        if self.snapshot.is_none() {
            self.snapshot = Some(Snapshot {
                objects: self.objects.clone(),
                nodes: self.nodes.clone(),
            });
        }

        let manager = render.create_scene_manager(&self.name);
        self.manager = Some(manager);
        if let Some(sky) = &self.properties.sky_material {
            render.set_sky_box(manager, sky, self.properties.sky_distance);
        }
        if let Some(world) = &mut self.world {
            world.load();
        }

        let ids: Vec<ObjectId> = self.objects.ids().collect();
        for id in ids {
            let layered = self
                .objects
                .get(id)
                .is_some_and(|o| o.in_layer(self.properties.layers));
            if layered {
                self.load_object(id, manager, render);
            }
        }

        if self.start_camera.is_none() {
            self.start_camera = self.fallback_camera(manager, render);
        }
        self.bind_viewport(render);
        render.set_ambient_light(manager, self.properties.ambient);

        self.loaded = true;
        info!(
            "Scene '{}' loaded: {} objects, {} logic links",
            self.name,
            self.objects.len(),
            self.logic.len()
        );
    }

    /// Releases everything `load` created. No-op if not loaded.
    pub fn unload(&mut self, render: &mut dyn RenderBackend) {
        if !self.loaded {
            return;
        }
        let Some(manager) = self.manager.take() else {
            return;
        };

        for (_, object) in self.objects.iter_mut() {
            object.unload(render, manager, self.world.as_mut());
        }
        if let Some(world) = &mut self.world {
            world.unload();
        }
        self.limits = Aabb::NULL;
        self.logic.clear();
        self.object_queue.drain();

        if let Some(viewport) = self.viewport.take() {
            render.destroy_viewport(viewport);
        }
        render.destroy_scene_manager(manager);

        self.loaded = false;
        info!("Scene '{}' unloaded", self.name);
    }

    /// Unloads, restores the objects and trees captured on first load,
    /// then loads again.
    pub fn restart(&mut self, render: &mut dyn RenderBackend) {
        self.unload(render);
        if let Some(snapshot) = self.snapshot.clone() {
            self.objects = snapshot.objects;
            self.nodes = snapshot.nodes;
            if self.start_camera.is_some_and(|id| self.objects.get(id).is_none()) {
                self.start_camera = None;
            }
        }
        self.load(render);
    }

    //--- Tick -------------------------------------------------------------

    /// Runs logic bricks, logic trees and the physics step, in that order.
    pub fn update(&mut self, tick: f32, ctx: &mut FrameContext<'_>) {
        if !self.loaded {
            return;
        }

        self.logic.update(
            tick,
            LogicFrame {
                scene: &self.name,
                objects: &mut self.objects,
                input: ctx.input,
                messages: &mut *ctx.messages,
                object_queue: &mut self.object_queue,
                scene_requests: &mut *ctx.scene_requests,
            },
        );

        self.nodes
            .update(tick, &mut self.objects, ctx.input, self.properties.layers);

        if let Some(world) = &mut self.world {
            step_physics(world, &mut self.objects, tick);
        }
    }

    pub fn apply_constraints(&mut self) {
        if !self.loaded {
            return;
        }
        for constraint in &self.constraints {
            constraint.apply(&mut self.objects);
        }
    }

    /// Applies queued object loads and unloads.
    pub fn post_process_queue(&mut self, render: &mut dyn RenderBackend) {
        if !self.loaded || self.object_queue.is_empty() {
            return;
        }
        let Some(manager) = self.manager else {
            return;
        };

        for request in self.object_queue.drain() {
            match request {
                ObjectRequest::Load(id) => self.load_object(id, manager, render),
                ObjectRequest::Unload(id) => {
                    self.logic.remove_links_of(id);
                    if let Some(object) = self.objects.get_mut(id) {
                        object.unload(render, manager, self.world.as_mut());
                    }
                }
            }
        }
    }

    /// Pushes object transforms to the render backend and applies a
    /// pending camera change.
    pub fn sync(&mut self, render: &mut dyn RenderBackend) {
        if !self.loaded {
            return;
        }
        if self.camera_changed {
            self.bind_viewport(render);
        }
        for (_, object) in self.objects.iter() {
            if let Some(instance) = object.instance() {
                render.sync_instance(instance, object);
            }
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn load_object(&mut self, id: ObjectId, manager: SceneManagerHandle, render: &mut dyn RenderBackend) {
        let Some(object) = self.objects.get_mut(id) else {
            return;
        };
        if object.is_loaded() {
            return;
        }
        object.load(id, render, manager, self.world.as_mut());

        if object.is_camera() && self.start_camera.is_none() {
            self.start_camera = Some(id);
        }
        if let (true, Some(body), Some(world)) =
            (object.properties().is_static, object.body(), self.world.as_ref())
        {
            self.limits.merge(&world.aabb(body));
        }
        if let Some(template) = object.logic() {
            self.logic.add_link(id, template);
        }
    }

    fn fallback_camera(
        &mut self,
        manager: SceneManagerHandle,
        render: &mut dyn RenderBackend,
    ) -> Option<ObjectId> {
        let id = match self.objects.find(FALLBACK_CAMERA) {
            Some(id) => id,
            None => self.create_camera(FALLBACK_CAMERA)?,
        };
        if let Some(camera) = self.objects.get_mut(id) {
            camera.set_position(FALLBACK_CAMERA_POSITION);
            camera.set_orientation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2));
        }
        debug!("Scene '{}': no camera, using fallback", self.name);
        self.load_object(id, manager, render);
        Some(id)
    }

    fn bind_viewport(&mut self, render: &mut dyn RenderBackend) {
        self.camera_changed = false;
        let Some(camera) = self.start_camera else {
            return;
        };
        let Some(instance) = self.objects.get(camera).and_then(GameObject::instance) else {
            warn!(
                "Scene '{}': start camera {} is not loaded (inactive layer?), no viewport bound",
                self.name, camera.0
            );
            return;
        };

        match self.viewport {
            Some(viewport) => render.set_viewport_camera(viewport, instance),
            None => {
                self.viewport = render.create_viewport(instance);
                match self.viewport {
                    Some(viewport) => {
                        render.set_background_colour(viewport, self.properties.world_colour)
                    }
                    None => debug!("Scene '{}': no main window for a viewport", self.name),
                }
            }
        }
    }
}

/// Pushes kinematic transforms, steps, pulls simulated transforms back
/// and refreshes the contacts of every object with a body.
fn step_physics(world: &mut DynamicsWorld, objects: &mut GameObjects, tick: f32) {
    for (_, object) in objects.iter() {
        if let Some(body) = object.body() {
            world.set_transform(body, object.position(), object.orientation());
        }
    }

    world.step(tick);

    for (_, object) in objects.iter_mut() {
        let Some(body) = object.body() else {
            continue;
        };
        if let Some((position, orientation)) = world.transform(body) {
            object.set_position(position);
            object.set_orientation(orientation);
        }
        object.set_contacts(world.contacts(body));
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

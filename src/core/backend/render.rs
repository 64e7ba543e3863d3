//=========================================================================
// Render Backend
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::math::Colour;
use crate::core::object::GameObject;
use crate::engine::EngineConfig;
use crate::error::EngineError;

//=== Handles =============================================================

/// Backend scene manager created for one loaded scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneManagerHandle(pub u64);

/// Backend node created for one loaded game object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceHandle(pub u64);

/// Viewport on the main window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewportHandle(pub u64);

//=== RenderBackend =======================================================

/// Rendering service used by scenes and the engine frame loop.
pub trait RenderBackend {
    /// Selects and starts the render system named by the config.
    fn initialize(&mut self, config: &EngineConfig) -> Result<(), EngineError>;

    fn finalize(&mut self);

    //--- Scene Managers ---------------------------------------------------

    fn create_scene_manager(&mut self, scene: &str) -> SceneManagerHandle;
    fn destroy_scene_manager(&mut self, manager: SceneManagerHandle);
    fn set_sky_box(&mut self, manager: SceneManagerHandle, material: &str, distance: f32);
    fn set_ambient_light(&mut self, manager: SceneManagerHandle, colour: Colour);

    //--- Instances --------------------------------------------------------

    fn create_instance(&mut self, manager: SceneManagerHandle, object: &GameObject) -> InstanceHandle;
    fn destroy_instance(&mut self, manager: SceneManagerHandle, instance: InstanceHandle);

    /// Pushes the object's current transform and visibility.
    fn sync_instance(&mut self, _instance: InstanceHandle, _object: &GameObject) {}

    //--- Viewports --------------------------------------------------------

    /// Returns `None` when there is no main window to attach to.
    fn create_viewport(&mut self, camera: InstanceHandle) -> Option<ViewportHandle>;
    fn set_viewport_camera(&mut self, viewport: ViewportHandle, camera: InstanceHandle);
    fn destroy_viewport(&mut self, viewport: ViewportHandle);
    fn set_background_colour(&mut self, viewport: ViewportHandle, colour: Colour);

    //--- Frame ------------------------------------------------------------

    /// Renders one frame. `false` ends the step loop.
    fn render_one_frame(&mut self) -> bool;
}

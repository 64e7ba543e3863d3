//=========================================================================
// External Backends
//=========================================================================
//
// Narrow interfaces to the native services the engine drives but does
// not implement: rendering, rigid body physics, and the OS window and
// input pump. Every call is fire-and-forget configuration except where a
// handle or a frame result is returned.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod physics;
pub mod render;
pub mod window;

//=== Public API ==========================================================

pub use physics::{BodyHandle, Contact, DynamicsWorld, PhysicsWorld};
pub use render::{InstanceHandle, RenderBackend, SceneManagerHandle, ViewportHandle};
pub use window::WindowSystem;

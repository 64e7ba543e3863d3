//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use gamekit_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine
pub use crate::engine::{
    Engine, EngineBuilder, EngineConfig, EngineListener, EngineState, ListenerId, ManualClock,
    RenderSystem,
};
pub use crate::error::{EngineError, LogicError};

// Backends and window systems
pub use crate::core::backend::{DynamicsWorld, PhysicsWorld, RenderBackend, WindowSystem};
pub use crate::platform::{HeadlessWindowSystem, InputSender};
#[cfg(not(any(target_arch = "wasm32", target_os = "ios")))]
pub use crate::platform::WinitWindowSystem;

// Input
pub use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton, StateTracker};

// Scenes and objects
pub use crate::core::math::{Colour, Quat, Vec3};
pub use crate::core::object::{GameObject, ObjectId, ObjectKind};
pub use crate::core::scene::{Constraint, Scene, SceneManager, SceneRequest};
pub use crate::core::value::Value;

// Logic
pub use crate::core::bricks::{Actuator, ActuatorKind, Controller, ControllerMode, LogicLink, Sensor, SensorKind};
pub use crate::core::logic::{LogicNode, LogicTree};
pub use crate::core::message::MessageManager;

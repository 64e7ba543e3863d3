//=========================================================================
// Logic Bricks
//=========================================================================
//
// Event-driven behaviour attached to game objects.
//
// Architecture:
//   LogicManager (one per scene)
//     ├─ links: Vec<LogicLink>        one instance per loaded object
//     │    ├─ sensors      ──┐
//     │    ├─ controllers  <─┘ ──┐
//     │    └─ actuators    <─────┘
//     └─ dispatchers: one SensorDispatch per SensorCategory
//
// Flow per tick:
//   dispatch sensors → run fired controllers → deliver pulses → actuators
//
//=========================================================================

//=== Module Declarations =================================================

pub mod actuator;
pub mod collision;
pub mod controller;
pub mod dispatch;
pub mod link;
pub mod logic_manager;
pub mod sensor;

//=== Public API ==========================================================

pub use actuator::{Actuator, ActuatorKind, PropertyOp, SceneOp};
pub use collision::CollisionFilter;
pub use controller::{Controller, ControllerMode};
pub use link::LogicLink;
pub use logic_manager::{LinkId, LogicFrame, LogicManager};
pub use sensor::{MouseTrigger, PropertyTest, Pulse, Sensor, SensorCategory, SensorKind};

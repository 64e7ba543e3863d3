//=========================================================================
// Core Systems
//
// Everything the tick driver composes, independent of any OS window or
// native backend.
//
// Layout:
// - value / math      shared data types
// - input             events and per-frame input state
// - object            game objects and their stores
// - logic             logic node trees
// - bricks            sensors, controllers, actuators
// - message           logic message bus
// - scene             scenes and the scene registry
// - backend           render, physics and window interfaces
//
//=========================================================================

pub mod backend;
pub mod bricks;
pub mod input;
pub mod logic;
pub mod math;
pub mod message;
pub mod object;
pub mod scene;
pub mod value;

//=========================================================================
// GameKit Engine: Library Root
//
// Single-threaded game engine core: scenes of game objects driven by
// logic bricks and logic node trees, synchronised with an external
// physics world and render backend by a fixed-rate tick driver.
//
// Typical usage:
// ```no_run
// use gamekit_engine::prelude::*;
// # fn backend() -> Box<dyn RenderBackend> { unimplemented!() }
//
// let mut engine = EngineBuilder::new()
//     .with_window_system(WinitWindowSystem::new())
//     .with_boxed_render_backend(backend())
//     .build();
//
// let mut scene = Scene::new("Level");
// scene.create_camera("Camera");
// engine.add_scene(scene);
//
// engine.initialize()?;
// engine.load_scene("Level");
// engine.run()?;
// # Ok::<(), EngineError>(())
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------

pub mod core;
pub mod engine;
pub mod error;
pub mod platform;
pub mod prelude;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder, EngineConfig};
pub use error::{ConfigError, EngineError, LogicError};

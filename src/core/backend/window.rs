//=========================================================================
// Window System
//=========================================================================
//
// OS window and input pump.
//
// Per frame the engine calls `process()` once; per tick it calls
// `dispatch()` to hand the queued input to the state tracker. The exit
// flag is polled at the end of every frame.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::StateTracker;
use crate::engine::EngineConfig;
use crate::error::EngineError;

//=== WindowSystem ========================================================

pub trait WindowSystem {
    /// Opens the main window described by the config.
    fn create_window(&mut self, config: &EngineConfig) -> Result<(), EngineError>;

    /// Pumps pending OS events into the input queue.
    fn process(&mut self);

    /// Delivers queued input to logic.
    fn dispatch(&mut self, input: &mut StateTracker);

    fn exit_request(&self) -> bool;

    fn request_exit(&mut self);
}

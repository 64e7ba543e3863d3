//=========================================================================
// Input
//=========================================================================
//
// Engine-side input types. Window systems produce `InputEvent`s; the
// engine dispatches them into a `StateTracker` once per tick before any
// scene updates.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod state_tracker;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};
pub use state_tracker::StateTracker;

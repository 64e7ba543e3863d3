//=========================================================================
// Platform Subsystem
//
// Window systems the engine can drive.
//
// Architecture:
// ```text
//  producer                                consumer (engine thread)
//  ┌──────────────────────────┐           ┌──────────────────────┐
//  │  winit event pump        │           │  EventCollector      │
//  │   ↓                      │           │   ├─ collect()       │
//  │  InputProcessor          │  channel  │   │   once per frame │
//  │   ↓                      │ ────────> │   └─ dispatch()      │
//  │  InputBuffer ── flush ───┤ Platform- │       once per tick  │
//  └──────────────────────────┘  Event    │   ↓                  │
//   or InputSender (headless)             │  StateTracker        │
//                                         └──────────────────────┘
// ```
//
// Both window systems pump on the engine thread. The winit backend
// polls the OS without blocking, so the fixed tick schedule is driven
// by the engine clock and not by the monitor refresh rate.
//
//=========================================================================

//=== Submodules ==========================================================

mod event_collector;
mod headless;
mod input_buffer;

#[cfg(not(any(target_arch = "wasm32", target_os = "ios")))]
mod input_processor;
#[cfg(not(any(target_arch = "wasm32", target_os = "ios")))]
mod winit_window;

//=== Internal Imports ====================================================

use crate::core::input::InputEvent;

//=== Public API ==========================================================

pub use headless::{HeadlessWindowSystem, InputSender};

#[cfg(not(any(target_arch = "wasm32", target_os = "ios")))]
pub use winit_window::WinitWindowSystem;

//=== PlatformEvent =======================================================

/// Messages from a window system's producer side to its collector.
#[derive(Debug, Clone)]
pub(crate) enum PlatformEvent {
    /// Input gathered since the previous flush. `discrete` keeps arrival
    /// order; `continuous` holds coalesced cursor motion.
    Inputs {
        discrete: Vec<InputEvent>,
        continuous: Vec<InputEvent>,
    },

    /// The user or the OS asked to close the main window.
    CloseRequested,
}

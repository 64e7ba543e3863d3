//=========================================================================
// Headless Window System
//=========================================================================
//
// Window system without an OS window. Input is injected through an
// `InputSender`, which makes the engine loop scriptable from tests,
// servers and replays.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Sender, TrySendError};
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::event_collector::{EventCollector, TickControl};
use super::PlatformEvent;
use crate::core::backend::WindowSystem;
use crate::core::input::{InputEvent, StateTracker};
use crate::engine::EngineConfig;
use crate::error::EngineError;

//=== InputSender =========================================================

/// Handle that feeds a [`HeadlessWindowSystem`].
///
/// Events sent between two frames reach logic on the first tick of the
/// next frame. Sending never blocks; a full queue drops the batch.
#[derive(Debug, Clone)]
pub struct InputSender {
    sender: Sender<PlatformEvent>,
}

impl InputSender {
    /// Queues one batch of events. Returns `false` if it was dropped.
    pub fn send(&self, events: Vec<InputEvent>) -> bool {
        if events.is_empty() {
            return true;
        }
        let (discrete, continuous): (Vec<_>, Vec<_>) = events.into_iter().partition(InputEvent::is_discrete);
        self.push(PlatformEvent::Inputs { discrete, continuous })
    }

    /// Asks the engine loop to stop at the end of the next frame.
    pub fn close(&self) -> bool {
        self.push(PlatformEvent::CloseRequested)
    }

    fn push(&self, event: PlatformEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!(target: "platform::input", "Input queue full, dropping batch");
                false
            }
            Err(TrySendError::Disconnected(_)) => {
                debug!(target: "platform::input", "Headless window system is gone");
                false
            }
        }
    }
}

//=== HeadlessWindowSystem ================================================

pub struct HeadlessWindowSystem {
    collector: EventCollector,
    // Keeps the channel connected when every InputSender is dropped.
    _keepalive: Sender<PlatformEvent>,
    exit: bool,
}

impl HeadlessWindowSystem {
    /// Creates the window system and the sender that feeds it.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn new(capacity: usize) -> (Self, InputSender) {
        assert!(capacity > 0, "Channel capacity must be positive");
        let (sender, receiver) = bounded(capacity);
        let system = Self {
            collector: EventCollector::new(receiver),
            _keepalive: sender.clone(),
            exit: false,
        };
        (system, InputSender { sender })
    }
}

impl WindowSystem for HeadlessWindowSystem {
    fn create_window(&mut self, config: &EngineConfig) -> Result<(), EngineError> {
        info!(
            target: "platform",
            "Headless window '{}' ({}x{})",
            config.window_title, config.window_width, config.window_height
        );
        Ok(())
    }

    fn process(&mut self) {
        if self.collector.collect() == TickControl::Exit {
            info!(target: "platform", "Headless window close requested");
            self.exit = true;
        }
    }

    fn dispatch(&mut self, input: &mut StateTracker) {
        self.collector.dispatch(input);
    }

    fn exit_request(&self) -> bool {
        self.exit
    }

    fn request_exit(&mut self) {
        self.exit = true;
    }
}

impl std::fmt::Debug for HeadlessWindowSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessWindowSystem")
            .field("exit", &self.exit)
            .finish_non_exhaustive()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;

    #[test]
    fn sent_input_reaches_tracker_after_process() {
        let (mut window, input) = HeadlessWindowSystem::new(8);
        let mut tracker = StateTracker::new();

        assert!(input.send(vec![
            InputEvent::key_down(KeyCode::KeyW),
            InputEvent::MouseMoved { x: 4.0, y: 2.0 },
        ]));

        window.dispatch(&mut tracker);
        assert!(!tracker.is_key_down(KeyCode::KeyW));

        window.process();
        window.dispatch(&mut tracker);
        assert!(tracker.is_key_pressed(KeyCode::KeyW));
        assert_eq!(tracker.mouse_position(), (4.0, 2.0));
    }

    #[test]
    fn close_sets_exit_request() {
        let (mut window, input) = HeadlessWindowSystem::new(4);
        assert!(input.close());
        assert!(!window.exit_request());

        window.process();
        assert!(window.exit_request());
    }

    #[test]
    fn dropping_senders_does_not_exit() {
        let (mut window, input) = HeadlessWindowSystem::new(4);
        drop(input);

        window.process();
        assert!(!window.exit_request());
    }

    #[test]
    fn full_queue_drops_batch() {
        let (_window, input) = HeadlessWindowSystem::new(1);
        assert!(input.send(vec![InputEvent::key_down(KeyCode::KeyA)]));
        assert!(!input.send(vec![InputEvent::key_down(KeyCode::KeyB)]));
    }

    #[test]
    fn request_exit_is_sticky() {
        let (mut window, _input) = HeadlessWindowSystem::new(4);
        window.request_exit();
        window.process();
        assert!(window.exit_request());
    }
}

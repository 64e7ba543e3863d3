//=========================================================================
// State Tracker
//=========================================================================
//
// Persistent input state plus per-frame deltas.
//
// Architecture:
//   Vec<InputEvent> batches → dispatch() → HashSets (held / edges) → query
//
// Frame lifecycle: begin_frame() → process_events() → end_frame()
// (`dispatch` runs all three for one tick's worth of batches).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== StateTracker ========================================================

/// Input state read by keyboard/mouse sensors and key nodes.
#[derive(Debug, Default)]
pub struct StateTracker {
    //--- Persistent State ------------------------------------------------
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    mouse_position: (f32, f32),
    modifiers: Modifiers,

    //--- Frame Deltas ----------------------------------------------------
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,
    buttons_pressed: HashSet<MouseButton>,
    buttons_released: HashSet<MouseButton>,
    mouse_delta: (f32, f32),
    last_mouse_position: (f32, f32),
}

impl StateTracker {
    /// Creates a tracker with nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    //--- Frame Processing -------------------------------------------------

    /// Runs one full frame over the given event batches, in order.
    pub fn dispatch(&mut self, batches: &[Vec<InputEvent>]) {
        self.begin_frame();
        for batch in batches {
            self.process_events(batch);
        }
        self.end_frame();
    }

    /// Clears edge deltas from the previous frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.last_mouse_position = self.mouse_position;
    }

    /// Applies a batch of events.
    pub fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    /// Computes per-frame derived values.
    pub fn end_frame(&mut self) {
        self.mouse_delta = (
            self.mouse_position.0 - self.last_mouse_position.0,
            self.mouse_position.1 - self.last_mouse_position.1,
        );
    }

    fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown { key, modifiers } => {
                self.modifiers = *modifiers;
                if self.keys_down.insert(*key) {
                    self.keys_pressed.insert(*key);
                }
            }
            InputEvent::KeyUp { key, modifiers } => {
                self.modifiers = *modifiers;
                if self.keys_down.remove(key) {
                    self.keys_released.insert(*key);
                }
            }
            InputEvent::MouseButtonDown { button, modifiers } => {
                self.modifiers = *modifiers;
                if self.buttons_down.insert(*button) {
                    self.buttons_pressed.insert(*button);
                }
            }
            InputEvent::MouseButtonUp { button, modifiers } => {
                self.modifiers = *modifiers;
                if self.buttons_down.remove(button) {
                    self.buttons_released.insert(*button);
                }
            }
            InputEvent::MouseMoved { x, y } => {
                self.mouse_position = (*x, *y);
            }
            InputEvent::Unidentified => {}
        }
    }

    //=====================================================================
    // Query API - Keyboard
    //=====================================================================

    /// `true` only on the frame the key went down.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// `true` while the key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// `true` only on the frame the key went up.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    /// `true` while any key is held.
    pub fn any_key_down(&self) -> bool {
        !self.keys_down.is_empty()
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    //=====================================================================
    // Query API - Mouse
    //=====================================================================

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }

    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }

    /// Cursor movement over the last dispatched frame.
    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    pub fn mouse_moved(&self) -> bool {
        self.mouse_delta != (0.0, 0.0)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(tracker: &mut StateTracker, events: Vec<InputEvent>) {
        tracker.dispatch(&[events]);
    }

    #[test]
    fn key_pressed_only_on_transition_frame() {
        let mut tracker = StateTracker::new();

        frame(&mut tracker, vec![InputEvent::key_down(KeyCode::KeyA)]);
        assert!(tracker.is_key_pressed(KeyCode::KeyA));
        assert!(tracker.is_key_down(KeyCode::KeyA));

        frame(&mut tracker, vec![]);
        assert!(!tracker.is_key_pressed(KeyCode::KeyA));
        assert!(tracker.is_key_down(KeyCode::KeyA));

        frame(&mut tracker, vec![InputEvent::key_up(KeyCode::KeyA)]);
        assert!(!tracker.is_key_down(KeyCode::KeyA));
        assert!(tracker.is_key_released(KeyCode::KeyA));
    }

    #[test]
    fn fast_tap_captures_both_edges() {
        let mut tracker = StateTracker::new();

        frame(
            &mut tracker,
            vec![InputEvent::key_down(KeyCode::Space), InputEvent::key_up(KeyCode::Space)],
        );

        assert!(tracker.is_key_pressed(KeyCode::Space));
        assert!(tracker.is_key_released(KeyCode::Space));
        assert!(!tracker.is_key_down(KeyCode::Space));
    }

    #[test]
    fn spurious_release_is_ignored() {
        let mut tracker = StateTracker::new();
        frame(&mut tracker, vec![InputEvent::key_up(KeyCode::KeyZ)]);
        assert!(!tracker.is_key_released(KeyCode::KeyZ));
    }

    #[test]
    fn batches_apply_in_order() {
        let mut tracker = StateTracker::new();
        tracker.dispatch(&[
            vec![InputEvent::key_down(KeyCode::KeyW)],
            vec![InputEvent::key_up(KeyCode::KeyW)],
        ]);
        assert!(!tracker.is_key_down(KeyCode::KeyW));
        assert!(!tracker.any_key_down());
    }

    #[test]
    fn mouse_delta_tracks_frame_motion() {
        let mut tracker = StateTracker::new();

        frame(&mut tracker, vec![InputEvent::MouseMoved { x: 10.0, y: 5.0 }]);
        assert_eq!(tracker.mouse_delta(), (10.0, 5.0));
        assert!(tracker.mouse_moved());

        frame(&mut tracker, vec![]);
        assert_eq!(tracker.mouse_delta(), (0.0, 0.0));
        assert!(!tracker.mouse_moved());
    }

    #[test]
    fn button_state_and_modifiers() {
        let mut tracker = StateTracker::new();
        frame(
            &mut tracker,
            vec![InputEvent::MouseButtonDown { button: MouseButton::Left, modifiers: Modifiers::SHIFT }],
        );

        assert!(tracker.is_button_pressed(MouseButton::Left));
        assert!(tracker.is_button_down(MouseButton::Left));
        assert!(tracker.modifiers().shift);
    }
}

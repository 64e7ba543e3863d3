//=========================================================================
// Input Processor
//=========================================================================
//
// Translates winit window events into engine `InputEvent`s.
//
// Modifier state is sticky: it is cached from `ModifiersChanged` and
// stamped onto every following key and button event. Keys the engine
// has no code for are dropped.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== InputProcessor ======================================================

#[derive(Debug, Default)]
pub(crate) struct InputProcessor {
    modifiers: Modifiers,
}

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns the engine event for `event`, if it carries input.
    pub(crate) fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::ModifiersChanged(state) => {
                self.modifiers = modifiers_from(state.state());
                None
            }
            WindowEvent::KeyboardInput { event, is_synthetic: false, .. } => {
                if event.repeat {
                    return None;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return None;
                };
                let key = map_key(code)?;
                Some(self.key_event(key, event.state))
            }
            WindowEvent::MouseInput { state, button, .. } => {
                Some(self.button_event(map_button(*button), *state))
            }
            WindowEvent::CursorMoved { position, .. } => Some(InputEvent::MouseMoved {
                x: position.x as f32,
                y: position.y as f32,
            }),
            _ => None,
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn key_event(&self, key: KeyCode, state: ElementState) -> InputEvent {
        let modifiers = self.modifiers;
        match state {
            ElementState::Pressed => InputEvent::KeyDown { key, modifiers },
            ElementState::Released => InputEvent::KeyUp { key, modifiers },
        }
    }

    fn button_event(&self, button: MouseButton, state: ElementState) -> InputEvent {
        let modifiers = self.modifiers;
        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown { button, modifiers },
            ElementState::Released => InputEvent::MouseButtonUp { button, modifiers },
        }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

fn modifiers_from(state: ModifiersState) -> Modifiers {
    Modifiers {
        shift: state.shift_key(),
        ctrl: state.control_key(),
        alt: state.alt_key(),
    }
}

fn map_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        _ => MouseButton::Other,
    }
}

fn map_key(code: WinitKeyCode) -> Option<KeyCode> {
    use WinitKeyCode as W;
    let key = match code {
        W::Digit0 => KeyCode::Digit0,
        W::Digit1 => KeyCode::Digit1,
        W::Digit2 => KeyCode::Digit2,
        W::Digit3 => KeyCode::Digit3,
        W::Digit4 => KeyCode::Digit4,
        W::Digit5 => KeyCode::Digit5,
        W::Digit6 => KeyCode::Digit6,
        W::Digit7 => KeyCode::Digit7,
        W::Digit8 => KeyCode::Digit8,
        W::Digit9 => KeyCode::Digit9,

        W::KeyA => KeyCode::KeyA,
        W::KeyB => KeyCode::KeyB,
        W::KeyC => KeyCode::KeyC,
        W::KeyD => KeyCode::KeyD,
        W::KeyE => KeyCode::KeyE,
        W::KeyF => KeyCode::KeyF,
        W::KeyG => KeyCode::KeyG,
        W::KeyH => KeyCode::KeyH,
        W::KeyI => KeyCode::KeyI,
        W::KeyJ => KeyCode::KeyJ,
        W::KeyK => KeyCode::KeyK,
        W::KeyL => KeyCode::KeyL,
        W::KeyM => KeyCode::KeyM,
        W::KeyN => KeyCode::KeyN,
        W::KeyO => KeyCode::KeyO,
        W::KeyP => KeyCode::KeyP,
        W::KeyQ => KeyCode::KeyQ,
        W::KeyR => KeyCode::KeyR,
        W::KeyS => KeyCode::KeyS,
        W::KeyT => KeyCode::KeyT,
        W::KeyU => KeyCode::KeyU,
        W::KeyV => KeyCode::KeyV,
        W::KeyW => KeyCode::KeyW,
        W::KeyX => KeyCode::KeyX,
        W::KeyY => KeyCode::KeyY,
        W::KeyZ => KeyCode::KeyZ,

        W::ArrowUp => KeyCode::ArrowUp,
        W::ArrowDown => KeyCode::ArrowDown,
        W::ArrowLeft => KeyCode::ArrowLeft,
        W::ArrowRight => KeyCode::ArrowRight,

        W::Space => KeyCode::Space,
        W::Enter | W::NumpadEnter => KeyCode::Enter,
        W::Escape => KeyCode::Escape,
        W::Tab => KeyCode::Tab,
        W::Backspace => KeyCode::Backspace,
        W::Delete => KeyCode::Delete,
        W::ShiftLeft => KeyCode::ShiftLeft,
        W::ShiftRight => KeyCode::ShiftRight,
        W::ControlLeft => KeyCode::ControlLeft,
        W::ControlRight => KeyCode::ControlRight,

        _ => return None,
    };
    Some(key)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_by_location() {
        assert_eq!(map_key(WinitKeyCode::KeyW), Some(KeyCode::KeyW));
        assert_eq!(map_key(WinitKeyCode::NumpadEnter), Some(KeyCode::Enter));
        assert_eq!(map_key(WinitKeyCode::ShiftRight), Some(KeyCode::ShiftRight));
        assert_eq!(map_key(WinitKeyCode::F13), None);
    }

    #[test]
    fn extra_mouse_buttons_collapse_to_other() {
        assert_eq!(map_button(WinitMouseButton::Back), MouseButton::Other);
        assert_eq!(map_button(WinitMouseButton::Other(7)), MouseButton::Other);
        assert_eq!(map_button(WinitMouseButton::Middle), MouseButton::Middle);
    }

    #[test]
    fn winit_modifiers_convert() {
        let state = ModifiersState::SHIFT | ModifiersState::ALT;
        assert_eq!(
            modifiers_from(state),
            Modifiers { shift: true, ctrl: false, alt: true }
        );
        assert_eq!(modifiers_from(ModifiersState::empty()), Modifiers::NONE);
    }

    #[test]
    fn cached_modifiers_are_stamped() {
        let mut processor = InputProcessor::new();
        processor.modifiers = Modifiers::CTRL;

        assert_eq!(
            processor.key_event(KeyCode::KeyS, ElementState::Pressed),
            InputEvent::KeyDown { key: KeyCode::KeyS, modifiers: Modifiers::CTRL }
        );
        assert_eq!(
            processor.button_event(MouseButton::Right, ElementState::Released),
            InputEvent::MouseButtonUp { button: MouseButton::Right, modifiers: Modifiers::CTRL }
        );
    }

    #[test]
    fn unrelated_events_are_ignored() {
        let mut processor = InputProcessor::new();
        assert!(processor.translate(&WindowEvent::Focused(true)).is_none());
    }
}

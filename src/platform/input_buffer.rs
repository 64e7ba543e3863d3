//=========================================================================
// Input Buffer
//
// Collects input events between two flushes of a producer and splits
// them into two categories: discrete and continuous.
//
// Responsibilities:
// - Keep discrete events (keys, buttons) in arrival order
// - Drop consecutive duplicate discrete events (key repeat)
// - Coalesce continuous events (cursor motion) to the latest one
// - Hand both lists over as one `PlatformEvent` via `flush()`
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashSet;

//=== Internal Modules ====================================================

use super::PlatformEvent;
use crate::core::input::InputEvent;

//=== InputBuffer =========================================================

#[derive(Debug)]
pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: HashSet<InputEvent>,
}

impl InputBuffer {
    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 64;
        const CONTINUOUS_BASE: usize = 4;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: HashSet::with_capacity(CONTINUOUS_BASE),
        }
    }

    /// Routes an event to the discrete or continuous list.
    pub(crate) fn push(&mut self, event: InputEvent) {
        if event.is_discrete() {
            if self.discrete.last() != Some(&event) {
                self.discrete.push(event);
            }
        } else {
            self.continuous.replace(event);
        }
    }

    /// Takes the buffered events, or `None` if there are none.
    pub(crate) fn flush(&mut self) -> Option<PlatformEvent> {
        if self.is_empty() {
            return None;
        }
        Some(PlatformEvent::Inputs {
            discrete: std::mem::take(&mut self.discrete),
            continuous: self.continuous.drain().collect(),
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.discrete.len() + self.continuous.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
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
    fn consecutive_duplicates_are_dropped() {
        let mut buffer = InputBuffer::new();
        buffer.push(InputEvent::key_down(KeyCode::KeyA));
        buffer.push(InputEvent::key_down(KeyCode::KeyA));
        buffer.push(InputEvent::key_down(KeyCode::KeyB));
        buffer.push(InputEvent::key_down(KeyCode::KeyA));
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn cursor_motion_is_coalesced() {
        let mut buffer = InputBuffer::new();
        buffer.push(InputEvent::MouseMoved { x: 10.0, y: 10.0 });
        buffer.push(InputEvent::MouseMoved { x: 20.0, y: 30.0 });

        match buffer.flush() {
            Some(PlatformEvent::Inputs { discrete, continuous }) => {
                assert!(discrete.is_empty());
                assert_eq!(continuous.len(), 1);
                match continuous[0] {
                    InputEvent::MouseMoved { x, y } => assert_eq!((x, y), (20.0, 30.0)),
                    ref other => panic!("Expected MouseMoved, found {:?}", other),
                }
            }
            other => panic!("Expected Inputs, found {:?}", other),
        }
    }

    #[test]
    fn flush_empties_buffer() {
        let mut buffer = InputBuffer::new();
        assert!(buffer.flush().is_none());

        buffer.push(InputEvent::key_down(KeyCode::KeyA));
        buffer.push(InputEvent::MouseMoved { x: 5.0, y: 5.0 });
        assert!(buffer.flush().is_some());
        assert!(buffer.is_empty());
        assert!(buffer.flush().is_none());
    }
}

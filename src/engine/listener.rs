//=========================================================================
// Engine Listeners
//=========================================================================
//
// External per-tick callbacks. Listeners run after every active scene
// has updated and before constraints are applied, so they observe this
// tick's logic and physics results and may still move objects.
//
//=========================================================================

use crate::core::scene::SceneManager;

/// A per-tick callback registered on the engine.
pub trait EngineListener {
    fn tick(&mut self, scenes: &mut SceneManager, dt: f32);
}

impl<F> EngineListener for F
where
    F: FnMut(&mut SceneManager, f32),
{
    fn tick(&mut self, scenes: &mut SceneManager, dt: f32) {
        self(scenes, dt)
    }
}

//=== ListenerId ==========================================================

/// Handle returned when a listener is registered, used to remove it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

//=== Listeners ===========================================================

/// Registered listeners in registration order. Ids are never reused.
#[derive(Default)]
pub(crate) struct Listeners {
    entries: Vec<(ListenerId, Box<dyn EngineListener>)>,
    next: u64,
}

impl Listeners {
    pub fn add(&mut self, listener: Box<dyn EngineListener>) -> ListenerId {
        let id = ListenerId(self.next);
        self.next += 1;
        self.entries.push((id, listener));
        id
    }

    /// Keeps the order of the remaining listeners.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        match self.entries.iter().position(|(entry, _)| *entry == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn tick(&mut self, scenes: &mut SceneManager, dt: f32) {
        for (_, listener) in &mut self.entries {
            listener.tick(scenes, dt);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

//=========================================================================
// Object Store
//=========================================================================
//
// Name-keyed object storage that preserves registration order.
// Duplicate names are rejected, never overwritten.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::{GameObject, ObjectId};

//=== GameObjects =========================================================

/// Ordered object store of one scene.
#[derive(Debug, Clone, Default)]
pub struct GameObjects {
    objects: Vec<GameObject>,
    by_name: HashMap<String, ObjectId>,
}

impl GameObjects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an object. Returns `None` if the name is already taken.
    pub fn insert(&mut self, object: GameObject) -> Option<ObjectId> {
        if self.by_name.contains_key(object.name()) {
            return None;
        }

        let id = ObjectId(self.objects.len());
        self.by_name.insert(object.name().to_string(), id);
        self.objects.push(object);
        Some(id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.get(id.0)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.get_mut(id.0)
    }

    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.by_name.get(name).copied()
    }

    pub fn by_name(&self, name: &str) -> Option<&GameObject> {
        self.find(name).and_then(|id| self.get(id))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &GameObject)> {
        self.objects.iter().enumerate().map(|(i, o)| (ObjectId(i), o))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ObjectId, &mut GameObject)> {
        self.objects.iter_mut().enumerate().map(|(i, o)| (ObjectId(i), o))
    }

    pub fn ids(&self) -> impl Iterator<Item = ObjectId> {
        (0..self.objects.len()).map(ObjectId)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

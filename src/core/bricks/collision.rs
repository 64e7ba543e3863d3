//=========================================================================
// Collision Filter
//=========================================================================
//
// Matching rules of the collision sensor, applied to the contacts the
// last physics step materialised on the owning object:
//
//   - no body, or no contacts          → false
//   - no property and no material      → true on the first contact
//   - property set                     → collider carries that variable
//   - otherwise material set           → collider material equals it
//
// With both filters set the property filter decides and the material
// is ignored.
//
//=========================================================================

use crate::core::object::{GameObjects, ObjectId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionFilter {
    /// Variable the collider must carry.
    pub property: String,

    /// Sensor material the collider must have.
    pub material: String,
}

impl CollisionFilter {
    /// Fires on any contact.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn property(name: impl Into<String>) -> Self {
        Self {
            property: name.into(),
            material: String::new(),
        }
    }

    pub fn material(name: impl Into<String>) -> Self {
        Self {
            property: String::new(),
            material: name.into(),
        }
    }

    pub fn matches(&self, owner: ObjectId, objects: &GameObjects) -> bool {
        let Some(object) = objects.get(owner) else {
            return false;
        };
        if object.body().is_none() || object.contacts().is_empty() {
            return false;
        }

        if self.property.is_empty() && self.material.is_empty() {
            return true;
        }

        object.contacts().iter().any(|contact| {
            if !self.property.is_empty() {
                objects
                    .get(contact.collider)
                    .is_some_and(|collider| collider.has_variable(&self.property))
            } else {
                contact.material == self.material
            }
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

//=========================================================================
// Constraints
//=========================================================================
//
// Position limits applied to loaded objects after logic, listeners and
// physics have run for the tick.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::math::Vec3;
use crate::core::object::{GameObjects, ObjectId};

//=== Constraint ==========================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Clamps the object's position into `[min, max]` per axis.
    LimitLocation { object: ObjectId, min: Vec3, max: Vec3 },

    /// Keeps the object within `distance` of `target`.
    LimitDistance { object: ObjectId, target: ObjectId, distance: f32 },
}

impl Constraint {
    pub fn object(&self) -> ObjectId {
        match self {
            Self::LimitLocation { object, .. } | Self::LimitDistance { object, .. } => *object,
        }
    }

    pub fn apply(&self, objects: &mut GameObjects) {
        match self {
            Self::LimitLocation { object, min, max } => {
                if let Some(obj) = objects.get_mut(*object).filter(|o| o.is_loaded()) {
                    let clamped = obj.position().clamp(*min, *max);
                    obj.set_position(clamped);
                }
            }

            Self::LimitDistance { object, target, distance } => {
                let Some(anchor) = objects
                    .get(*target)
                    .filter(|o| o.is_loaded())
                    .map(|o| o.position())
                else {
                    return;
                };
                if let Some(obj) = objects.get_mut(*object).filter(|o| o.is_loaded()) {
                    let offset = obj.position() - anchor;
                    if offset.length() > *distance {
                        obj.set_position(anchor + offset.normalize_or_zero() * *distance);
                    }
                }
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

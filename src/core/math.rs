//=========================================================================
// Math Helpers
//=========================================================================
//
// Small geometric types used by scenes and backends. Vector and
// rotation types come from `glam`.
//
//=========================================================================

//=== External Dependencies ===============================================

pub use glam::{EulerRot, Quat, Vec3};

//=== Aabb ================================================================

/// Axis-aligned bounding box. A null box contains nothing and is the
/// identity for [`Aabb::merge`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// The empty box.
    pub const NULL: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centered on `center` with the given half extents.
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn is_null(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grows this box to include `other`.
    pub fn merge(&mut self, other: &Aabb) {
        if other.is_null() {
            return;
        }
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    pub fn contains(&self, point: Vec3) -> bool {
        !self.is_null() && point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::NULL
    }
}

//=== Colour ==============================================================

/// RGBA colour with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Colour {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

impl Default for Colour {
    fn default() -> Self {
        Self::BLACK
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_box_is_merge_identity() {
        let mut b = Aabb::NULL;
        assert!(b.is_null());

        b.merge(&Aabb::new(Vec3::ZERO, Vec3::ONE));
        assert_eq!(b, Aabb::new(Vec3::ZERO, Vec3::ONE));

        b.merge(&Aabb::NULL);
        assert_eq!(b, Aabb::new(Vec3::ZERO, Vec3::ONE));
    }

    #[test]
    fn merge_grows_box() {
        let mut b = Aabb::from_center(Vec3::ZERO, Vec3::ONE);
        b.merge(&Aabb::from_center(Vec3::new(4.0, 0.0, 0.0), Vec3::ONE));

        assert_eq!(b.min, Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(b.max, Vec3::new(5.0, 1.0, 1.0));
        assert!(b.contains(Vec3::new(3.0, 0.5, 0.0)));
        assert!(!b.contains(Vec3::new(6.0, 0.0, 0.0)));
    }
}

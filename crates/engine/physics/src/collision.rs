//! Collision primitives
//!
//! Axis-aligned bounding boxes in world space, built only on glam types.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-Aligned Bounding Box
///
/// Represents a box aligned to the world coordinate axes. All corners are axis-aligned,
/// making intersection tests simple min/max comparisons.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max corners
    ///
    /// # Arguments
    /// * `min` - Minimum corner (smallest x, y, z values)
    /// * `max` - Maximum corner (largest x, y, z values)
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box standing on the ground plane: centered on X/Z, spanning `0..height` on Y
    ///
    /// This is the usual local footprint for a character or prop whose origin is
    /// at its feet.
    pub fn grounded(half_width: f32, height: f32, half_depth: f32) -> Self {
        Self {
            min: Vec3::new(-half_width, 0.0, -half_depth),
            max: Vec3::new(half_width, height, half_depth),
        }
    }

    /// Whether every min component is no greater than the matching max and all are finite
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min.cmple(self.max).all()
    }

    /// Move the box by `offset`
    ///
    /// # Example
    /// ```
    /// use grove_physics::Aabb;
    /// use glam::Vec3;
    ///
    /// let local = Aabb::grounded(1.0, 2.0, 1.0);
    /// let world = local.translated(Vec3::new(10.0, 0.0, 0.0));
    /// assert_eq!(world.min, Vec3::new(9.0, 0.0, -1.0));
    /// assert_eq!(world.max, Vec3::new(11.0, 2.0, 1.0));
    /// ```
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Test intersection with another AABB
    ///
    /// Two AABBs intersect if they overlap in all three dimensions.
    ///
    /// # Returns
    /// `true` if the AABBs overlap (including touching at edges/faces)
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_grounded() {
        let aabb = Aabb::grounded(20.0, 180.0, 10.0);
        assert_eq!(aabb.min, Vec3::new(-20.0, 0.0, -10.0));
        assert_eq!(aabb.max, Vec3::new(20.0, 180.0, 10.0));
        assert!(aabb.is_valid());
    }

    #[test]
    fn test_aabb_validity() {
        let inverted = Aabb::new(Vec3::ONE, Vec3::ZERO);
        assert!(!inverted.is_valid());

        let degenerate = Aabb::new(Vec3::ONE, Vec3::ONE);
        assert!(degenerate.is_valid());

        let broken = Aabb::new(Vec3::ZERO, Vec3::new(f32::NAN, 1.0, 1.0));
        assert!(!broken.is_valid());
    }

    #[test]
    fn test_aabb_translated() {
        let aabb = Aabb::new(Vec3::splat(-0.5), Vec3::splat(0.5));
        let moved = aabb.translated(Vec3::new(3.0, 0.0, -2.0));
        assert_eq!(moved.min, Vec3::new(2.5, -0.5, -2.5));
        assert_eq!(moved.max, Vec3::new(3.5, 0.5, -1.5));
    }

    #[test]
    fn test_aabb_intersects() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::splat(0.5), Vec3::splat(1.5));
        let c = Aabb::new(Vec3::splat(2.0), Vec3::splat(3.0));

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
        assert!(!c.intersects(&a));
    }

    #[test]
    fn test_aabb_intersects_touching() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));

        // Closed intervals: touching faces count as overlap
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_aabb_requires_overlap_on_every_axis() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        // Overlaps on X and Z but sits above on Y
        let above = Aabb::new(Vec3::new(0.2, 1.5, 0.2), Vec3::new(0.8, 2.0, 0.8));
        assert!(!a.intersects(&above));
    }
}

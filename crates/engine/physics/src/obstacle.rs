use glam::Vec3;

use crate::collision::Aabb;

/// Stable identity of a static obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObstacleId(pub u32);

/// A static obstacle: world-space bounds plus identity
///
/// Obstacles are created once when the scene is built and never move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub id: ObstacleId,
    /// Placement origin on the ground plane
    pub position: Vec3,
    /// World-space bounds
    pub bounds: Aabb,
}

impl Obstacle {
    /// Place a model with local bounds `footprint` at `position`
    pub fn place(id: ObstacleId, footprint: &Aabb, position: Vec3) -> Self {
        Self {
            id,
            position,
            bounds: footprint.translated(position),
        }
    }
}

//! Static obstacle collision for Grove
//!
//! The collision world is a fixed set of axis-aligned obstacles scattered at
//! scene build time. Gameplay only ever asks one question of it: would the
//! avatar's footprint at some candidate position overlap anything?

pub mod collision;
mod error;
pub mod index;
mod obstacle;
pub mod scatter;

pub use collision::Aabb;
pub use error::{Error, Result};
pub use index::{CollisionIndex, GridIndex, IndexKind, LinearIndex};
pub use obstacle::{Obstacle, ObstacleId};
pub use scatter::{scatter_obstacles, ScatterConfig};

// Re-export for convenience
pub use glam;

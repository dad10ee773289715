//! Random obstacle placement around a spawn point
//!
//! Instances are sampled uniformly in a square on the ground plane. Any sample
//! closer to the spawn point than the exclusion radius is thrown away and
//! resampled, up to a per-instance attempt budget.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::collision::Aabb;
use crate::error::{Error, Result};
use crate::obstacle::{Obstacle, ObstacleId};

/// Placement parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    /// Number of instances to place
    pub count: usize,
    /// Half side length of the placement square on X and Z
    pub half_extent: f32,
    /// Minimum distance between an instance origin and the spawn point
    pub exclusion_radius: f32,
    /// Samples tried per instance before giving up
    pub max_attempts: u32,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            count: 80,
            half_extent: 1000.0,
            exclusion_radius: 300.0,
            max_attempts: 1000,
        }
    }
}

impl ScatterConfig {
    /// Reject parameter sets that can never be satisfied
    pub fn validate(&self) -> Result<()> {
        if !self.half_extent.is_finite() || self.half_extent <= 0.0 {
            return Err(Error::InvalidScatter(format!(
                "half extent must be positive, got {}",
                self.half_extent
            )));
        }
        if !self.exclusion_radius.is_finite() || self.exclusion_radius < 0.0 {
            return Err(Error::InvalidScatter(format!(
                "exclusion radius must be non-negative, got {}",
                self.exclusion_radius
            )));
        }
        if self.count > 0 && self.max_attempts == 0 {
            return Err(Error::InvalidScatter("max attempts must be at least 1".into()));
        }
        Ok(())
    }
}

/// Scatter `config.count` copies of a model with local bounds `footprint`
///
/// Returns obstacles with ids `0..count` in placement order. Fails when the
/// parameters are inconsistent or an instance exhausts its attempt budget.
pub fn scatter_obstacles<R: Rng + ?Sized>(
    footprint: &Aabb,
    spawn: Vec3,
    config: &ScatterConfig,
    rng: &mut R,
) -> Result<Vec<Obstacle>> {
    config.validate()?;

    // Farthest point of the square from spawn; if even that lies inside the
    // exclusion disk no sample can ever be accepted.
    let farthest = Vec3::new(
        spawn.x.abs() + config.half_extent,
        spawn.y,
        spawn.z.abs() + config.half_extent,
    )
    .length();
    if config.count > 0 && farthest < config.exclusion_radius {
        return Err(Error::InvalidScatter(format!(
            "exclusion radius {} covers the whole placement square (half extent {})",
            config.exclusion_radius, config.half_extent
        )));
    }

    let mut obstacles = Vec::with_capacity(config.count);
    let mut rejected_total = 0u64;

    for instance in 0..config.count {
        let mut placed = None;
        for _ in 0..config.max_attempts {
            let position = Vec3::new(
                rng.random_range(-config.half_extent..config.half_extent),
                0.0,
                rng.random_range(-config.half_extent..config.half_extent),
            );
            if position.distance(spawn) >= config.exclusion_radius {
                placed = Some(position);
                break;
            }
            rejected_total += 1;
        }

        let Some(position) = placed else {
            return Err(Error::PlacementExhausted {
                instance,
                attempts: config.max_attempts,
            });
        };

        obstacles.push(Obstacle::place(ObstacleId(instance as u32), footprint, position));
    }

    tracing::info!(
        count = obstacles.len(),
        rejected = rejected_total,
        exclusion_radius = config.exclusion_radius,
        "scattered obstacles"
    );

    Ok(obstacles)
}

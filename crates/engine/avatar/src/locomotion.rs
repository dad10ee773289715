//! Camera-relative avatar locomotion
//!
//! Movement intent is expressed relative to where the camera looks, projected
//! onto the ground plane. A step is all-or-nothing: if the avatar footprint at
//! the candidate position touches an obstacle the transform is left untouched.

use devices::Intent;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::transform::Transform;
use crate::world::World;

/// Configuration for the locomotion controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Ground speed in world units per second
    pub speed: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self { speed: 150.0 }
    }
}

/// What a locomotion step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No movement requested, or nothing to move relative to
    Idle,
    /// An action was requested, which takes priority over movement
    Suppressed,
    /// Movement was requested but the candidate position collides
    Blocked,
    /// The avatar moved
    Moved,
}

impl MoveOutcome {
    /// Movement was requested this tick, whether or not it committed
    pub fn attempted(self) -> bool {
        matches!(self, MoveOutcome::Blocked | MoveOutcome::Moved)
    }
}

/// Result of one locomotion step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformDelta {
    /// Committed displacement; zero unless the avatar moved
    pub translation: Vec3,
    /// New heading, set only when a move committed
    pub yaw: Option<f32>,
    pub outcome: MoveOutcome,
}

impl TransformDelta {
    pub fn idle() -> Self {
        Self::unmoved(MoveOutcome::Idle)
    }

    pub fn suppressed() -> Self {
        Self::unmoved(MoveOutcome::Suppressed)
    }

    fn unmoved(outcome: MoveOutcome) -> Self {
        Self {
            translation: Vec3::ZERO,
            yaw: None,
            outcome,
        }
    }
}

/// Kinematic controller translating intent into transform changes
#[derive(Debug, Clone, Copy, Default)]
pub struct LocomotionController {
    config: LocomotionConfig,
}

impl LocomotionController {
    pub fn new(config: LocomotionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    /// Advance `transform` by one step of `intent`
    ///
    /// # Arguments
    /// * `transform` - Avatar transform, updated only if the move commits
    /// * `intent` - This tick's sampled intent
    /// * `camera_facing` - Camera look direction; the vertical part is ignored
    /// * `dt` - Time step in seconds
    /// * `world` - Footprint and collision queries
    pub fn step<W: World + ?Sized>(
        &self,
        transform: &mut Transform,
        intent: &Intent,
        camera_facing: Vec3,
        dt: f32,
        world: &W,
    ) -> TransformDelta {
        if intent.action.is_some() {
            return TransformDelta::suppressed();
        }
        if !dt.is_finite() || dt <= 0.0 {
            return TransformDelta::idle();
        }

        // Diagonals are no faster than a single axis
        let axes = intent.axes().clamp_length_max(1.0);
        if axes == Vec2::ZERO {
            return TransformDelta::idle();
        }

        let forward = Vec3::new(camera_facing.x, 0.0, camera_facing.z).normalize_or_zero();
        if forward == Vec3::ZERO {
            tracing::trace!(?camera_facing, "camera looks straight up or down, no ground heading");
            return TransformDelta::idle();
        }
        let right = forward.cross(Vec3::Y);

        let movement = (forward * axes.y + right * axes.x) * (self.config.speed * dt);
        if movement.length_squared() == 0.0 {
            return TransformDelta::idle();
        }

        let candidate = transform.position + movement;
        let blocked = world
            .avatar_footprint(candidate)
            .is_some_and(|footprint| world.would_collide(&footprint));
        if blocked {
            tracing::debug!(position = ?transform.position, ?candidate, "movement blocked");
            return TransformDelta::unmoved(MoveOutcome::Blocked);
        }

        let yaw = movement.x.atan2(movement.z);
        transform.position = candidate;
        transform.yaw = yaw;

        TransformDelta {
            translation: movement,
            yaw: Some(yaw),
            outcome: MoveOutcome::Moved,
        }
    }
}

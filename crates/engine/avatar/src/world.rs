//! Read-only world view consulted by locomotion
//!
//! The scene owns what other collaborators load asynchronously: the avatar
//! model footprint, the obstacle set and the camera. Until a piece arrives the
//! world answers conservatively in favour of movement.

use glam::Vec3;
use grove_physics::{Aabb, CollisionIndex, IndexKind, Obstacle};

use crate::error::{Error, Result};

/// Queries locomotion needs from the world each tick
pub trait World {
    /// Installed obstacles, empty until they are ready
    fn obstacles(&self) -> &[Obstacle];

    /// Avatar footprint placed at `at`, or `None` while the model is not loaded
    fn avatar_footprint(&self, at: Vec3) -> Option<Aabb>;

    /// Direction the camera looks in; only its ground-plane part is used
    fn camera_facing(&self) -> Vec3;

    /// Whether `footprint` overlaps any installed obstacle
    fn would_collide(&self, footprint: &Aabb) -> bool;
}

/// The concrete world for one avatar session
pub struct Scene {
    avatar_footprint: Option<Aabb>,
    camera_facing: Vec3,
    index_kind: IndexKind,
    index: Option<Box<dyn CollisionIndex>>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(IndexKind::default())
    }
}

impl Scene {
    /// Empty scene; the camera looks down -Z until told otherwise
    pub fn new(index_kind: IndexKind) -> Self {
        Self {
            avatar_footprint: None,
            camera_facing: Vec3::NEG_Z,
            index_kind,
            index: None,
        }
    }

    /// Mark the avatar model loaded with its local-space footprint
    pub fn set_avatar_footprint(&mut self, footprint: Aabb) {
        tracing::debug!(?footprint, "avatar model ready");
        self.avatar_footprint = Some(footprint);
    }

    pub fn model_ready(&self) -> bool {
        self.avatar_footprint.is_some()
    }

    pub fn set_camera_facing(&mut self, facing: Vec3) {
        self.camera_facing = facing;
    }

    /// Install the obstacle set
    ///
    /// Obstacles are static for the lifetime of the scene, so a second call
    /// is rejected.
    pub fn install_obstacles(&mut self, obstacles: Vec<Obstacle>) -> Result<()> {
        if self.index.is_some() {
            tracing::warn!(rejected = obstacles.len(), "obstacles already installed");
            return Err(Error::ObstaclesAlreadyInstalled);
        }
        tracing::info!(
            count = obstacles.len(),
            index = ?self.index_kind,
            "obstacles installed"
        );
        self.index = Some(self.index_kind.build(obstacles));
        Ok(())
    }

    pub fn obstacles_ready(&self) -> bool {
        self.index.is_some()
    }

    pub fn index_kind(&self) -> IndexKind {
        self.index_kind
    }
}

impl World for Scene {
    fn obstacles(&self) -> &[Obstacle] {
        match &self.index {
            Some(index) => index.obstacles(),
            None => &[],
        }
    }

    fn avatar_footprint(&self, at: Vec3) -> Option<Aabb> {
        self.avatar_footprint.map(|footprint| footprint.translated(at))
    }

    fn camera_facing(&self) -> Vec3 {
        self.camera_facing
    }

    fn would_collide(&self, footprint: &Aabb) -> bool {
        self.index
            .as_ref()
            .is_some_and(|index| index.would_collide(footprint))
    }
}

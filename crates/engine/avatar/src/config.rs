//! Avatar session configuration
//!
//! Loaded from a TOML file. Every section is optional and falls back to the
//! values the scene was tuned with.
//!
//! ```toml
//! spawn = [0.0, 0.0, 0.0]
//! seed = 42
//!
//! [locomotion]
//! speed = 150.0
//!
//! [animation]
//! crossfade_secs = 0.5
//!
//! [obstacles]
//! count = 80
//! index = "grid"
//! cell_size = 200.0
//! ```

use std::path::Path;

use animation::{AnimationClip, ClipName, DEFAULT_CROSSFADE_SECS};
use devices::DEFAULT_DEADZONE;
use glam::Vec3;
use grove_physics::{scatter_obstacles, Aabb, IndexKind, Obstacle, ScatterConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::locomotion::LocomotionConfig;
use crate::world::Scene;

/// Top-level configuration for one avatar session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarConfig {
    /// Where the avatar starts; obstacles keep clear of this point
    pub spawn: Vec3,
    /// Obstacle placement seed; a fresh one is drawn when absent
    pub seed: Option<u64>,
    pub locomotion: LocomotionConfig,
    pub input: InputConfig,
    pub animation: AnimationConfig,
    pub avatar: AvatarModelConfig,
    pub obstacles: ObstacleConfig,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            spawn: Vec3::ZERO,
            seed: None,
            locomotion: LocomotionConfig::default(),
            input: InputConfig::default(),
            animation: AnimationConfig::default(),
            avatar: AvatarModelConfig::default(),
            obstacles: ObstacleConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Per-axis thumbstick deadzone
    pub deadzone: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            deadzone: DEFAULT_DEADZONE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub crossfade_secs: f32,
    /// Clip timings the asset loader reports once each clip is ready
    pub clips: Vec<AnimationClip>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            crossfade_secs: DEFAULT_CROSSFADE_SECS,
            clips: vec![
                AnimationClip::new(ClipName::Idle, 2.0),
                AnimationClip::new(ClipName::Walk, 1.0),
                AnimationClip::new(ClipName::Attack1, 1.2),
                AnimationClip::new(ClipName::Attack2, 1.4),
                AnimationClip::new(ClipName::Defense, 1.0),
                AnimationClip::new(ClipName::Emote, 2.5),
                AnimationClip::new(ClipName::Kick, 1.1),
            ],
        }
    }
}

impl AnimationConfig {
    /// Configured timing for `name`, if listed
    pub fn clip(&self, name: ClipName) -> Option<AnimationClip> {
        self.clips.iter().copied().find(|clip| clip.name == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarModelConfig {
    /// Local bounds of the avatar mesh, origin at the feet
    pub footprint: Aabb,
}

impl Default for AvatarModelConfig {
    fn default() -> Self {
        Self {
            footprint: Aabb::grounded(25.0, 180.0, 15.0),
        }
    }
}

/// Collision index selection as written in config files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexChoice {
    #[default]
    Linear,
    Grid,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    #[serde(flatten)]
    pub scatter: ScatterConfig,
    /// Local bounds of the obstacle model
    pub footprint: Aabb,
    pub index: IndexChoice,
    /// Grid cell edge length; ignored by the linear index
    pub cell_size: f32,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            scatter: ScatterConfig::default(),
            footprint: Aabb::grounded(40.0, 500.0, 40.0),
            index: IndexChoice::Linear,
            cell_size: 200.0,
        }
    }
}

impl ObstacleConfig {
    pub fn index_kind(&self) -> IndexKind {
        match self.index {
            IndexChoice::Linear => IndexKind::Linear,
            IndexChoice::Grid => IndexKind::Grid {
                cell_size: self.cell_size,
            },
        }
    }
}

impl AvatarConfig {
    /// Load and validate a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(path = %path.display(), "loaded avatar config");
        Ok(config)
    }

    /// Parse and validate config text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the session cannot run with
    pub fn validate(&self) -> Result<()> {
        if !self.spawn.is_finite() {
            return Err(invalid(format!("spawn must be finite, got {}", self.spawn)));
        }
        let speed = self.locomotion.speed;
        if !speed.is_finite() || speed < 0.0 {
            return Err(invalid(format!("speed must be non-negative, got {speed}")));
        }
        let deadzone = self.input.deadzone;
        if !(0.0..1.0).contains(&deadzone) {
            return Err(invalid(format!("deadzone must be in [0, 1), got {deadzone}")));
        }
        let crossfade = self.animation.crossfade_secs;
        if !crossfade.is_finite() || crossfade < 0.0 {
            return Err(invalid(format!(
                "crossfade must be non-negative, got {crossfade}"
            )));
        }
        for clip in &self.animation.clips {
            if !clip.duration.is_finite() || clip.duration < 0.0 {
                return Err(invalid(format!(
                    "clip {} has invalid duration {}",
                    clip.name, clip.duration
                )));
            }
        }
        if !self.avatar.footprint.is_valid() {
            return Err(invalid("avatar footprint is malformed".into()));
        }
        if !self.obstacles.footprint.is_valid() {
            return Err(invalid("obstacle footprint is malformed".into()));
        }
        if self.obstacles.index == IndexChoice::Grid
            && (!self.obstacles.cell_size.is_finite() || self.obstacles.cell_size <= 0.0)
        {
            return Err(invalid(format!(
                "grid cell size must be positive, got {}",
                self.obstacles.cell_size
            )));
        }
        self.obstacles.scatter.validate()?;
        Ok(())
    }

    /// Configured seed, or a fresh one that is logged so the run can be replayed
    pub fn resolve_seed(&self) -> u64 {
        match self.seed {
            Some(seed) => seed,
            None => {
                let seed: u64 = rand::rng().random();
                tracing::info!(seed, "generated obstacle seed");
                seed
            }
        }
    }

    /// Scatter the configured obstacles deterministically from `seed`
    pub fn place_obstacles(&self, seed: u64) -> Result<Vec<Obstacle>> {
        let mut rng = StdRng::seed_from_u64(seed);
        let obstacles = scatter_obstacles(
            &self.obstacles.footprint,
            self.spawn,
            &self.obstacles.scatter,
            &mut rng,
        )?;
        Ok(obstacles)
    }

    /// Scene with the configured index kind and nothing loaded yet
    pub fn empty_scene(&self) -> Scene {
        Scene::new(self.obstacles.index_kind())
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidConfig(message)
}

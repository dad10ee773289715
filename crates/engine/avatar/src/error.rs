//! Error types for the avatar crate

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for avatar operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring or building an avatar session
///
/// Ticking a session never fails; everything here happens at construction.
#[derive(Debug, Error)]
pub enum Error {
    /// Config file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`crate::AvatarConfig`]
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config values are out of range
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Building the collision world failed
    #[error("Physics error: {0}")]
    Physics(#[from] grove_physics::Error),

    /// The obstacle set is fixed once installed
    #[error("Obstacles are already installed")]
    ObstaclesAlreadyInstalled,
}

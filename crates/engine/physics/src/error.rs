//! Error types for the physics crate

use thiserror::Error;

/// Result type alias for physics operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building the static collision world
#[derive(Debug, Error)]
pub enum Error {
    /// Scatter parameters can never be satisfied
    #[error("Invalid scatter configuration: {0}")]
    InvalidScatter(String),

    /// An instance could not be placed within its retry budget
    #[error("Could not place obstacle {instance} outside the exclusion radius after {attempts} attempts")]
    PlacementExhausted { instance: usize, attempts: u32 },
}

//! Avatar controller for Grove
//!
//! Ties input, locomotion, collision and animation together for a single
//! avatar walking among static obstacles.
//!
//! # Modules
//!
//! - [`config`]: TOML configuration and obstacle placement
//! - [`world`]: The [`World`] view locomotion consults, and the concrete [`Scene`]
//! - [`locomotion`]: Camera-relative movement with all-or-nothing collision
//! - [`driver`]: [`FrameDriver`], which runs one tick per display frame
//!
//! ```rust
//! use animation::{AnimationClip, ClipName};
//! use grove_avatar::{FrameDriver, LocomotionController, Session};
//!
//! let mut driver: FrameDriver = FrameDriver::new(Session::default(), LocomotionController::default());
//! let library = driver.session_mut().animation.library_mut();
//! library.insert(AnimationClip::new(ClipName::Idle, 2.0));
//! library.insert(AnimationClip::new(ClipName::Walk, 1.0));
//!
//! driver.session_mut().input.key_down("w");
//! let output = driver.tick(1.0 / 60.0);
//! assert_eq!(output.active, Some(ClipName::Walk));
//! ```

pub mod config;
pub mod driver;
mod error;
pub mod locomotion;
mod session;
mod stats;
mod transform;
pub mod world;

pub use config::AvatarConfig;
pub use driver::{action_clip, FrameDriver, FrameOutput};
pub use error::{Error, Result};
pub use locomotion::{LocomotionConfig, LocomotionController, MoveOutcome, TransformDelta};
pub use session::Session;
pub use stats::FrameStats;
pub use transform::Transform;
pub use world::{Scene, World};

//! Input device abstractions for Grove
//!
//! # Modules
//!
//! - [`keyboard`]: Held-key tracking for desk mode
//! - [`tracked`]: Tracked (VR) controller state and deadzone processing
//! - [`backend`]: Controller backend trait for platform-specific implementations
//! - [`intent`]: The normalized per-tick [`Intent`]
//! - [`sampler`]: [`InputSampler`], which turns the live source into an intent

pub mod backend;
pub mod intent;
pub mod keyboard;
pub mod sampler;
pub mod tracked;

// Re-export commonly used types at crate root
pub use backend::{ControllerBackend, ManualBackend, NullBackend};
pub use intent::{Action, Intent};
pub use keyboard::{Key, KeyboardState};
pub use sampler::{InputMode, InputSampler, InputSource};
pub use tracked::{ControllerInfo, ControllerMapping, TrackedControllerState, DEFAULT_DEADZONE};

//! Avatar animation for Grove
//!
//! Clips arrive asynchronously from the asset loader and are registered in a
//! [`ClipLibrary`]. The [`AnimationStateMachine`] keeps one clip active, blends
//! transitions over a fixed crossfade window and reports per-clip weights for
//! the renderer's mixer.
//!
//! ```rust
//! use animation::{AnimationClip, AnimationStateMachine, ClipName, Transition};
//!
//! let mut machine = AnimationStateMachine::default();
//! machine.library_mut().insert(AnimationClip::new(ClipName::Idle, 2.0));
//! machine.library_mut().insert(AnimationClip::new(ClipName::Walk, 1.0));
//!
//! machine.advance(0.0); // enters idle
//! assert_eq!(machine.transition(ClipName::Walk), Transition::Started);
//! assert_eq!(machine.transition(ClipName::Walk), Transition::AlreadyActive);
//! ```

mod clip;
mod playback;
mod state_machine;

pub use clip::{AnimationClip, ClipLibrary, ClipName, UnknownClip};
pub use playback::ClipPlayback;
pub use state_machine::{AnimationStateMachine, ClipWeight, Transition, DEFAULT_CROSSFADE_SECS};

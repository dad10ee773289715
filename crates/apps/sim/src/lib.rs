//! Headless harness for Grove avatar sessions
//!
//! Replays a [`Script`] of host events against a frame driver so locomotion,
//! collision and animation can be exercised without a browser or headset.

pub mod harness;
pub mod script;

pub use harness::{SimReport, Simulation};
pub use script::{Event, Script, ScriptEvent};

//! Input sampling
//!
//! The sampler folds whichever input source is authoritative this tick into
//! an [`Intent`]. Keyboard bookkeeping happens through [`InputSampler::key_down`]
//! and [`InputSampler::key_up`], which hosts call from their event callbacks;
//! tracked controllers are polled inside [`InputSampler::sample`].

use glam::Vec2;

use crate::backend::{ControllerBackend, NullBackend};
use crate::intent::{Action, Intent};
use crate::keyboard::{Key, KeyboardState};
use crate::tracked::DEFAULT_DEADZONE;

/// Which input family is authoritative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Keyboard at a desk
    #[default]
    Desk,
    /// Motion controllers during a VR presentation session
    Tracked,
}

/// Snapshot of the authoritative input source for one tick
#[derive(Debug, Clone, Copy)]
pub enum InputSource<'a> {
    Keyboard(&'a KeyboardState),
    /// Deadzoned thumbstick axes, raw device orientation (forward is negative Y)
    TrackedController(Vec2),
}

impl InputSource<'_> {
    /// Convert the snapshot to an intent
    pub fn to_intent(&self) -> Intent {
        match self {
            InputSource::Keyboard(keyboard) => {
                let forward = keyboard.axis(Key::W, Key::S);
                let right = keyboard.axis(Key::D, Key::A);
                let action = keyboard
                    .most_recent(Action::ALL.map(Action::key))
                    .and_then(Action::from_key);
                Intent::new(forward, right, action)
            }
            InputSource::TrackedController(stick) => Intent::new(-stick.y, stick.x, None),
        }
    }
}

/// Polled input sampler
pub struct InputSampler {
    keyboard: KeyboardState,
    backend: Box<dyn ControllerBackend>,
    mode: InputMode,
    deadzone: f32,
}

impl Default for InputSampler {
    fn default() -> Self {
        Self::new(Box::new(NullBackend::new()))
    }
}

impl InputSampler {
    /// Create a sampler in desk mode over the given controller backend
    pub fn new(backend: Box<dyn ControllerBackend>) -> Self {
        Self {
            keyboard: KeyboardState::new(),
            backend,
            mode: InputMode::Desk,
            deadzone: DEFAULT_DEADZONE,
        }
    }

    /// Override the thumbstick deadzone
    pub fn with_deadzone(mut self, deadzone: f32) -> Self {
        self.set_deadzone(deadzone);
        self
    }

    pub fn deadzone(&self) -> f32 {
        self.deadzone
    }

    pub fn set_deadzone(&mut self, deadzone: f32) {
        self.deadzone = deadzone.clamp(0.0, 0.9);
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Switch source according to whether a VR presentation session is active
    pub fn set_presenting(&mut self, presenting: bool) {
        let mode = if presenting {
            InputMode::Tracked
        } else {
            InputMode::Desk
        };
        if mode != self.mode {
            tracing::debug!(?mode, "input mode changed");
            self.mode = mode;
        }
    }

    /// Key-down callback; names outside the desk vocabulary are ignored
    pub fn key_down(&mut self, name: &str) {
        if let Some(key) = Key::from_name(name) {
            self.keyboard.press(key);
        }
    }

    /// Key-up callback; names outside the desk vocabulary are ignored
    pub fn key_up(&mut self, name: &str) {
        if let Some(key) = Key::from_name(name) {
            self.keyboard.release(key);
        }
    }

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    pub fn keyboard_mut(&mut self) -> &mut KeyboardState {
        &mut self.keyboard
    }

    pub fn backend_mut(&mut self) -> &mut dyn ControllerBackend {
        self.backend.as_mut()
    }

    /// Produce this tick's intent from the authoritative source
    pub fn sample(&mut self) -> Intent {
        let intent = match self.mode {
            InputMode::Desk => InputSource::Keyboard(&self.keyboard).to_intent(),
            InputMode::Tracked => {
                self.backend.poll();
                let stick = self
                    .backend
                    .locomotion_controller()
                    .map(|controller| controller.thumbstick(self.deadzone))
                    .unwrap_or(Vec2::ZERO);
                InputSource::TrackedController(stick).to_intent()
            }
        };
        tracing::trace!(?intent, mode = ?self.mode, "sampled input");
        intent
    }
}

//! Per-tick locomotion intent
//!
//! An [`Intent`] is what the rest of the engine sees of the player's input:
//! a planar movement request and at most one discrete action.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::keyboard::Key;

/// One-shot actions the avatar can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Attack1,
    Attack2,
    Defense,
    Emote,
    Kick,
}

impl Action {
    /// Every action, in desk key order
    pub const ALL: [Action; 5] = [
        Action::Attack1,
        Action::Attack2,
        Action::Defense,
        Action::Emote,
        Action::Kick,
    ];

    /// Desk key bound to this action
    pub fn key(self) -> Key {
        match self {
            Action::Attack1 => Key::F,
            Action::Attack2 => Key::Shift,
            Action::Defense => Key::Q,
            Action::Emote => Key::E,
            Action::Kick => Key::Space,
        }
    }

    /// Action bound to a desk key, if any
    pub fn from_key(key: Key) -> Option<Action> {
        Action::ALL.into_iter().find(|action| action.key() == key)
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::Attack1 => "attack1",
            Action::Attack2 => "attack2",
            Action::Defense => "defense",
            Action::Emote => "emote",
            Action::Kick => "kick",
        }
    }
}

/// Normalized input for a single tick
///
/// Axes are always within [-1, 1]; `forward` is positive when the player asks
/// to move away from the camera and `right` is positive towards camera right.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Intent {
    pub forward: f32,
    pub right: f32,
    pub action: Option<Action>,
}

impl Intent {
    /// Build an intent, clamping both axes
    pub fn new(forward: f32, right: f32, action: Option<Action>) -> Self {
        Self {
            forward: sanitize_axis(forward),
            right: sanitize_axis(right),
            action,
        }
    }

    /// Intent with movement only
    pub fn movement(forward: f32, right: f32) -> Self {
        Self::new(forward, right, None)
    }

    /// Intent with an action only
    pub fn action(action: Action) -> Self {
        Self::new(0.0, 0.0, Some(action))
    }

    /// Planar axes as `(right, forward)`
    pub fn axes(&self) -> Vec2 {
        Vec2::new(self.right, self.forward)
    }

    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// Whether any movement axis is non-zero
    pub fn has_movement(&self) -> bool {
        self.forward != 0.0 || self.right != 0.0
    }

    /// No movement and no action
    pub fn is_idle(&self) -> bool {
        !self.has_movement() && !self.has_action()
    }
}

/// Clamp an axis to [-1, 1]; NaN reads as rest
fn sanitize_axis(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

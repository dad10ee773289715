//! Keyboard input abstraction
//!
//! Desk-mode locomotion only cares about a handful of keys. Key-down and key-up
//! events arrive from the windowing layer outside the frame loop and are folded
//! into a held-key set here; the sampler reads that set once per tick.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Keys understood by the desk input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Key {
    // Movement
    W,
    A,
    S,
    D,

    // Actions
    F,
    Shift,
    Q,
    E,
    Space,
}

impl Key {
    /// Every key in the desk vocabulary
    pub const ALL: [Key; 9] = [
        Key::W,
        Key::A,
        Key::S,
        Key::D,
        Key::F,
        Key::Shift,
        Key::Q,
        Key::E,
        Key::Space,
    ];

    /// Map a browser-style key name to a key
    ///
    /// Names are matched case-insensitively, so `"W"` (shift held) and `"w"`
    /// resolve to the same key. A literal `" "` is accepted for space.
    pub fn from_name(name: &str) -> Option<Key> {
        if name == " " {
            return Some(Key::Space);
        }

        match name.trim().to_ascii_lowercase().as_str() {
            "w" => Some(Key::W),
            "a" => Some(Key::A),
            "s" => Some(Key::S),
            "d" => Some(Key::D),
            "f" => Some(Key::F),
            "shift" => Some(Key::Shift),
            "q" => Some(Key::Q),
            "e" => Some(Key::E),
            "space" => Some(Key::Space),
            _ => None,
        }
    }

    /// Canonical lowercase name
    pub fn name(self) -> &'static str {
        match self {
            Key::W => "w",
            Key::A => "a",
            Key::S => "s",
            Key::D => "d",
            Key::F => "f",
            Key::Shift => "shift",
            Key::Q => "q",
            Key::E => "e",
            Key::Space => "space",
        }
    }
}

/// Keyboard state tracker
///
/// Tracks which keys are held and the order in which they went down, so that
/// callers can resolve "last pressed wins" between competing keys.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    /// Held keys, stamped with the press sequence number
    pressed: HashMap<Key, u64>,
    /// Next press sequence number
    next_stamp: u64,
}

impl KeyboardState {
    /// Create a new keyboard state with no keys pressed
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press event
    ///
    /// Auto-repeat presses of a key that is already held keep the first stamp.
    pub fn press(&mut self, key: Key) {
        if !self.pressed.contains_key(&key) {
            self.pressed.insert(key, self.next_stamp);
            self.next_stamp += 1;
        }
    }

    /// Record a key release event
    pub fn release(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    /// Check if a key is currently pressed
    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains_key(&key)
    }

    /// Signed axis from an opposed key pair: +1, -1 or 0 when both or neither are held
    pub fn axis(&self, positive: Key, negative: Key) -> f32 {
        let mut value = 0.0;
        if self.is_pressed(positive) {
            value += 1.0;
        }
        if self.is_pressed(negative) {
            value -= 1.0;
        }
        value
    }

    /// The most recently pressed key among `candidates` that is still held
    pub fn most_recent<I>(&self, candidates: I) -> Option<Key>
    where
        I: IntoIterator<Item = Key>,
    {
        candidates
            .into_iter()
            .filter_map(|key| self.pressed.get(&key).map(|stamp| (*stamp, key)))
            .max_by_key(|(stamp, _)| *stamp)
            .map(|(_, key)| key)
    }

    /// Get the number of currently pressed keys
    pub fn pressed_count(&self) -> usize {
        self.pressed.len()
    }

    /// Check if any key is currently pressed
    pub fn any_pressed(&self) -> bool {
        !self.pressed.is_empty()
    }

    /// Release every key, e.g. when the window loses focus
    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}

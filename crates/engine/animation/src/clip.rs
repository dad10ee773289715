//! Clip vocabulary and the library of loaded clips

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Names of every clip an avatar can play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipName {
    Idle,
    Walk,
    Attack1,
    Attack2,
    Defense,
    Emote,
    Kick,
}

impl ClipName {
    pub const ALL: [ClipName; 7] = [
        ClipName::Idle,
        ClipName::Walk,
        ClipName::Attack1,
        ClipName::Attack2,
        ClipName::Defense,
        ClipName::Emote,
        ClipName::Kick,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ClipName::Idle => "idle",
            ClipName::Walk => "walk",
            ClipName::Attack1 => "attack1",
            ClipName::Attack2 => "attack2",
            ClipName::Defense => "defense",
            ClipName::Emote => "emote",
            ClipName::Kick => "kick",
        }
    }

    /// Locomotion cycles loop; actions play once
    pub fn loops_by_default(self) -> bool {
        matches!(self, ClipName::Idle | ClipName::Walk)
    }
}

impl fmt::Display for ClipName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not in the clip vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown clip name: {0}")]
pub struct UnknownClip(pub String);

impl FromStr for ClipName {
    type Err = UnknownClip;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClipName::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownClip(s.to_string()))
    }
}

/// A loaded clip: a finite, time-indexed pose sequence
///
/// Pose data stays with the renderer; the state machine only needs timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    pub name: ClipName,
    /// Intrinsic duration in seconds
    pub duration: f32,
    pub looping: bool,
}

impl AnimationClip {
    /// Clip with the default looping behaviour for its name
    pub fn new(name: ClipName, duration: f32) -> Self {
        Self {
            name,
            duration,
            looping: name.loops_by_default(),
        }
    }

    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }
}

/// Clips that have finished loading
///
/// The asset collaborator inserts clips as they arrive, in any order. A name
/// that is absent is simply "not ready yet".
#[derive(Debug, Clone, Default)]
pub struct ClipLibrary {
    clips: HashMap<ClipName, AnimationClip>,
}

impl ClipLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a loaded clip, replacing any earlier clip with the same name
    pub fn insert(&mut self, clip: AnimationClip) {
        tracing::debug!(clip = %clip.name, duration = clip.duration, "clip ready");
        self.clips.insert(clip.name, clip);
    }

    pub fn get(&self, name: ClipName) -> Option<&AnimationClip> {
        self.clips.get(&name)
    }

    pub fn is_ready(&self, name: ClipName) -> bool {
        self.clips.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Whether every clip in the vocabulary is loaded
    pub fn is_complete(&self) -> bool {
        ClipName::ALL.iter().all(|name| self.is_ready(*name))
    }
}

impl FromIterator<AnimationClip> for ClipLibrary {
    fn from_iter<T: IntoIterator<Item = AnimationClip>>(iter: T) -> Self {
        let mut library = ClipLibrary::new();
        for clip in iter {
            library.insert(clip);
        }
        library
    }
}

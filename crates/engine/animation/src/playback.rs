//! Playback clock for a single clip

use crate::clip::{AnimationClip, ClipName};

/// A clip being played
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPlayback {
    clip: AnimationClip,
    time: f32,
    finished: bool,
}

impl ClipPlayback {
    /// Start `clip` from its beginning
    pub fn start(clip: AnimationClip) -> Self {
        Self {
            clip,
            time: 0.0,
            finished: false,
        }
    }

    pub fn name(&self) -> ClipName {
        self.clip.name
    }

    pub fn clip(&self) -> &AnimationClip {
        &self.clip
    }

    /// Local time in seconds, within `[0, duration]`
    pub fn time(&self) -> f32 {
        self.time
    }

    /// A one-shot clip that has reached its end; looping clips never finish
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance the clock by `dt` seconds
    ///
    /// Looping clips wrap; one-shot clips hold their last pose.
    pub fn advance(&mut self, dt: f32) {
        if self.finished || dt <= 0.0 {
            return;
        }

        let duration = self.clip.duration;
        if duration <= 0.0 {
            self.time = 0.0;
            self.finished = !self.clip.looping;
            return;
        }

        let next = self.time + dt;
        if self.clip.looping {
            self.time = next.rem_euclid(duration);
        } else if next >= duration {
            self.time = duration;
            self.finished = true;
        } else {
            self.time = next;
        }
    }
}

use animation::Transition;

use crate::locomotion::{MoveOutcome, TransformDelta};

/// Running counters for a frame driver
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub frames: u64,
    pub simulated_secs: f64,
    pub moves: u64,
    pub blocked: u64,
    pub suppressed: u64,
    /// Transitions that actually started a clip
    pub transitions: u64,
}

impl FrameStats {
    pub fn record(&mut self, dt: f32, delta: &TransformDelta, transition: Transition) {
        self.frames += 1;
        self.simulated_secs += f64::from(dt);
        match delta.outcome {
            MoveOutcome::Moved => self.moves += 1,
            MoveOutcome::Blocked => self.blocked += 1,
            MoveOutcome::Suppressed => self.suppressed += 1,
            MoveOutcome::Idle => {}
        }
        if transition == Transition::Started {
            self.transitions += 1;
        }
    }
}

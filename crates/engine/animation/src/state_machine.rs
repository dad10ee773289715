//! Crossfading animation state machine
//!
//! Exactly one clip is active. A transition starts the target from its first
//! frame and fades the previously active clip out over a fixed window; while
//! the window is open both clips play and their weights sum to one.

use crate::clip::{ClipLibrary, ClipName};
use crate::playback::ClipPlayback;

/// Default crossfade window in seconds
pub const DEFAULT_CROSSFADE_SECS: f32 = 0.5;

/// What a transition request did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Target started, crossfading from the previous clip if there was one
    Started,
    /// Target is already the active clip; nothing changed
    AlreadyActive,
    /// Target clip has not loaded yet; nothing changed
    Unavailable,
}

/// Influence of one playing clip, as consumed by the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipWeight {
    pub clip: ClipName,
    pub weight: f32,
    /// Local playback time in seconds
    pub time: f32,
}

/// Outgoing clip of an in-flight crossfade
#[derive(Debug, Clone, Copy)]
struct Crossfade {
    outgoing: ClipPlayback,
    elapsed: f32,
}

/// Animation state for one avatar
#[derive(Debug, Clone)]
pub struct AnimationStateMachine {
    library: ClipLibrary,
    active: Option<ClipPlayback>,
    fade: Option<Crossfade>,
    crossfade_secs: f32,
}

impl Default for AnimationStateMachine {
    fn default() -> Self {
        Self::new(DEFAULT_CROSSFADE_SECS)
    }
}

impl AnimationStateMachine {
    /// Create a state machine with an empty library
    ///
    /// Negative or non-finite windows are treated as an instant switch.
    pub fn new(crossfade_secs: f32) -> Self {
        let crossfade_secs = if crossfade_secs.is_finite() {
            crossfade_secs.max(0.0)
        } else {
            0.0
        };
        Self {
            library: ClipLibrary::new(),
            active: None,
            fade: None,
            crossfade_secs,
        }
    }

    pub fn with_library(mut self, library: ClipLibrary) -> Self {
        self.library = library;
        self
    }

    pub fn library(&self) -> &ClipLibrary {
        &self.library
    }

    /// Mutable library access for the asset collaborator
    pub fn library_mut(&mut self) -> &mut ClipLibrary {
        &mut self.library
    }

    pub fn crossfade_secs(&self) -> f32 {
        self.crossfade_secs
    }

    /// Active clip, or `None` during the initial loading grace period
    pub fn active(&self) -> Option<ClipName> {
        self.active.as_ref().map(ClipPlayback::name)
    }

    /// Clip being faded out, only while a crossfade is in flight
    pub fn previous(&self) -> Option<ClipName> {
        self.fade.as_ref().map(|fade| fade.outgoing.name())
    }

    pub fn active_playback(&self) -> Option<&ClipPlayback> {
        self.active.as_ref()
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Whether the active clip is a one-shot that has played to its end
    pub fn active_finished(&self) -> bool {
        self.active.as_ref().is_some_and(ClipPlayback::is_finished)
    }

    /// Request `target` as the active clip
    ///
    /// Re-requesting the active clip is a no-op, so callers may issue the same
    /// request every tick. A request for a clip that has not loaded is ignored.
    pub fn transition(&mut self, target: ClipName) -> Transition {
        self.enter_initial_idle();

        if self.active() == Some(target) {
            return Transition::AlreadyActive;
        }

        let Some(clip) = self.library.get(target).copied() else {
            tracing::trace!(clip = %target, "transition skipped, clip not loaded");
            return Transition::Unavailable;
        };

        let incoming = ClipPlayback::start(clip);
        let outgoing = self.active.replace(incoming);

        // A fade that was still running loses its outgoing clip here; only the
        // clip that was active keeps playing while it fades out.
        self.fade = match outgoing {
            Some(outgoing) if self.crossfade_secs > 0.0 => Some(Crossfade {
                outgoing,
                elapsed: 0.0,
            }),
            _ => None,
        };

        tracing::debug!(
            from = ?outgoing.map(|p| p.name()),
            to = %target,
            "animation transition"
        );
        Transition::Started
    }

    /// Advance playback by `dt` seconds
    ///
    /// Enters `idle` as soon as it is available if nothing is playing yet, then
    /// moves every playing clock forward and closes a finished crossfade.
    pub fn advance(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.enter_initial_idle();

        if let Some(active) = self.active.as_mut() {
            active.advance(dt);
        }

        if let Some(fade) = self.fade.as_mut() {
            fade.outgoing.advance(dt);
            fade.elapsed += dt;
            if fade.elapsed >= self.crossfade_secs {
                tracing::trace!(clip = %fade.outgoing.name(), "crossfade complete");
                self.fade = None;
            }
        }
    }

    /// Start `idle` without a fade if nothing is playing and it has loaded
    fn enter_initial_idle(&mut self) {
        if self.active.is_some() {
            return;
        }
        if let Some(idle) = self.library.get(ClipName::Idle).copied() {
            tracing::debug!("idle clip ready, entering initial state");
            self.active = Some(ClipPlayback::start(idle));
        }
    }

    /// Progress of the in-flight crossfade in `[0, 1)`, or `None` when settled
    pub fn fade_progress(&self) -> Option<f32> {
        self.fade
            .as_ref()
            .map(|fade| (fade.elapsed / self.crossfade_secs).clamp(0.0, 1.0))
    }

    /// Weights of every playing clip, outgoing first
    ///
    /// Empty while nothing plays, one entry at weight 1 when settled, and two
    /// entries summing to 1 during a crossfade.
    pub fn weights(&self) -> Vec<ClipWeight> {
        let Some(active) = self.active.as_ref() else {
            return Vec::new();
        };

        match (self.fade.as_ref(), self.fade_progress()) {
            (Some(fade), Some(progress)) => vec![
                ClipWeight {
                    clip: fade.outgoing.name(),
                    weight: 1.0 - progress,
                    time: fade.outgoing.time(),
                },
                ClipWeight {
                    clip: active.name(),
                    weight: progress,
                    time: active.time(),
                },
            ],
            _ => vec![ClipWeight {
                clip: active.name(),
                weight: 1.0,
                time: active.time(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::AnimationClip;

    fn loaded() -> AnimationStateMachine {
        let library = ClipName::ALL
            .into_iter()
            .map(|name| AnimationClip::new(name, 1.0))
            .collect();
        let mut machine = AnimationStateMachine::default().with_library(library);
        machine.advance(0.0);
        machine
    }

    fn nonzero(weights: &[ClipWeight]) -> usize {
        weights.iter().filter(|w| w.weight > 0.0).count()
    }

    #[test]
    fn test_grace_period_plays_nothing() {
        let mut machine = AnimationStateMachine::default();
        machine.advance(0.1);
        assert_eq!(machine.active(), None);
        assert!(machine.weights().is_empty());
        assert_eq!(machine.transition(ClipName::Walk), Transition::Unavailable);

        machine.library_mut().insert(AnimationClip::new(ClipName::Idle, 2.0));
        machine.advance(0.1);
        assert_eq!(machine.active(), Some(ClipName::Idle));
        assert!(!machine.is_fading());
        assert_eq!(machine.weights().len(), 1);
        assert_eq!(machine.weights()[0].weight, 1.0);
    }

    #[test]
    fn test_first_clip_without_idle_starts_at_full_weight() {
        let mut machine = AnimationStateMachine::default();
        machine.library_mut().insert(AnimationClip::new(ClipName::Walk, 1.0));

        assert_eq!(machine.transition(ClipName::Walk), Transition::Started);
        assert!(!machine.is_fading());
        assert_eq!(machine.previous(), None);
        assert_eq!(machine.weights()[0].weight, 1.0);
    }

    #[test]
    fn test_transition_enters_idle_before_first_target() {
        let mut machine = AnimationStateMachine::default();
        machine.library_mut().insert(AnimationClip::new(ClipName::Idle, 2.0));
        machine.library_mut().insert(AnimationClip::new(ClipName::Walk, 1.0));

        assert_eq!(machine.transition(ClipName::Walk), Transition::Started);
        assert_eq!(machine.active(), Some(ClipName::Walk));
        assert_eq!(machine.previous(), Some(ClipName::Idle));

        machine.advance(0.1);
        let weights = machine.weights();
        assert_eq!(nonzero(&weights), 2);
        assert_eq!(weights[0].clip, ClipName::Idle);
        assert_eq!(weights[1].clip, ClipName::Walk);
    }

    #[test]
    fn test_transition_to_idle_on_first_request_is_already_active() {
        let mut machine = AnimationStateMachine::default();
        machine.library_mut().insert(AnimationClip::new(ClipName::Idle, 2.0));

        assert_eq!(machine.transition(ClipName::Idle), Transition::AlreadyActive);
        assert_eq!(machine.active(), Some(ClipName::Idle));
        assert!(!machine.is_fading());
    }

    #[test]
    fn test_transition_is_idempotent() {
        let mut machine = loaded();
        assert_eq!(machine.transition(ClipName::Walk), Transition::Started);
        machine.advance(0.2);

        let time_before = machine.active_playback().unwrap().time();
        let progress_before = machine.fade_progress();

        assert_eq!(machine.transition(ClipName::Walk), Transition::AlreadyActive);
        assert_eq!(machine.transition(ClipName::Walk), Transition::AlreadyActive);

        assert_eq!(machine.active(), Some(ClipName::Walk));
        assert_eq!(machine.previous(), Some(ClipName::Idle));
        assert_eq!(machine.active_playback().unwrap().time(), time_before);
        assert_eq!(machine.fade_progress(), progress_before);
    }

    #[test]
    fn test_crossfade_bounds() {
        let mut machine = loaded();
        machine.transition(ClipName::Walk);

        for _ in 0..4 {
            machine.advance(0.1);
            let weights = machine.weights();
            assert_eq!(nonzero(&weights), 2);
            let total: f32 = weights.iter().map(|w| w.weight).sum();
            assert!((total - 1.0).abs() < 1e-5);
            assert_eq!(weights[0].clip, ClipName::Idle);
            assert_eq!(weights[1].clip, ClipName::Walk);
        }

        machine.advance(0.1);
        let weights = machine.weights();
        assert_eq!(weights.len(), 1);
        assert_eq!(weights[0].clip, ClipName::Walk);
        assert_eq!(weights[0].weight, 1.0);
        assert_eq!(machine.previous(), None);
    }

    #[test]
    fn test_target_restarts_from_beginning() {
        let mut machine = loaded();
        machine.transition(ClipName::Walk);
        machine.advance(0.7);
        machine.transition(ClipName::Idle);
        assert_eq!(machine.active_playback().unwrap().time(), 0.0);
        assert_eq!(machine.previous(), Some(ClipName::Walk));
    }

    #[test]
    fn test_interrupted_fade_keeps_two_clips() {
        let mut machine = loaded();
        machine.transition(ClipName::Walk);
        machine.advance(0.2);
        machine.transition(ClipName::Kick);
        machine.advance(0.1);

        let weights = machine.weights();
        assert_eq!(weights.len(), 2);
        assert_eq!(weights[0].clip, ClipName::Walk);
        assert_eq!(weights[1].clip, ClipName::Kick);
    }

    #[test]
    fn test_zero_window_switches_instantly() {
        let library = ClipName::ALL
            .into_iter()
            .map(|name| AnimationClip::new(name, 1.0))
            .collect();
        let mut machine = AnimationStateMachine::new(0.0).with_library(library);
        machine.advance(0.0);
        machine.transition(ClipName::Walk);
        assert!(!machine.is_fading());
        assert_eq!(machine.weights().len(), 1);
    }

    #[test]
    fn test_one_shot_reports_finished() {
        let mut machine = loaded();
        machine.transition(ClipName::Attack1);
        machine.advance(0.5);
        assert!(!machine.active_finished());
        machine.advance(0.6);
        assert!(machine.active_finished());
        // Hand-off back to locomotion is the caller's decision
        assert_eq!(machine.active(), Some(ClipName::Attack1));
    }
}

//! Per-frame orchestration
//!
//! One tick samples input, resolves the priority between actions and
//! locomotion, requests the matching clip and advances animation. Ticks are
//! total: nothing in here fails.

use animation::{AnimationStateMachine, ClipName, ClipWeight};
use devices::{Action, ControllerBackend, InputSampler, Intent};

use crate::config::AvatarConfig;
use crate::locomotion::{LocomotionController, TransformDelta};
use crate::session::Session;
use crate::stats::FrameStats;
use crate::transform::Transform;
use crate::world::{Scene, World};

/// Clip played for an action
pub fn action_clip(action: Action) -> ClipName {
    match action {
        Action::Attack1 => ClipName::Attack1,
        Action::Attack2 => ClipName::Attack2,
        Action::Defense => ClipName::Defense,
        Action::Emote => ClipName::Emote,
        Action::Kick => ClipName::Kick,
    }
}

/// What one tick produced, for the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    pub intent: Intent,
    pub transform: Transform,
    pub delta: TransformDelta,
    /// Active clip after the tick
    pub active: Option<ClipName>,
    /// Playing clips with their blend weights
    pub clips: Vec<ClipWeight>,
}

/// Drives one avatar session at the display refresh rate
pub struct FrameDriver<W: World = Scene> {
    session: Session<W>,
    locomotion: LocomotionController,
    stats: FrameStats,
}

impl<W: World> FrameDriver<W> {
    pub fn new(session: Session<W>, locomotion: LocomotionController) -> Self {
        Self {
            session,
            locomotion,
            stats: FrameStats::default(),
        }
    }

    /// Build a driver from validated configuration
    ///
    /// Clips are not registered here; they arrive through
    /// [`AnimationStateMachine::library_mut`] as the asset loader finishes.
    pub fn from_config(
        config: &AvatarConfig,
        world: W,
        backend: Box<dyn ControllerBackend>,
    ) -> Self {
        let input = InputSampler::new(backend).with_deadzone(config.input.deadzone);
        let animation = AnimationStateMachine::new(config.animation.crossfade_secs);
        let session = Session::new(Transform::at(config.spawn), input, animation, world);
        Self::new(session, LocomotionController::new(config.locomotion))
    }

    pub fn session(&self) -> &Session<W> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<W> {
        &mut self.session
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Run one frame of `dt` seconds
    ///
    /// Negative or non-finite `dt` is treated as zero.
    pub fn tick(&mut self, dt: f32) -> FrameOutput {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let session = &mut self.session;

        let intent = session.input.sample();

        let (delta, target) = match intent.action {
            // Actions take priority and hold the avatar in place
            Some(action) => (TransformDelta::suppressed(), action_clip(action)),
            None => {
                let facing = session.world.camera_facing();
                let delta = self.locomotion.step(
                    &mut session.transform,
                    &intent,
                    facing,
                    dt,
                    &session.world,
                );
                let target = if delta.outcome.attempted() {
                    ClipName::Walk
                } else {
                    ClipName::Idle
                };
                (delta, target)
            }
        };

        let transition = session.animation.transition(target);
        session.animation.advance(dt);
        self.stats.record(dt, &delta, transition);

        tracing::trace!(
            frame = self.stats.frames,
            outcome = ?delta.outcome,
            clip = %target,
            ?transition,
            "tick"
        );

        FrameOutput {
            intent,
            transform: session.transform,
            delta,
            active: session.animation.active(),
            clips: session.animation.weights(),
        }
    }
}

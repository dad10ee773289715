//! Runs a frame driver against a script

use animation::{ClipName, ClipWeight};
use anyhow::{anyhow, Context, Result};
use devices::{ControllerBackend, ManualBackend, TrackedControllerState};
use grove_avatar::{AvatarConfig, FrameDriver, FrameOutput, FrameStats, Transform};

use crate::script::{Event, Script, ScriptEvent};

/// Frames between periodic stats lines
const STATS_INTERVAL: u64 = 60;

/// Controller id of the single simulated VR hand
const LOCOMOTION_HAND: usize = 0;

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq)]
pub struct SimReport {
    pub seed: u64,
    pub transform: Transform,
    pub active: Option<ClipName>,
    pub clips: Vec<ClipWeight>,
    pub stats: FrameStats,
}

/// A scripted avatar session
pub struct Simulation {
    config: AvatarConfig,
    seed: u64,
    driver: FrameDriver,
    events: Vec<ScriptEvent>,
    cursor: usize,
    frame: u64,
}

impl Simulation {
    /// Build a session from validated config
    ///
    /// `seed` overrides the configured obstacle seed.
    pub fn new(config: AvatarConfig, script: Script, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| config.resolve_seed());

        let mut backend = ManualBackend::new();
        backend.connect("Left Hand", TrackedControllerState::xr_standard());

        let driver = FrameDriver::from_config(&config, config.empty_scene(), Box::new(backend));

        let mut script = script;
        script.sort();

        Self {
            config,
            seed,
            driver,
            events: script.events,
            cursor: 0,
            frame: 0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn driver(&self) -> &FrameDriver {
        &self.driver
    }

    /// Fire this frame's events, then tick once
    pub fn step(&mut self, dt: f32) -> Result<FrameOutput> {
        while let Some(scripted) = self.events.get(self.cursor) {
            if scripted.frame > self.frame {
                break;
            }
            let event = scripted.event.clone();
            self.cursor += 1;
            self.apply(&event)
                .with_context(|| format!("frame {}: {:?}", self.frame, event))?;
        }

        let output = self.driver.tick(dt);
        self.frame += 1;

        if self.frame % STATS_INTERVAL == 0 {
            let stats = self.driver.stats();
            tracing::info!(
                frame = self.frame,
                position = ?output.transform.position,
                clip = ?output.active,
                moves = stats.moves,
                blocked = stats.blocked,
                transitions = stats.transitions,
                "progress"
            );
        }

        Ok(output)
    }

    /// Run `frames` ticks of `dt` seconds each
    pub fn run(&mut self, frames: u64, dt: f32) -> Result<SimReport> {
        let mut last = None;
        for _ in 0..frames {
            last = Some(self.step(dt)?);
        }

        let session = self.driver.session();
        let clips = last.map(|output| output.clips).unwrap_or_default();
        Ok(SimReport {
            seed: self.seed,
            transform: session.transform,
            active: session.animation.active(),
            clips,
            stats: *self.driver.stats(),
        })
    }

    fn apply(&mut self, event: &Event) -> Result<()> {
        tracing::debug!(frame = self.frame, ?event, "script event");
        let session = self.driver.session_mut();

        match event {
            Event::KeyDown { key } => session.input.key_down(key),
            Event::KeyUp { key } => session.input.key_up(key),
            Event::Thumbstick { x, y } => {
                let hand = session
                    .input
                    .backend_mut()
                    .controller_mut(LOCOMOTION_HAND)
                    .ok_or_else(|| anyhow!("no tracked controller connected"))?;
                hand.set_thumbstick(*x, *y);
            }
            Event::Presenting { on } => session.input.set_presenting(*on),
            Event::CameraFacing { dir } => session.world.set_camera_facing(*dir),
            Event::ModelReady => session.world.set_avatar_footprint(self.config.avatar.footprint),
            Event::ClipReady { clip } => {
                let timing = self
                    .config
                    .animation
                    .clip(*clip)
                    .ok_or_else(|| anyhow!("clip {clip} has no configured timing"))?;
                session.animation.library_mut().insert(timing);
            }
            Event::ClipsReady => {
                for clip in &self.config.animation.clips {
                    session.animation.library_mut().insert(*clip);
                }
            }
            Event::ObstaclesReady => {
                let obstacles = self.config.place_obstacles(self.seed)?;
                session.world.install_obstacles(obstacles)?;
            }
        }
        Ok(())
    }
}

//! Scripted event timelines
//!
//! A script lists host events and the frame they fire on. It stands in for the
//! browser: key callbacks, the XR runtime, the camera rig and asset loaders
//! that finish at unpredictable times.
//!
//! ```toml
//! [[events]]
//! frame = 0
//! action = "key_down"
//! key = "w"
//!
//! [[events]]
//! frame = 30
//! action = "clips_ready"
//! ```

use std::path::Path;

use animation::ClipName;
use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Something the host does to the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Event {
    KeyDown { key: String },
    KeyUp { key: String },
    /// Raw xr-standard thumbstick values, before the deadzone
    Thumbstick { x: f32, y: f32 },
    Presenting { on: bool },
    CameraFacing { dir: Vec3 },
    /// Avatar model finished loading
    ModelReady,
    /// One animation clip finished loading
    ClipReady { clip: ClipName },
    /// Every configured clip finished loading
    ClipsReady,
    /// Obstacle models finished loading and were scattered
    ObstaclesReady,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptEvent {
    pub frame: u64,
    #[serde(flatten)]
    pub event: Event,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

impl Script {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse script {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut script: Self = toml::from_str(content)?;
        script.sort();
        Ok(script)
    }

    /// Order events by frame, keeping file order within a frame
    pub fn sort(&mut self) {
        self.events.sort_by_key(|event| event.frame);
    }

    pub fn last_frame(&self) -> Option<u64> {
        self.events.last().map(|event| event.frame)
    }

    /// Default timeline: a desk walk while assets trickle in, an attack, a
    /// turn, then a stretch in VR driven by the thumbstick
    pub fn builtin() -> Self {
        let at = |frame, event| ScriptEvent { frame, event };
        let key_down = |key: &str| Event::KeyDown { key: key.into() };
        let key_up = |key: &str| Event::KeyUp { key: key.into() };

        let events = vec![
            at(0, key_down("w")),
            at(5, Event::ModelReady),
            at(10, Event::ClipReady { clip: ClipName::Idle }),
            at(15, Event::ClipReady { clip: ClipName::Walk }),
            at(20, Event::ObstaclesReady),
            at(30, Event::ClipsReady),
            at(60, key_down("f")),
            at(90, key_up("f")),
            at(100, key_down("d")),
            at(120, Event::CameraFacing { dir: Vec3::X }),
            at(150, key_up("w")),
            at(150, key_up("d")),
            at(180, key_down("space")),
            at(181, key_up("space")),
            at(210, Event::Presenting { on: true }),
            at(210, Event::Thumbstick { x: 0.1, y: -0.9 }),
            at(270, Event::Thumbstick { x: 0.0, y: 0.0 }),
            at(290, Event::Presenting { on: false }),
        ];
        Self { events }
    }
}

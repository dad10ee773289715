//! Controller backend trait for platform-specific implementations
//!
//! A backend owns the tracked controllers reported by the XR runtime (or a
//! harness standing in for it). The sampler polls it once per tick while a VR
//! presentation session is active.

use crate::tracked::{ControllerInfo, TrackedControllerState};

/// Trait for tracked controller backends
///
/// # Example
///
/// ```ignore
/// let mut backend = ManualBackend::new();
/// let id = backend.connect("Left Hand", TrackedControllerState::xr_standard());
///
/// // In the frame loop:
/// backend.poll();
/// if let Some(controller) = backend.locomotion_controller() {
///     let stick = controller.thumbstick(0.2);
/// }
/// ```
pub trait ControllerBackend {
    /// Poll for controller events and update state
    fn poll(&mut self);

    /// Get list of all known controllers
    fn enumerate(&self) -> Vec<ControllerInfo>;

    /// Get a controller by the id reported from `enumerate()`
    fn controller(&self, id: usize) -> Option<&TrackedControllerState>;

    /// Mutable controller access for hosts that push axis values themselves
    ///
    /// Backends fed by a runtime keep their state private and return `None`.
    fn controller_mut(&mut self, _id: usize) -> Option<&mut TrackedControllerState> {
        None
    }

    /// First connected controller with a layout that drives locomotion
    fn locomotion_controller(&self) -> Option<&TrackedControllerState> {
        let controllers = self.enumerate();
        controllers
            .iter()
            .filter_map(|info| self.controller(info.id))
            .find(|state| state.drives_locomotion())
    }

    /// Get the number of connected controllers
    fn controller_count(&self) -> usize {
        self.enumerate().iter().filter(|info| info.connected).count()
    }
}

/// A no-op backend for sessions without any tracked input device
pub struct NullBackend;

impl NullBackend {
    /// Create a new null backend
    pub fn new() -> Self {
        Self
    }
}

impl Default for NullBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ControllerBackend for NullBackend {
    fn poll(&mut self) {}

    fn enumerate(&self) -> Vec<ControllerInfo> {
        Vec::new()
    }

    fn controller(&self, _id: usize) -> Option<&TrackedControllerState> {
        None
    }
}

/// Backend whose controllers are fed directly by the host
///
/// Used by headless harnesses and tests, and by hosts that receive controller
/// snapshots from an XR runtime through their own channel.
#[derive(Debug, Default)]
pub struct ManualBackend {
    controllers: Vec<(String, TrackedControllerState)>,
}

impl ManualBackend {
    /// Create a backend with no controllers
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a controller and return its id
    pub fn connect(&mut self, name: impl Into<String>, state: TrackedControllerState) -> usize {
        self.controllers.push((name.into(), state));
        self.controllers.len() - 1
    }

    /// Mark a controller as disconnected and reset its axes
    pub fn disconnect(&mut self, id: usize) {
        if let Some(state) = self.controller_mut(id) {
            state.connected = false;
            state.reset();
        }
    }
}

impl ControllerBackend for ManualBackend {
    fn poll(&mut self) {}

    fn enumerate(&self) -> Vec<ControllerInfo> {
        self.controllers
            .iter()
            .enumerate()
            .map(|(id, (name, state))| ControllerInfo {
                id,
                name: name.clone(),
                mapping: state.mapping,
                connected: state.connected,
            })
            .collect()
    }

    fn controller(&self, id: usize) -> Option<&TrackedControllerState> {
        self.controllers.get(id).map(|(_, state)| state)
    }

    fn controller_mut(&mut self, id: usize) -> Option<&mut TrackedControllerState> {
        self.controllers.get_mut(id).map(|(_, state)| state)
    }
}

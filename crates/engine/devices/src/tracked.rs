//! Tracked (VR motion) controller state and deadzone processing
//!
//! Tracked controllers report a flat axes array. For the `xr-standard` mapping
//! the touchpad occupies axes 0/1 and the thumbstick axes 2/3, so locomotion
//! reads the latter pair.

use glam::Vec2;

/// Default per-axis deadzone for thumbsticks
pub const DEFAULT_DEADZONE: f32 = 0.2;

/// Index of the thumbstick X axis in an `xr-standard` axes array
pub const XR_THUMBSTICK_X: usize = 2;
/// Index of the thumbstick Y axis in an `xr-standard` axes array
pub const XR_THUMBSTICK_Y: usize = 3;

/// Button/axis layout reported by a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerMapping {
    /// WebXR `xr-standard` layout
    XrStandard,
    /// Conventional desktop gamepad layout
    Standard,
    /// Anything else
    #[default]
    Unknown,
}

/// Controller information for enumeration
#[derive(Debug, Clone)]
pub struct ControllerInfo {
    /// Unique identifier for this controller
    pub id: usize,
    /// Human-readable name of the controller
    pub name: String,
    /// Reported layout
    pub mapping: ControllerMapping,
    /// Whether the controller is currently connected
    pub connected: bool,
}

/// State of one tracked controller
#[derive(Debug, Clone, Default)]
pub struct TrackedControllerState {
    /// Raw axes as reported by the device
    axes: Vec<f32>,
    /// Reported layout
    pub mapping: ControllerMapping,
    /// Whether the controller is connected
    pub connected: bool,
}

impl TrackedControllerState {
    /// Create a connected controller with the given layout and no axis input
    pub fn with_mapping(mapping: ControllerMapping) -> Self {
        Self {
            axes: Vec::new(),
            mapping,
            connected: true,
        }
    }

    /// Create a connected `xr-standard` controller with no axis input
    pub fn xr_standard() -> Self {
        Self::with_mapping(ControllerMapping::XrStandard)
    }

    /// Replace the raw axes array
    pub fn set_axes(&mut self, axes: &[f32]) {
        self.axes.clear();
        self.axes.extend_from_slice(axes);
    }

    /// Set only the thumbstick pair, padding the array as needed
    pub fn set_thumbstick(&mut self, x: f32, y: f32) {
        if self.axes.len() <= XR_THUMBSTICK_Y {
            self.axes.resize(XR_THUMBSTICK_Y + 1, 0.0);
        }
        self.axes[XR_THUMBSTICK_X] = x;
        self.axes[XR_THUMBSTICK_Y] = y;
    }

    /// Raw thumbstick values; missing axes read as zero
    pub fn raw_thumbstick(&self) -> Vec2 {
        let axis = |index: usize| self.axes.get(index).copied().unwrap_or(0.0);
        Vec2::new(axis(XR_THUMBSTICK_X), axis(XR_THUMBSTICK_Y))
    }

    /// Thumbstick with the per-axis deadzone applied and values clamped to [-1, 1]
    pub fn thumbstick(&self, deadzone: f32) -> Vec2 {
        apply_axial_deadzone(self.raw_thumbstick(), deadzone)
    }

    /// Whether this controller can drive locomotion
    pub fn drives_locomotion(&self) -> bool {
        self.connected && self.mapping == ControllerMapping::XrStandard
    }

    /// Reset all axes to rest
    pub fn reset(&mut self) {
        self.axes.clear();
    }
}

/// Zero each axis independently when its magnitude is below `deadzone`
///
/// Values past the deadzone pass through unscaled. Non-finite values are
/// treated as rest; everything else is clamped to [-1, 1].
pub fn apply_axial_deadzone(raw: Vec2, deadzone: f32) -> Vec2 {
    let filter = |value: f32| {
        if !value.is_finite() || value.abs() < deadzone {
            0.0
        } else {
            value.clamp(-1.0, 1.0)
        }
    };
    Vec2::new(filter(raw.x), filter(raw.y))
}

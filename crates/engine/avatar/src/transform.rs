use glam::{Quat, Vec3};

/// Avatar placement: position plus heading about the vertical axis
///
/// At yaw 0 the avatar model faces +Z.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub position: Vec3,
    /// Heading in radians
    pub yaw: f32,
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self { position, yaw: 0.0 }
    }

    /// Rotation quaternion for the renderer
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// Unit direction the avatar faces on the ground plane
    pub fn forward(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, self.yaw.cos())
    }
}

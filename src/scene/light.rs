use glam::{Quat, Vec3};

use crate::math::safe_normalize;

/// Shadow-casting directional light. Only the direction matters to the
/// cascade fit; it points from the light toward the scene.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    pub direction: Vec3,
}

impl DirectionalLight {
    pub fn new(direction: Vec3) -> Self {
        Self {
            direction: safe_normalize(direction, Vec3::NEG_Y),
        }
    }

    /// A light oriented by `rotation` shines along its local -Z axis.
    pub fn from_rotation(rotation: Quat) -> Self {
        Self::new(rotation * Vec3::NEG_Z)
    }

    /// Sun-style light circling the vertical axis at a fixed elevation
    /// (radians above the horizon).
    pub fn orbiting(azimuth: f32, elevation: f32) -> Self {
        let (sin_el, cos_el) = elevation.sin_cos();
        let (sin_az, cos_az) = azimuth.sin_cos();
        Self::new(-Vec3::new(cos_el * cos_az, sin_el, cos_el * sin_az))
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(Vec3::new(0.3, -1.0, -1.1))
    }
}

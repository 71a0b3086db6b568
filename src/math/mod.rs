pub mod aabb;
pub mod frustum;
pub mod sphere;

pub use aabb::Aabb;
pub use frustum::{Frustum, FAR_CORNERS, NEAR_CORNERS};
pub use sphere::BoundingSphere;

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Clip-space depth convention used when building projection matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthRange {
    /// wgpu / Vulkan / D3D: near maps to 0, far maps to 1.
    #[default]
    ZeroToOne,
    /// OpenGL: near maps to -1, far maps to 1.
    NegativeOneToOne,
}

impl DepthRange {
    pub fn perspective(self, fov_y_radians: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        match self {
            DepthRange::ZeroToOne => Mat4::perspective_rh(fov_y_radians, aspect, near, far),
            DepthRange::NegativeOneToOne => {
                Mat4::perspective_rh_gl(fov_y_radians, aspect, near, far)
            }
        }
    }

    pub fn orthographic(
        self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Mat4 {
        match self {
            DepthRange::ZeroToOne => Mat4::orthographic_rh(left, right, bottom, top, near, far),
            DepthRange::NegativeOneToOne => {
                Mat4::orthographic_rh_gl(left, right, bottom, top, near, far)
            }
        }
    }

    /// NDC depth of the near plane.
    pub fn near_depth(self) -> f32 {
        match self {
            DepthRange::ZeroToOne => 0.0,
            DepthRange::NegativeOneToOne => -1.0,
        }
    }
}

pub fn safe_normalize(vec: Vec3, fallback: Vec3) -> Vec3 {
    if vec.length_squared() > 1e-6 {
        vec.normalize()
    } else {
        fallback
    }
}

/// World up for a view along `direction`, swapped for +Z when the two are
/// close to parallel so the resulting basis stays well defined.
pub fn stable_up(direction: Vec3) -> Vec3 {
    let up = Vec3::Y;
    if direction.abs().dot(up) > 0.95 {
        Vec3::Z
    } else {
        up
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_normalize_uses_fallback_for_zero_vector() {
        let n = safe_normalize(Vec3::ZERO, Vec3::NEG_Y);
        assert_eq!(n, Vec3::NEG_Y);

        let n = safe_normalize(Vec3::new(0.0, 3.0, 4.0), Vec3::NEG_Y);
        assert!(n.abs_diff_eq(Vec3::new(0.0, 0.6, 0.8), 1e-6));
    }

    #[test]
    fn stable_up_avoids_parallel_direction() {
        assert_eq!(stable_up(Vec3::NEG_Y), Vec3::Z);
        assert_eq!(stable_up(Vec3::new(0.1, -1.0, 0.1).normalize()), Vec3::Z);
        assert_eq!(stable_up(Vec3::new(1.0, -0.5, 0.0).normalize()), Vec3::Y);
    }

    #[test]
    fn depth_ranges_map_near_plane_differently() {
        let zero = DepthRange::ZeroToOne.orthographic(-1.0, 1.0, -1.0, 1.0, 0.0, 10.0);
        let gl = DepthRange::NegativeOneToOne.orthographic(-1.0, 1.0, -1.0, 1.0, 0.0, 10.0);

        let at_near = Vec3::new(0.0, 0.0, 0.0);
        let at_far = Vec3::new(0.0, 0.0, -10.0);

        let zero_near = zero.project_point3(at_near).z;
        let gl_near = gl.project_point3(at_near).z;
        assert!((zero_near - DepthRange::ZeroToOne.near_depth()).abs() < 1e-6);
        assert!((gl_near - DepthRange::NegativeOneToOne.near_depth()).abs() < 1e-6);
        assert!((zero.project_point3(at_far).z - 1.0).abs() < 1e-6);
        assert!((gl.project_point3(at_far).z - 1.0).abs() < 1e-6);
    }
}

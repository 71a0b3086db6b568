use glam::{Mat4, Vec3};

use crate::error::ShadowError;
use crate::math::{DepthRange, Frustum};

/// Per-frame camera state the cascade pipeline consumes.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_radians: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn proj(&self, depth: DepthRange) -> Mat4 {
        depth.perspective(self.fov_y_radians, self.aspect_ratio, self.near, self.far)
    }

    pub fn view_proj(&self, depth: DepthRange) -> Mat4 {
        self.proj(depth) * self.view()
    }

    pub fn fov_y_degrees(&self) -> f32 {
        self.fov_y_radians.to_degrees()
    }

    pub fn frustum(&self) -> Frustum {
        Frustum::new(
            self.eye,
            self.target,
            self.up,
            self.fov_y_degrees(),
            self.aspect_ratio,
            self.near,
            self.far,
        )
    }

    /// Checks the preconditions the frustum math relies on.
    pub fn validate(&self) -> Result<(), ShadowError> {
        if !(self.near > 0.0 && self.near < self.far && self.far.is_finite()) {
            return Err(ShadowError::InvalidDepthRange {
                near: self.near,
                far: self.far,
            });
        }
        let fov = self.fov_y_degrees();
        if !(fov > 0.0 && fov < 180.0) {
            return Err(ShadowError::InvalidFieldOfView(fov));
        }
        if !(self.aspect_ratio > 0.0 && self.aspect_ratio.is_finite()) {
            return Err(ShadowError::InvalidAspectRatio(self.aspect_ratio));
        }
        Ok(())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 3.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y_radians: 60f32.to_radians(),
            aspect_ratio: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_proj_is_reasonable() {
        let cam = Camera::default();
        let vp = cam.view_proj(DepthRange::ZeroToOne);
        let inv = vp.inverse();
        let id = vp * inv;
        assert!(id.abs_diff_eq(Mat4::IDENTITY, 1e-4));
    }

    #[test]
    fn frustum_matches_camera_matrices() {
        let cam = Camera {
            eye: Vec3::new(0.0, 10.0, 20.0),
            ..Camera::default()
        };
        let frustum = cam.frustum();

        assert!(frustum.view_matrix().abs_diff_eq(cam.view(), 1e-5));
        assert!(frustum
            .projection_matrix()
            .abs_diff_eq(cam.proj(DepthRange::ZeroToOne), 1e-5));
        assert!((frustum.fovy() - 60.0).abs() < 1e-4);
    }

    #[test]
    fn validate_rejects_broken_parameters() {
        assert!(Camera::default().validate().is_ok());

        let inverted = Camera {
            near: 10.0,
            far: 1.0,
            ..Camera::default()
        };
        assert_eq!(
            inverted.validate(),
            Err(ShadowError::InvalidDepthRange {
                near: 10.0,
                far: 1.0
            })
        );

        let zero_near = Camera {
            near: 0.0,
            ..Camera::default()
        };
        assert!(matches!(
            zero_near.validate(),
            Err(ShadowError::InvalidDepthRange { .. })
        ));

        let flat = Camera {
            fov_y_radians: 190f32.to_radians(),
            ..Camera::default()
        };
        assert!(matches!(
            flat.validate(),
            Err(ShadowError::InvalidFieldOfView(_))
        ));

        let squashed = Camera {
            aspect_ratio: 0.0,
            ..Camera::default()
        };
        assert_eq!(
            squashed.validate(),
            Err(ShadowError::InvalidAspectRatio(0.0))
        );
    }
}

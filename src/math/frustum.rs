use std::ops::Range;

use glam::{Mat4, Vec3, Vec4};

use super::{safe_normalize, stable_up, Aabb, BoundingSphere, DepthRange};

/// Indices of the near-plane corners returned by [`Frustum::compute_corners`].
pub const NEAR_CORNERS: Range<usize> = 0..4;
/// Indices of the far-plane corners returned by [`Frustum::compute_corners`].
pub const FAR_CORNERS: Range<usize> = 4..8;

/// A symmetric perspective viewing volume.
///
/// The basis `{u, v, n}` is right, up and back: the camera looks down `-n`.
/// Orientation and perspective are each replaced wholesale by
/// [`Frustum::orient`] and [`Frustum::set_perspective`]; the basis is never
/// rotated incrementally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    center: Vec3,
    u: Vec3,
    v: Vec3,
    n: Vec3,
    fovy: f32,
    aspect_ratio: f32,
    near: f32,
    far: f32,
}

impl Default for Frustum {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            n: Vec3::Z,
            fovy: 50.0,
            aspect_ratio: 1.0,
            near: 0.5,
            far: 100.0,
        }
    }
}

impl Frustum {
    pub fn new(
        eye: Vec3,
        look_at: Vec3,
        up: Vec3,
        fovy_degrees: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let mut frustum = Self::default();
        frustum.orient(eye, look_at, up);
        frustum.set_perspective(fovy_degrees, aspect_ratio, near, far);
        frustum
    }

    /// Rebuilds the orthonormal basis from an eye point, a target and an up hint.
    ///
    /// A coincident eye and target falls back to looking down -Z, and an up
    /// hint parallel to the view direction is swapped for a stable alternate
    /// axis, so the basis is always finite.
    pub fn orient(&mut self, eye: Vec3, look_at: Vec3, up: Vec3) {
        let n = safe_normalize(eye - look_at, Vec3::Z);

        let mut u = up.cross(n);
        if u.length_squared() < 1e-8 {
            let fallback = stable_up(n);
            log::debug!(
                "Up hint {:?} is parallel to view axis {:?}; using {:?}",
                up,
                n,
                fallback
            );
            u = fallback.cross(n);
        }
        let u = u.normalize();
        let v = n.cross(u).normalize();

        self.center = eye;
        self.u = u;
        self.v = v;
        self.n = n;
    }

    /// Stores the perspective parameters. `0 < near < far` is only checked
    /// by a debug assertion; see [`crate::Camera::validate`] for checked
    /// construction.
    pub fn set_perspective(&mut self, fovy_degrees: f32, aspect_ratio: f32, near: f32, far: f32) {
        debug_assert!(
            near > 0.0 && near < far,
            "frustum requires 0 < near < far (near {near}, far {far})"
        );
        self.fovy = fovy_degrees;
        self.aspect_ratio = aspect_ratio;
        self.near = near;
        self.far = far;
    }

    /// Copy of this frustum clipped to `[near, far]`, keeping orientation,
    /// field of view and aspect ratio.
    pub fn with_range(&self, near: f32, far: f32) -> Self {
        let mut frustum = *self;
        frustum.set_perspective(self.fovy, self.aspect_ratio, near, far);
        frustum
    }

    /// World-space corners: near plane bottom-left, top-left, top-right,
    /// bottom-right, then the far plane in the same order.
    pub fn compute_corners(&self) -> [Vec3; 8] {
        let tan_half = (self.fovy.to_radians() * 0.5).tan();
        let forward = -self.n;

        let plane = |distance: f32| {
            let half_height = distance * tan_half;
            let half_width = self.aspect_ratio * half_height;
            let c = self.center + forward * distance;
            let du = self.u * half_width;
            let dv = self.v * half_height;
            [c - du - dv, c - du + dv, c + du + dv, c + du - dv]
        };

        let near = plane(self.near);
        let far = plane(self.far);
        [
            near[0], near[1], near[2], near[3], far[0], far[1], far[2], far[3],
        ]
    }

    /// Light-space (or any space) extent of the frustum.
    pub fn compute_aabb(&self, transform: Mat4) -> Aabb {
        Aabb::from_points(
            self.compute_corners()
                .into_iter()
                .map(|corner| transform.project_point3(corner)),
        )
    }

    pub fn compute_bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::from_corners(&self.compute_corners())
    }

    /// Minimal enclosing sphere of the frustum.
    ///
    /// With `k` the ratio of the half-diagonal of a cross-section to its
    /// distance, the centre sits on the view axis at `0.5 (n + f)(1 + k²)`
    /// unless that lies beyond the far plane, in which case the far-plane
    /// cross-section's circumcircle bounds everything.
    pub fn compute_tight_bounding_sphere(&self) -> BoundingSphere {
        let (n, f) = (self.near, self.far);
        let tan_half = (self.fovy.to_radians() * 0.5).tan();
        let k = (1.0 + self.aspect_ratio * self.aspect_ratio).sqrt() * tan_half;
        let k2 = k * k;

        let (distance, radius) = if k2 >= (f - n) / (f + n) {
            (f, k * f)
        } else {
            let distance = 0.5 * (f + n) * (1.0 + k2);
            let radius = 0.5
                * ((f - n) * (f - n) + 2.0 * k2 * (f * f + n * n) + (f + n) * (f + n) * k2 * k2)
                    .sqrt();
            (distance, radius)
        };

        BoundingSphere {
            center: self.center - self.n * distance,
            radius,
        }
    }

    /// World-to-view matrix built straight from the basis; equivalent to
    /// `Mat4::look_at_rh` for the same eye, target and up.
    pub fn view_matrix(&self) -> Mat4 {
        let (u, v, n, c) = (self.u, self.v, self.n, self.center);
        Mat4::from_cols(
            Vec4::new(u.x, v.x, n.x, 0.0),
            Vec4::new(u.y, v.y, n.y, 0.0),
            Vec4::new(u.z, v.z, n.z, 0.0),
            Vec4::new(-u.dot(c), -v.dot(c), -n.dot(c), 1.0),
        )
    }

    pub fn inverse_view_matrix(&self) -> Mat4 {
        Mat4::from_cols(
            self.u.extend(0.0),
            self.v.extend(0.0),
            self.n.extend(0.0),
            self.center.extend(1.0),
        )
    }

    /// Perspective projection with wgpu's `[0, 1]` depth range.
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix_for(DepthRange::ZeroToOne)
    }

    pub fn projection_matrix_for(&self, depth: DepthRange) -> Mat4 {
        depth.perspective(self.fovy.to_radians(), self.aspect_ratio, self.near, self.far)
    }

    pub fn origin(&self) -> Vec3 {
        self.center
    }

    /// `(right, up, back)`
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.n)
    }

    pub fn forward(&self) -> Vec3 {
        -self.n
    }

    pub fn fovy(&self) -> f32 {
        self.fovy
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }
}

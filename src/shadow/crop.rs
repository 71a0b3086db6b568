use glam::{Mat4, Vec2, Vec3, Vec4};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ShadowError;
use crate::math::{safe_normalize, stable_up, BoundingSphere, DepthRange, Frustum};

/// Which enclosing sphere of a cascade frustum the light box is fitted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SphereFit {
    /// Corner centroid and farthest-corner radius.
    #[default]
    Centroid,
    /// Closed-form minimal sphere of the frustum.
    Tight,
}

impl SphereFit {
    pub fn sphere(self, frustum: &Frustum) -> BoundingSphere {
        match self {
            SphereFit::Centroid => frustum.compute_bounding_sphere(),
            SphereFit::Tight => frustum.compute_tight_bounding_sphere(),
        }
    }
}

/// Parameters shared by every cascade's crop matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropParams {
    pub resolution: u32,
    pub sphere_fit: SphereFit,
    pub depth_range: DepthRange,
    pub texel_snap: bool,
    /// Extra depth in world units between the light and the bounding sphere.
    pub caster_margin: f32,
}

impl CropParams {
    pub fn new(resolution: u32) -> Self {
        Self {
            resolution,
            sphere_fit: SphereFit::Centroid,
            depth_range: DepthRange::ZeroToOne,
            texel_snap: true,
            caster_margin: 0.0,
        }
    }
}

/// Light-space fit of a single cascade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CascadeCrop {
    pub view: Mat4,
    /// Orthographic projection, already texel-snapped when enabled.
    pub projection: Mat4,
    pub sphere: BoundingSphere,
    /// World-space edge length of one shadow-map texel.
    pub texel_world_size: f32,
}

impl CascadeCrop {
    pub fn view_proj(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// `crop * lightProjection * lightView` for one cascade, using the default
/// parameters for `shadow_map_resolution`.
pub fn compute_crop_matrix(
    cascade: &Frustum,
    light_direction: Vec3,
    shadow_map_resolution: u32,
) -> Mat4 {
    compute_cascade_crop(cascade, light_direction, &CropParams::new(shadow_map_resolution))
        .view_proj()
}

pub fn compute_crop_matrices(
    cascades: &[Frustum],
    light_direction: Vec3,
    shadow_map_resolution: u32,
) -> Vec<Mat4> {
    let params = CropParams::new(shadow_map_resolution);
    compute_cascade_crops(cascades, light_direction, &params)
        .iter()
        .map(CascadeCrop::view_proj)
        .collect()
}

/// Cascades are independent, so they are fitted in parallel.
pub fn compute_cascade_crops(
    cascades: &[Frustum],
    light_direction: Vec3,
    params: &CropParams,
) -> Vec<CascadeCrop> {
    cascades
        .par_iter()
        .map(|cascade| compute_cascade_crop(cascade, light_direction, params))
        .collect()
}

/// Fits an orthographic light box around the cascade's bounding sphere.
///
/// The sphere's radius does not change as the camera rotates, so the box keeps
/// its size from frame to frame; only its position moves, and snapping that
/// position to whole texels keeps the rasterized shadow edges stable.
pub fn compute_cascade_crop(
    cascade: &Frustum,
    light_direction: Vec3,
    params: &CropParams,
) -> CascadeCrop {
    let sphere = params.sphere_fit.sphere(cascade);
    let radius = sphere.radius.max(f32::EPSILON);
    let direction = safe_normalize(light_direction, Vec3::NEG_Y);

    let eye = sphere.center - direction * radius;
    let view = Mat4::look_at_rh(eye, sphere.center, stable_up(direction));

    let margin = params.caster_margin.max(0.0);
    let mut projection =
        params
            .depth_range
            .orthographic(-radius, radius, -radius, radius, -margin, 2.0 * radius);

    if params.texel_snap {
        projection = snap_to_texel_grid(projection, view, params.resolution);
    }

    CascadeCrop {
        view,
        projection,
        sphere: BoundingSphere {
            center: sphere.center,
            radius,
        },
        texel_world_size: 2.0 * radius / params.resolution.max(1) as f32,
    }
}

/// Sub-texel remainder, in NDC units, that moves the world origin onto the
/// shadow map's texel grid.
pub fn texel_snap_offset(projection: Mat4, view: Mat4, resolution: u32) -> Vec2 {
    let half_resolution = resolution.max(1) as f32 * 0.5;
    let origin = (projection * view) * Vec4::W;
    let texel = origin.truncate().truncate() * half_resolution;
    (texel.round() - texel) / half_resolution
}

/// Folds [`texel_snap_offset`] into the projection's translation. Snapping an
/// already snapped projection leaves it unchanged.
pub fn snap_to_texel_grid(projection: Mat4, view: Mat4, resolution: u32) -> Mat4 {
    let offset = texel_snap_offset(projection, view, resolution);
    let mut snapped = projection;
    snapped.w_axis += Vec4::new(offset.x, offset.y, 0.0, 0.0);
    snapped
}

/// Rejects crop matrices that would corrupt the shadow pass.
pub fn validate_matrix(matrix: Mat4, cascade: usize) -> Result<Mat4, ShadowError> {
    if !matrix.is_finite() {
        return Err(ShadowError::NonFiniteMatrix { cascade });
    }
    let determinant = matrix.determinant();
    if !determinant.is_finite() || determinant.abs() <= f32::MIN_POSITIVE {
        return Err(ShadowError::SingularMatrix { cascade });
    }
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn camera_slice(near: f32, far: f32) -> Frustum {
        Frustum::new(
            Vec3::new(0.0, 10.0, 20.0),
            Vec3::ZERO,
            Vec3::Y,
            45.0,
            16.0 / 9.0,
            near,
            far,
        )
    }

    #[test]
    fn snapping_twice_changes_nothing() {
        let frustum = camera_slice(0.1, 12.0);
        let light = Vec3::new(0.3, -1.0, -0.4);
        let params = CropParams {
            texel_snap: false,
            ..CropParams::new(2048)
        };
        let crop = compute_cascade_crop(&frustum, light, &params);

        let once = snap_to_texel_grid(crop.projection, crop.view, 2048);
        let twice = snap_to_texel_grid(once, crop.view, 2048);

        assert!(once.abs_diff_eq(twice, 1e-5), "{once:?} vs {twice:?}");
        assert!(texel_snap_offset(once, crop.view, 2048).abs().max_element() < 1e-5);
    }

    #[test]
    fn snapped_origin_lands_on_texel_grid() {
        let frustum = camera_slice(5.0, 40.0);
        let light = Vec3::new(-0.5, -1.0, 0.2);
        let crop = compute_cascade_crop(&frustum, light, &CropParams::new(1024));

        let origin = crop.view_proj() * Vec4::W;
        let texel = origin.truncate().truncate() * 512.0;
        assert!((texel - texel.round()).abs().max_element() < 1e-2, "{texel:?}");
    }

    #[test]
    fn snap_only_moves_xy_translation() {
        let view = Mat4::look_at_rh(Vec3::new(3.3, 8.1, 1.7), Vec3::ZERO, Vec3::Y);
        let projection = Mat4::orthographic_rh(-7.0, 7.0, -7.0, 7.0, 0.0, 14.0);
        let snapped = snap_to_texel_grid(projection, view, 512);

        assert_eq!(snapped.x_axis, projection.x_axis);
        assert_eq!(snapped.y_axis, projection.y_axis);
        assert_eq!(snapped.z_axis, projection.z_axis);
        assert_eq!(snapped.w_axis.z, projection.w_axis.z);
        assert_eq!(snapped.w_axis.w, projection.w_axis.w);

        let shift = (snapped.w_axis - projection.w_axis).truncate().truncate();
        assert!(shift.abs().max_element() <= 1.0 / 512.0 + EPS);
    }

    #[test]
    fn light_view_looks_along_light_direction() {
        let frustum = camera_slice(0.1, 10.0);
        let direction = Vec3::new(0.4, -1.0, 0.2).normalize();
        let crop = compute_cascade_crop(&frustum, direction, &CropParams::new(2048));

        let in_view = crop.view.transform_vector3(direction);
        assert!(in_view.abs_diff_eq(Vec3::NEG_Z, EPS));
    }

    #[test]
    fn sphere_center_maps_to_middle_of_depth_range() {
        let frustum = camera_slice(1.0, 20.0);
        let params = CropParams {
            texel_snap: false,
            ..CropParams::new(2048)
        };
        let crop = compute_cascade_crop(&frustum, Vec3::NEG_Y, &params);

        let ndc = crop.view_proj().project_point3(crop.sphere.center);
        assert!(ndc.abs_diff_eq(Vec3::new(0.0, 0.0, 0.5), 1e-4), "{ndc:?}");
    }

    #[test]
    fn box_size_does_not_depend_on_camera_rotation() {
        let light = Vec3::new(0.2, -1.0, 0.1);
        let params = CropParams::new(2048);
        let a = compute_cascade_crop(&camera_slice(0.5, 15.0), light, &params);

        let rotated = Frustum::new(
            Vec3::new(0.0, 10.0, 20.0),
            Vec3::new(30.0, -5.0, 0.0),
            Vec3::Y,
            45.0,
            16.0 / 9.0,
            0.5,
            15.0,
        );
        let b = compute_cascade_crop(&rotated, light, &params);

        assert!((a.sphere.radius - b.sphere.radius).abs() < 1e-3);
        assert!((a.texel_world_size - b.texel_world_size).abs() < 1e-6);
        assert!((a.projection.x_axis.x - b.projection.x_axis.x).abs() < 1e-5);
    }

    #[test]
    fn caster_margin_pulls_near_plane_toward_light() {
        let frustum = camera_slice(1.0, 10.0);
        let light = Vec3::NEG_Y;
        let base = CropParams {
            texel_snap: false,
            ..CropParams::new(1024)
        };
        let plain = compute_cascade_crop(&frustum, light, &base);
        let widened = compute_cascade_crop(
            &frustum,
            light,
            &CropParams {
                caster_margin: 25.0,
                ..base
            },
        );

        // A caster above the sphere, between it and the light.
        let caster = plain.sphere.center + Vec3::Y * (plain.sphere.radius + 10.0);
        let plain_depth = plain.view_proj().project_point3(caster).z;
        let widened_depth = widened.view_proj().project_point3(caster).z;

        assert!(plain_depth < 0.0, "caster should be clipped: {plain_depth}");
        assert!((0.0..=1.0).contains(&widened_depth), "{widened_depth}");
    }

    #[test]
    fn validate_matrix_rejects_degenerate_input() {
        assert!(validate_matrix(Mat4::IDENTITY, 0).is_ok());
        assert_eq!(
            validate_matrix(Mat4::ZERO, 1),
            Err(ShadowError::SingularMatrix { cascade: 1 })
        );
        let mut nan = Mat4::IDENTITY;
        nan.x_axis.y = f32::NAN;
        assert_eq!(
            validate_matrix(nan, 2),
            Err(ShadowError::NonFiniteMatrix { cascade: 2 })
        );
    }

    #[test]
    fn zero_light_direction_falls_back_to_straight_down() {
        let frustum = camera_slice(0.1, 10.0);
        let fallback = compute_crop_matrix(&frustum, Vec3::ZERO, 1024);
        let down = compute_crop_matrix(&frustum, Vec3::NEG_Y, 1024);

        assert!(fallback.is_finite());
        assert!(fallback.abs_diff_eq(down, EPS));
    }
}

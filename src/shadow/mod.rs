pub mod cascades;
pub mod crop;
pub mod splits;
pub mod uniform;

pub use cascades::{
    build_cascade_frustums, build_cascade_frustums_with_overlap, DEFAULT_CASCADE_OVERLAP,
};
pub use crop::{
    compute_cascade_crop, compute_cascade_crops, compute_crop_matrices, compute_crop_matrix,
    snap_to_texel_grid, texel_snap_offset, validate_matrix, CascadeCrop, CropParams, SphereFit,
};
pub use splits::compute_split_planes;
pub use uniform::{CascadeUniform, MAX_CASCADES};

use glam::{Mat4, Vec3};

use crate::error::ShadowError;
use crate::math::Frustum;
use crate::scene::Camera;
use crate::settings::ShadowSettings;

#[derive(Debug, Clone, Copy)]
pub struct Cascade {
    pub frustum: Frustum,
    pub crop: CascadeCrop,
    /// Validated `crop * lightProjection * lightView`.
    pub view_proj: Mat4,
}

/// Everything the shadow pass needs for one frame.
#[derive(Debug, Clone)]
pub struct CascadeSet {
    /// `cascades.len() + 1` split distances from the camera.
    pub splits: Vec<f32>,
    pub cascades: Vec<Cascade>,
}

impl CascadeSet {
    pub fn matrices(&self) -> Vec<Mat4> {
        self.cascades.iter().map(|cascade| cascade.view_proj).collect()
    }

    /// Index of the cascade that shades a point `view_depth` in front of the
    /// camera, or `None` beyond the last split.
    pub fn cascade_for_depth(&self, view_depth: f32) -> Option<usize> {
        self.splits
            .windows(2)
            .position(|range| view_depth >= range[0] && view_depth <= range[1])
    }
}

/// Runs split, frustum and crop computation for each frame and keeps the
/// last valid result.
#[derive(Debug, Clone, Default)]
pub struct CascadedShadows {
    settings: ShadowSettings,
    current: Option<CascadeSet>,
}

impl CascadedShadows {
    pub fn new(settings: ShadowSettings) -> Self {
        let settings = settings.validate();
        log::info!(
            "Cascaded shadows: {} cascades, {}x{} maps, lambda {}",
            settings.cascade_count,
            settings.shadow_map_size,
            settings.shadow_map_size,
            settings.split_lambda
        );
        Self {
            settings,
            current: None,
        }
    }

    pub fn settings(&self) -> &ShadowSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: ShadowSettings) {
        self.settings = settings.validate();
        self.current = None;
    }

    pub fn current(&self) -> Option<&CascadeSet> {
        self.current.as_ref()
    }

    pub fn compute(
        &self,
        camera: &Camera,
        light_direction: Vec3,
    ) -> Result<CascadeSet, ShadowError> {
        camera.validate()?;

        let settings = &self.settings;
        let far = match settings.max_shadow_distance {
            Some(distance) => distance.min(camera.far),
            None => camera.far,
        };
        if far <= camera.near {
            return Err(ShadowError::InvalidDepthRange {
                near: camera.near,
                far,
            });
        }

        let splits = compute_split_planes(
            settings.cascade_count,
            camera.near,
            far,
            settings.split_lambda,
        );
        let frustums = build_cascade_frustums_with_overlap(
            &splits,
            camera.eye,
            camera.target,
            camera.up,
            camera.fov_y_degrees(),
            camera.aspect_ratio,
            settings.cascade_overlap,
        );
        let crops = compute_cascade_crops(&frustums, light_direction, &settings.crop_params());

        let cascades = frustums
            .into_iter()
            .zip(crops)
            .enumerate()
            .map(|(index, (frustum, crop))| -> Result<Cascade, ShadowError> {
                Ok(Cascade {
                    frustum,
                    crop,
                    view_proj: validate_matrix(crop.view_proj(), index)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CascadeSet { splits, cascades })
    }

    /// Recomputes the cascades. On failure the previous frame's set is kept
    /// for [`CascadedShadows::current`] and the error is returned.
    pub fn update(
        &mut self,
        camera: &Camera,
        light_direction: Vec3,
    ) -> Result<&CascadeSet, ShadowError> {
        match self.compute(camera, light_direction) {
            Ok(set) => Ok(self.current.insert(set)),
            Err(err) => {
                log::warn!("Keeping previous shadow cascades: {}", err);
                Err(err)
            }
        }
    }

    pub fn uniform(&self) -> CascadeUniform {
        match &self.current {
            Some(set) => CascadeUniform::from_set(set, self.settings.shadow_map_size),
            None => CascadeUniform::new(),
        }
    }
}

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::math::DepthRange;
use crate::shadow::{CropParams, SphereFit, DEFAULT_CASCADE_OVERLAP, MAX_CASCADES};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadowSettings {
    #[serde(default = "ShadowSettings::default_cascade_count")]
    pub cascade_count: usize,
    #[serde(default = "ShadowSettings::default_split_lambda")]
    pub split_lambda: f32,
    #[serde(default = "ShadowSettings::default_shadow_map_size")]
    pub shadow_map_size: u32,
    #[serde(default = "ShadowSettings::default_cascade_overlap")]
    pub cascade_overlap: f32,
    #[serde(default)]
    pub sphere_fit: SphereFit,
    #[serde(default = "ShadowSettings::default_texel_snap")]
    pub texel_snap: bool,
    #[serde(default)]
    pub depth_range: DepthRange,
    #[serde(default)]
    pub caster_margin: f32,
    /// Shadows end here even when the camera sees farther.
    #[serde(default)]
    pub max_shadow_distance: Option<f32>,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            cascade_count: Self::default_cascade_count(),
            split_lambda: Self::default_split_lambda(),
            shadow_map_size: Self::default_shadow_map_size(),
            cascade_overlap: Self::default_cascade_overlap(),
            sphere_fit: SphereFit::default(),
            texel_snap: Self::default_texel_snap(),
            depth_range: DepthRange::default(),
            caster_margin: 0.0,
            max_shadow_distance: None,
        }
    }
}

impl ShadowSettings {
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Self {
        use std::fs;

        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|err| {
                warn!(
                    "Failed to parse {:?} ({}). Falling back to default shadow settings.",
                    path, err
                );
                ShadowSettings::default()
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "Shadow settings file {:?} not found. Using default settings.",
                    path
                );
                ShadowSettings::default()
            }
            Err(err) => {
                warn!(
                    "Failed to read {:?} ({}). Falling back to default shadow settings.",
                    path, err
                );
                ShadowSettings::default()
            }
        }
    }

    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        let settings = serde_json::from_str::<ShadowSettings>(contents)?;
        info!("Loaded shadow settings: {:?}", settings);
        Ok(settings.validate())
    }

    pub fn crop_params(&self) -> CropParams {
        CropParams {
            resolution: self.shadow_map_size,
            sphere_fit: self.sphere_fit,
            depth_range: self.depth_range,
            texel_snap: self.texel_snap,
            caster_margin: self.caster_margin,
        }
    }

    /// Replaces out-of-range values with their defaults.
    pub(crate) fn validate(mut self) -> Self {
        if self.cascade_count == 0 || self.cascade_count > MAX_CASCADES {
            warn!(
                "Cascade count must be between 1 and {}. Using default value.",
                MAX_CASCADES
            );
            self.cascade_count = Self::default_cascade_count();
        }

        if !(0.0..=1.0).contains(&self.split_lambda) {
            warn!("Split lambda must be within [0, 1]. Using default value.");
            self.split_lambda = Self::default_split_lambda();
        }

        if self.shadow_map_size == 0 {
            warn!("Shadow map size must be greater than zero. Using default value.");
            self.shadow_map_size = Self::default_shadow_map_size();
        }

        if !(self.cascade_overlap >= 1.0 && self.cascade_overlap.is_finite()) {
            warn!("Cascade overlap must be at least 1.0. Using default value.");
            self.cascade_overlap = Self::default_cascade_overlap();
        }

        if !(self.caster_margin >= 0.0 && self.caster_margin.is_finite()) {
            warn!("Caster margin must be non-negative. Using 0.");
            self.caster_margin = 0.0;
        }

        if let Some(distance) = self.max_shadow_distance {
            if !(distance > 0.0 && distance.is_finite()) {
                warn!("Max shadow distance must be positive. Ignoring it.");
                self.max_shadow_distance = None;
            }
        }

        self
    }

    const fn default_cascade_count() -> usize {
        3
    }

    const fn default_split_lambda() -> f32 {
        0.7
    }

    const fn default_shadow_map_size() -> u32 {
        2048
    }

    const fn default_cascade_overlap() -> f32 {
        DEFAULT_CASCADE_OVERLAP
    }

    const fn default_texel_snap() -> bool {
        true
    }
}

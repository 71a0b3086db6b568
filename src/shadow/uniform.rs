use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use super::CascadeSet;

pub const MAX_CASCADES: usize = 4;

/// Cascade data in the layout the shadow and lighting shaders read.
///
/// `split_far[i]` is the view-space distance where cascade `i` ends, used to
/// pick a cascade per fragment. `params` holds `[count, resolution, 0, 0]`.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct CascadeUniform {
    pub view_proj: [[[f32; 4]; 4]; MAX_CASCADES],
    pub split_far: [f32; MAX_CASCADES],
    pub texel_world_size: [f32; MAX_CASCADES],
    pub params: [u32; 4],
}

impl CascadeUniform {
    pub fn new() -> Self {
        let mut uniform = Self::zeroed();
        for matrix in uniform.view_proj.iter_mut() {
            *matrix = Mat4::IDENTITY.to_cols_array_2d();
        }
        uniform
    }

    pub fn from_set(set: &CascadeSet, resolution: u32) -> Self {
        let mut uniform = Self::new();

        let count = set.cascades.len().min(MAX_CASCADES);
        if set.cascades.len() > MAX_CASCADES {
            log::warn!(
                "{} cascades exceed the uniform capacity of {}; extra cascades are dropped",
                set.cascades.len(),
                MAX_CASCADES
            );
        }

        for (index, cascade) in set.cascades.iter().take(count).enumerate() {
            uniform.view_proj[index] = cascade.view_proj.to_cols_array_2d();
            uniform.split_far[index] = set.splits[index + 1];
            uniform.texel_world_size[index] = cascade.crop.texel_world_size;
        }
        uniform.params = [count as u32, resolution, 0, 0];

        uniform
    }

    pub fn count(&self) -> usize {
        self.params[0] as usize
    }
}

impl Default for CascadeUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cascade_uniform_layout_is_tightly_packed() {
        // 4 mat4x4<f32> + 3 * vec4
        assert_eq!(std::mem::size_of::<CascadeUniform>(), 4 * 64 + 3 * 16);
        assert_eq!(bytemuck::bytes_of(&CascadeUniform::new()).len(), 304);
    }

    #[test]
    fn new_uniform_has_identity_matrices_and_no_cascades() {
        let uniform = CascadeUniform::new();
        assert_eq!(uniform.count(), 0);
        for matrix in uniform.view_proj {
            assert_eq!(Mat4::from_cols_array_2d(&matrix), Mat4::IDENTITY);
        }
    }
}

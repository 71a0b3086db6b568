use glam::Vec3;

use crate::math::Frustum;

/// Far-plane extension applied to every cascade but the last, so geometry
/// straddling a split is covered by both neighbours.
pub const DEFAULT_CASCADE_OVERLAP: f32 = 1.005;

/// One frustum per split interval, all sharing the camera's eye, orientation,
/// field of view and aspect ratio.
pub fn build_cascade_frustums(
    splits: &[f32],
    camera_eye: Vec3,
    camera_target: Vec3,
    camera_up: Vec3,
    fovy_degrees: f32,
    aspect_ratio: f32,
) -> Vec<Frustum> {
    build_cascade_frustums_with_overlap(
        splits,
        camera_eye,
        camera_target,
        camera_up,
        fovy_degrees,
        aspect_ratio,
        DEFAULT_CASCADE_OVERLAP,
    )
}

pub fn build_cascade_frustums_with_overlap(
    splits: &[f32],
    camera_eye: Vec3,
    camera_target: Vec3,
    camera_up: Vec3,
    fovy_degrees: f32,
    aspect_ratio: f32,
    overlap: f32,
) -> Vec<Frustum> {
    if splits.len() < 2 {
        return Vec::new();
    }

    let mut camera = Frustum::default();
    camera.orient(camera_eye, camera_target, camera_up);
    let last = splits.len() - 2;
    let overlap = overlap.max(1.0);

    splits
        .windows(2)
        .enumerate()
        .map(|(index, range)| {
            let near = range[0];
            let far = if index < last { range[1] * overlap } else { range[1] };

            let mut frustum = camera;
            frustum.set_perspective(fovy_degrees, aspect_ratio, near, far);
            frustum
        })
        .collect()
}

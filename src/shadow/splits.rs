/// Split distances for `cascade_count` cascades over `[near, far]` using the
/// practical split scheme.
///
/// Each interior split blends the logarithmic split `near * (far / near)^p`
/// with the uniform split `near + (far - near) * p`, where `p = i / count`:
/// - `lambda = 0`: uniform spacing
/// - `lambda = 1`: logarithmic spacing (tighter near cascades)
///
/// The result has `cascade_count + 1` entries, starts at exactly `near`, ends
/// at exactly `far`, and is strictly increasing whenever `0 < near < far`.
/// `lambda` is clamped into `[0, 1]`.
pub fn compute_split_planes(cascade_count: usize, near: f32, far: f32, lambda: f32) -> Vec<f32> {
    debug_assert!(cascade_count >= 1, "at least one cascade is required");
    debug_assert!(
        near > 0.0 && near < far,
        "split planes require 0 < near < far (near {near}, far {far})"
    );

    let count = cascade_count.max(1);
    let lambda = lambda.clamp(0.0, 1.0);
    let ratio = far / near;

    let mut splits = Vec::with_capacity(count + 1);
    splits.push(near);
    for i in 1..count {
        let p = i as f32 / count as f32;
        let log_split = near * ratio.powf(p);
        let uniform_split = near + (far - near) * p;
        splits.push(lambda * log_split + (1.0 - lambda) * uniform_split);
    }
    splits.push(far);

    splits
}

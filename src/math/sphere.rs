use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    /// Centroid of the corners with the radius reaching the farthest one.
    ///
    /// Conservative, not minimal: the tight sphere of a long frustum sits
    /// closer to the far plane than the centroid does.
    pub fn from_corners(corners: &[Vec3; 8]) -> Self {
        let center = corners.iter().copied().sum::<Vec3>() / 8.0;
        let radius = corners
            .iter()
            .map(|corner| corner.distance(center))
            .fold(0.0f32, f32::max);
        Self { center, radius }
    }

    pub fn contains(&self, point: Vec3, tolerance: f32) -> bool {
        point.distance(self.center) <= self.radius + tolerance
    }
}

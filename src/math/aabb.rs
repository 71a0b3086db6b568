use glam::Vec3;

/// Axis-aligned bounding box grown one point at a time.
///
/// A freshly reset box has `min = f32::MAX` and `max = f32::MIN` on every axis,
/// so it reports `min > max` until the first [`Aabb::merge`]. `f32::MIN` is the
/// most negative finite value, not the smallest positive one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Aabb {
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::MAX),
        max: Vec3::splat(f32::MIN),
    };

    pub fn new() -> Self {
        Self::EMPTY
    }

    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut aabb = Self::EMPTY;
        for point in points {
            aabb.merge(point);
        }
        aabb
    }

    pub fn reset(&mut self) {
        *self = Self::EMPTY;
    }

    pub fn merge(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn min_max(&self) -> (Vec3, Vec3) {
        (self.min, self.max)
    }

    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    /// `None` for an empty box.
    pub fn center(&self) -> Option<Vec3> {
        (!self.is_empty()).then(|| (self.min + self.max) * 0.5)
    }

    /// `None` for an empty box.
    pub fn size(&self) -> Option<Vec3> {
        (!self.is_empty()).then(|| self.max - self.min)
    }
}

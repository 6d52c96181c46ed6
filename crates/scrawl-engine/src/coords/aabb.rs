use super::{Point, Vec2, Vec3};

/// Axis-aligned bounding box.
///
/// The empty box is `(+∞ corner, −∞ corner)` so that growing it by any point
/// yields a degenerate box around that point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb<P> {
    pub min: P,
    pub max: P,
}

impl<P: Point> Aabb<P> {
    #[inline]
    pub fn new(min: P, max: P) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn empty() -> Self {
        Self { min: P::splat(f32::INFINITY), max: P::splat(f32::NEG_INFINITY) }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.min.all_le(self.max)
    }

    /// Grows the box to include `p ± radius` on every axis.
    #[inline]
    pub fn grow(&mut self, p: P, radius: f32) {
        let r = P::splat(radius);
        self.min = self.min.component_min(p - r);
        self.max = self.max.component_max(p + r);
    }

    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.component_min(other.min),
            max: self.max.component_max(other.max),
        }
    }

    /// Inclusive containment with an absolute tolerance.
    #[inline]
    pub fn contains(&self, p: P, eps: f32) -> bool {
        let e = P::splat(eps);
        (self.min - e).all_le(p) && p.all_le(self.max + e)
    }

    #[inline]
    pub fn center(&self) -> P {
        (self.min + self.max) * 0.5
    }
}

impl<P: Point> Default for Aabb<P> {
    fn default() -> Self {
        Self::empty()
    }
}

impl Aabb<Vec2> {
    pub fn corners(&self) -> [Vec2; 4] {
        let (a, b) = (self.min, self.max);
        [a, Vec2::new(b.x, a.y), b, Vec2::new(a.x, b.y)]
    }
}

impl Aabb<Vec3> {
    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }
}

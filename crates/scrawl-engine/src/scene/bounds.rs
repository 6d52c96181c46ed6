use crate::coords::{Aabb, Point, Sphere};

/// Bounds capability of an opaque asset.
///
/// The command log cannot look inside assets; when an asset record is
/// measured it asks the referenced handle for its own bounds in asset space.
pub trait BoundsProvider<P: Point> {
    fn try_bounding_box(&self) -> Option<Aabb<P>> {
        None
    }

    fn try_bounding_sphere(&self) -> Option<Sphere<P>> {
        None
    }
}

/// Running AABB + bounding sphere accumulated over a record walk.
///
/// Empty until the first contribution (`sphere.radius < 0`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundsContext<P> {
    pub aabb: Aabb<P>,
    pub sphere: Sphere<P>,
}

impl<P: Point> BoundsContext<P> {
    #[inline]
    pub fn new() -> Self {
        Self { aabb: Aabb::empty(), sphere: Sphere::empty() }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sphere.is_empty()
    }

    /// Adds `point` thickened by `radius` on every axis.
    ///
    /// Negative radii are treated as zero.
    pub fn add_vertex(&mut self, point: P, radius: f32) {
        let radius = radius.max(0.0);
        self.aabb.grow(point, radius);
        self.sphere = if self.sphere.is_empty() {
            Sphere::new(point, radius)
        } else {
            self.sphere.merged(Sphere::new(point, radius))
        };
    }

    /// Adds an already-measured sphere.
    pub fn add_sphere(&mut self, sphere: Sphere<P>) {
        if !sphere.is_empty() {
            self.add_vertex(sphere.center, sphere.radius);
        }
    }

    /// Merges another accumulated context into this one.
    pub fn union(&mut self, other: &BoundsContext<P>) {
        if other.is_empty() {
            return;
        }
        self.aabb = self.aabb.union(other.aabb);
        self.sphere = self.sphere.merged(other.sphere);
    }
}

impl<P: Point> Default for BoundsContext<P> {
    fn default() -> Self {
        Self::new()
    }
}

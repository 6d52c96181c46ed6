use super::Point;

/// Bounding sphere (a circle in 2D).
///
/// A negative radius is the "empty" sentinel; [`Sphere::EMPTY_RADIUS`] is the
/// canonical value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sphere<P> {
    pub center: P,
    pub radius: f32,
}

impl<P: Point> Sphere<P> {
    pub const EMPTY_RADIUS: f32 = -1.0;

    #[inline]
    pub fn new(center: P, radius: f32) -> Self {
        Self { center, radius }
    }

    #[inline]
    pub fn empty() -> Self {
        Self { center: P::ZERO, radius: Self::EMPTY_RADIUS }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.radius < 0.0
    }

    /// Smallest sphere enclosing both `self` and `other`.
    ///
    /// Empty operands are ignored. If one sphere already contains the other the
    /// larger one is returned unchanged; otherwise the result touches the far
    /// side of both along the line through their centers.
    pub fn merged(self, other: Self) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }

        let relative = other.center - self.center;
        let distance = relative.length();

        if distance <= (self.radius - other.radius).abs() {
            return if self.radius >= other.radius { self } else { other };
        }

        // distance > |r0 - r1| >= 0 here, so the division is safe.
        let radius = (distance + self.radius + other.radius) * 0.5;
        let center = self.center + relative * ((radius - self.radius) / distance);
        Self { center, radius }
    }

    #[inline]
    pub fn contains_point(&self, p: P, eps: f32) -> bool {
        !self.is_empty() && (p - self.center).length() <= self.radius + eps
    }

    #[inline]
    pub fn contains_sphere(&self, other: &Self, eps: f32) -> bool {
        if other.is_empty() {
            return true;
        }
        let reach = (other.center - self.center).length() + other.radius;
        !self.is_empty() && reach <= self.radius + eps
    }
}

impl<P: Point> Default for Sphere<P> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Vec2, Vec3};

    const EPS: f32 = 1e-4;

    fn s3(x: f32, y: f32, z: f32, r: f32) -> Sphere<Vec3> {
        Sphere::new(Vec3::new(x, y, z), r)
    }

    // ── sentinel ──────────────────────────────────────────────────────────

    #[test]
    fn empty_has_negative_radius() {
        let e = Sphere::<Vec3>::empty();
        assert!(e.is_empty());
        assert_eq!(e.radius, -1.0);
    }

    #[test]
    fn merge_with_empty_is_identity() {
        let a = s3(1.0, 2.0, 3.0, 4.0);
        assert_eq!(a.merged(Sphere::empty()), a);
        assert_eq!(Sphere::empty().merged(a), a);
    }

    // ── merge ─────────────────────────────────────────────────────────────

    #[test]
    fn merge_two_unit_spheres() {
        let m = s3(0.0, 0.0, 0.0, 1.0).merged(s3(10.0, 0.0, 0.0, 1.0));
        assert!((m.center.x - 5.0).abs() < EPS);
        assert_eq!(m.center.y, 0.0);
        assert_eq!(m.center.z, 0.0);
        assert!((m.radius - 6.0).abs() < EPS);
    }

    #[test]
    fn merge_keeps_larger_when_containing() {
        let big = s3(0.0, 0.0, 0.0, 10.0);
        let small = s3(2.0, 0.0, 0.0, 1.0);
        assert_eq!(big.merged(small), big);
        assert_eq!(small.merged(big), big);
    }

    #[test]
    fn merge_concentric_equal_spheres() {
        let a = s3(1.0, 1.0, 1.0, 2.0);
        assert_eq!(a.merged(a), a);
    }

    #[test]
    fn merge_points_gives_midpoint_circle() {
        let a = Sphere::new(Vec2::new(0.0, 0.0), 0.0);
        let b = Sphere::new(Vec2::new(0.0, 4.0), 0.0);
        let m = a.merged(b);
        assert!((m.center.y - 2.0).abs() < EPS);
        assert!((m.radius - 2.0).abs() < EPS);
    }

    #[test]
    fn merge_contains_both_in_either_order() {
        let cases = [
            (s3(0.0, 0.0, 0.0, 1.0), s3(3.0, 4.0, 0.0, 2.0)),
            (s3(-5.0, 2.0, 1.0, 0.5), s3(7.0, -3.0, 9.0, 4.0)),
            (s3(1.0, 1.0, 1.0, 3.0), s3(1.5, 1.0, 1.0, 2.0)),
            (s3(0.0, 0.0, 0.0, 0.0), s3(0.0, 0.0, 100.0, 0.0)),
        ];
        for (a, b) in cases {
            for m in [a.merged(b), b.merged(a)] {
                assert!(m.contains_sphere(&a, EPS), "{m:?} does not contain {a:?}");
                assert!(m.contains_sphere(&b, EPS), "{m:?} does not contain {b:?}");
            }
            let (ab, ba) = (a.merged(b), b.merged(a));
            assert!((ab.radius - ba.radius).abs() < EPS);
        }
    }
}

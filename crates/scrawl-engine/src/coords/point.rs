use core::fmt;
use core::ops::{Add, Mul, Sub};

/// Vector operations shared by the 2D and 3D bounds code.
///
/// Implemented for [`Vec2`](super::Vec2) and [`Vec3`](super::Vec3); the
/// generic `Aabb`, `Sphere` and bounds accumulator are written against this.
pub trait Point:
    Copy
    + PartialEq
    + fmt::Debug
    + fmt::Display
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f32, Output = Self>
    + Send
    + Sync
    + 'static
{
    const ZERO: Self;

    /// Vector with every component set to `v`.
    fn splat(v: f32) -> Self;

    /// Euclidean length.
    fn length(self) -> f32;

    fn component_min(self, rhs: Self) -> Self;

    fn component_max(self, rhs: Self) -> Self;

    /// True when every component of `self` is `<=` the matching one in `rhs`.
    fn all_le(self, rhs: Self) -> bool;
}

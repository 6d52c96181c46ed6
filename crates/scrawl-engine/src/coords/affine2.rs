use core::fmt;

use super::Vec2;

/// 2D affine transform (3×2 matrix, row-vector convention).
///
/// A point transforms as `p' = [x y 1] · M`:
///
/// ```text
/// | m11 m12 |
/// | m21 m22 |
/// | m31 m32 |   <- translation
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Affine2 {
    pub m11: f32,
    pub m12: f32,
    pub m21: f32,
    pub m22: f32,
    pub m31: f32,
    pub m32: f32,
}

impl Affine2 {
    pub const IDENTITY: Affine2 = Affine2::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    #[inline]
    pub const fn new(m11: f32, m12: f32, m21: f32, m22: f32, m31: f32, m32: f32) -> Self {
        Self { m11, m12, m21, m22, m31, m32 }
    }

    #[inline]
    pub const fn translation(t: Vec2) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, t.x, t.y)
    }

    #[inline]
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Counter-clockwise rotation by `radians` (for +Y up).
    #[inline]
    pub fn rotation(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self::new(c, s, -s, c, 0.0, 0.0)
    }

    /// Returns the transform that applies `self` first, then `next`.
    pub fn then(&self, next: &Affine2) -> Affine2 {
        let a = self;
        let b = next;
        Affine2::new(
            a.m11 * b.m11 + a.m12 * b.m21,
            a.m11 * b.m12 + a.m12 * b.m22,
            a.m21 * b.m11 + a.m22 * b.m21,
            a.m21 * b.m12 + a.m22 * b.m22,
            a.m31 * b.m11 + a.m32 * b.m21 + b.m31,
            a.m31 * b.m12 + a.m32 * b.m22 + b.m32,
        )
    }

    #[inline]
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x * self.m11 + p.y * self.m21 + self.m31,
            p.x * self.m12 + p.y * self.m22 + self.m32,
        )
    }

    /// Transforms a direction (ignores translation).
    #[inline]
    pub fn transform_vector(&self, v: Vec2) -> Vec2 {
        Vec2::new(v.x * self.m11 + v.y * self.m21, v.x * self.m12 + v.y * self.m22)
    }

    /// Largest stretch factor of the linear part, measured on the basis rows.
    ///
    /// Exact for similarity transforms and an upper bound otherwise, so radii
    /// scaled by it still enclose the transformed geometry.
    #[inline]
    pub fn uniform_scale(&self) -> f32 {
        let sx = Vec2::new(self.m11, self.m12).length();
        let sy = Vec2::new(self.m21, self.m22).length();
        sx.max(sy)
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// True when the transform only scales and translates (no rotation or shear).
    #[inline]
    pub fn is_axis_aligned(&self) -> bool {
        self.m12 == 0.0 && self.m21 == 0.0
    }

    #[inline]
    pub fn to_array(&self) -> [f32; 6] {
        [self.m11, self.m12, self.m21, self.m22, self.m31, self.m32]
    }

    #[inline]
    pub fn from_array(m: [f32; 6]) -> Self {
        Self::new(m[0], m[1], m[2], m[3], m[4], m[5])
    }
}

impl Default for Affine2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Affine2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            return f.write_str("identity");
        }
        write!(
            f,
            "[{} {}; {} {}; {} {}]",
            self.m11, self.m12, self.m21, self.m22, self.m31, self.m32
        )
    }
}

use core::fmt;

use super::Vec3;

/// 4×4 transform, row-major, row-vector convention (`p' = [x y z 1] · M`).
///
/// Translation lives in row 3 (`m[3][0..3]`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    pub m: [[f32; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    #[inline]
    pub const fn translation(t: Vec3) -> Self {
        let mut m = Self::IDENTITY.m;
        m[3][0] = t.x;
        m[3][1] = t.y;
        m[3][2] = t.z;
        Self { m }
    }

    /// Uniform scale.
    #[inline]
    pub const fn scale(s: f32) -> Self {
        Self::scaling(Vec3::new(s, s, s))
    }

    /// Per-axis scale.
    #[inline]
    pub const fn scaling(s: Vec3) -> Self {
        let mut m = Self::IDENTITY.m;
        m[0][0] = s.x;
        m[1][1] = s.y;
        m[2][2] = s.z;
        Self { m }
    }

    /// Rotation about +Z by `radians`.
    pub fn rotation_z(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        let mut m = Self::IDENTITY.m;
        m[0][0] = c;
        m[0][1] = s;
        m[1][0] = -s;
        m[1][1] = c;
        Self { m }
    }

    /// Returns the transform that applies `self` first, then `next`.
    pub fn then(&self, next: &Mat4) -> Mat4 {
        let mut out = [[0.0f32; 4]; 4];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.m[r][k] * next.m[k][c]).sum();
            }
        }
        Mat4 { m: out }
    }

    /// Transforms a point, dividing by `w` for projective matrices.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let m = &self.m;
        let x = p.x * m[0][0] + p.y * m[1][0] + p.z * m[2][0] + m[3][0];
        let y = p.x * m[0][1] + p.y * m[1][1] + p.z * m[2][1] + m[3][1];
        let z = p.x * m[0][2] + p.y * m[1][2] + p.z * m[2][2] + m[3][2];
        let w = p.x * m[0][3] + p.y * m[1][3] + p.z * m[2][3] + m[3][3];

        if w != 1.0 && w != 0.0 {
            Vec3::new(x / w, y / w, z / w)
        } else {
            Vec3::new(x, y, z)
        }
    }

    /// Largest stretch factor of the upper-left 3×3 block (basis row lengths).
    ///
    /// Exact for similarity transforms, an upper bound otherwise.
    pub fn uniform_scale(&self) -> f32 {
        let row = |r: usize| Vec3::new(self.m[r][0], self.m[r][1], self.m[r][2]).length();
        row(0).max(row(1)).max(row(2))
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Row-major flattening, the order used on the wire.
    pub fn to_array(&self) -> [f32; 16] {
        let mut out = [0.0f32; 16];
        for (i, v) in self.m.iter().flatten().enumerate() {
            out[i] = *v;
        }
        out
    }

    pub fn from_array(a: [f32; 16]) -> Self {
        let mut m = [[0.0f32; 4]; 4];
        for (i, v) in a.into_iter().enumerate() {
            m[i / 4][i % 4] = v;
        }
        Self { m }
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Mat4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            return f.write_str("identity");
        }
        f.write_str("[")?;
        for (r, row) in self.m.iter().enumerate() {
            if r > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{} {} {} {}", row[0], row[1], row[2], row[3])?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_moves_points() {
        let t = Mat4::translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.transform_point(Vec3::zero()), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn then_applies_left_first() {
        let s = Mat4::scale(2.0);
        let t = Mat4::translation(Vec3::new(10.0, 0.0, 0.0));
        let p = Vec3::new(1.0, 1.0, 1.0);
        assert_eq!(s.then(&t).transform_point(p), Vec3::new(12.0, 2.0, 2.0));
        assert_eq!(t.then(&s).transform_point(p), Vec3::new(22.0, 2.0, 2.0));
    }

    #[test]
    fn uniform_scale_of_similarity() {
        let m = Mat4::rotation_z(0.7).then(&Mat4::scale(3.0));
        assert!((m.uniform_scale() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn array_order_is_row_major() {
        let t = Mat4::translation(Vec3::new(5.0, 6.0, 7.0));
        let a = t.to_array();
        assert_eq!(&a[12..15], &[5.0, 6.0, 7.0]);
        assert_eq!(Mat4::from_array(a), t);
    }
}

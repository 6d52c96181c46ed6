//! Little-endian field codecs shared by every primitive.
//!
//! Scalars, points and matrices are written with explicit `to_le_bytes`;
//! style blobs are copied with `bytemuck` as opaque bytes.

use core::fmt;
use core::marker::PhantomData;

use bytemuck::Pod;

use crate::coords::{Affine2, Mat4, Point, Vec2, Vec3};

use super::StreamError;

#[inline]
fn le_f32(b: &[u8], at: usize) -> f32 {
    f32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

// ── points ────────────────────────────────────────────────────────────────

/// A [`Point`] with a fixed little-endian wire layout.
pub trait WirePoint: Point {
    const WIRE_LEN: usize;

    fn write_le(self, out: &mut Vec<u8>);

    /// Decodes from exactly `WIRE_LEN` bytes.
    fn read_le(bytes: &[u8]) -> Self;
}

impl WirePoint for Vec2 {
    const WIRE_LEN: usize = 8;

    #[inline]
    fn write_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.x.to_le_bytes());
        out.extend_from_slice(&self.y.to_le_bytes());
    }

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        Vec2::new(le_f32(bytes, 0), le_f32(bytes, 4))
    }
}

impl WirePoint for Vec3 {
    const WIRE_LEN: usize = 12;

    #[inline]
    fn write_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.x.to_le_bytes());
        out.extend_from_slice(&self.y.to_le_bytes());
        out.extend_from_slice(&self.z.to_le_bytes());
    }

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        Vec3::new(le_f32(bytes, 0), le_f32(bytes, 4), le_f32(bytes, 8))
    }
}

/// Borrowed view of a packed point array inside a record payload.
///
/// Decodes lazily; nothing is allocated until a caller asks for a `Vec`.
#[derive(Copy, Clone)]
pub struct PointSlice<'a, P> {
    bytes: &'a [u8],
    _point: PhantomData<P>,
}

impl<'a, P: WirePoint> PointSlice<'a, P> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        debug_assert_eq!(bytes.len() % P::WIRE_LEN, 0);
        Self { bytes, _point: PhantomData }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len() / P::WIRE_LEN
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<P> {
        let start = index.checked_mul(P::WIRE_LEN)?;
        let chunk = self.bytes.get(start..start.checked_add(P::WIRE_LEN)?)?;
        Some(P::read_le(chunk))
    }

    pub fn iter(self) -> impl ExactSizeIterator<Item = P> + Clone + 'a {
        self.bytes.chunks_exact(P::WIRE_LEN).map(P::read_le)
    }

    /// Clears `out` and fills it with the decoded points.
    pub fn decode_into(&self, out: &mut Vec<P>) {
        out.clear();
        out.extend(self.iter());
    }

    pub fn to_vec(&self) -> Vec<P> {
        self.iter().collect()
    }

    /// Arithmetic mean of the points; `None` when empty.
    pub fn centroid(&self) -> Option<P> {
        if self.is_empty() {
            return None;
        }
        let sum = self.iter().fold(P::ZERO, |acc, p| acc + p);
        Some(sum * (1.0 / self.len() as f32))
    }
}

impl<P: WirePoint> fmt::Debug for PointSlice<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<P: WirePoint> PartialEq for PointSlice<'_, P> {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

// ── writer ────────────────────────────────────────────────────────────────

/// Appends little-endian fields to a record payload.
pub struct ByteWriter<'a> {
    out: &'a mut Vec<u8>,
}

impl<'a> ByteWriter<'a> {
    #[inline]
    pub(crate) fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out }
    }

    #[inline]
    pub fn f32(&mut self, v: f32) {
        self.out.extend_from_slice(&v.to_le_bytes());
    }

    #[inline]
    pub fn i32(&mut self, v: i32) {
        self.out.extend_from_slice(&v.to_le_bytes());
    }

    #[inline]
    pub fn u32(&mut self, v: u32) {
        self.out.extend_from_slice(&v.to_le_bytes());
    }

    #[inline]
    pub fn point<P: WirePoint>(&mut self, p: P) {
        p.write_le(self.out);
    }

    pub fn points<P: WirePoint>(&mut self, points: &[P]) {
        self.out.reserve(points.len() * P::WIRE_LEN);
        for &p in points {
            p.write_le(self.out);
        }
    }

    /// Writes a point count as `i32`.
    ///
    /// # Panics
    /// Panics if `count` does not fit in an `i32`.
    #[inline]
    pub fn count(&mut self, count: usize) {
        let count = i32::try_from(count)
            .unwrap_or_else(|_| panic!("{count} points do not fit in a single record"));
        self.i32(count);
    }

    pub fn affine2(&mut self, m: &Affine2) {
        for v in m.to_array() {
            self.f32(v);
        }
    }

    pub fn mat4(&mut self, m: &Mat4) {
        for v in m.to_array() {
            self.f32(v);
        }
    }

    /// Copies an opaque style blob byte-for-byte.
    #[inline]
    pub fn pod<T: Pod>(&mut self, v: &T) {
        self.out.extend_from_slice(bytemuck::bytes_of(v));
    }
}

// ── reader ────────────────────────────────────────────────────────────────

/// Cursor over one record payload.
///
/// Every accessor fails with [`StreamError::Truncated`] instead of reading
/// past the payload; [`finish`](Self::finish) rejects trailing bytes.
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    offset: usize,
    tag: i32,
}

impl<'a> ByteReader<'a> {
    #[inline]
    pub(crate) fn new(bytes: &'a [u8], offset: usize, tag: i32) -> Self {
        Self { bytes, pos: 0, offset, tag }
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], StreamError> {
        if self.remaining() < n {
            return Err(StreamError::Truncated { offset: self.offset });
        }
        let chunk = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(chunk)
    }

    #[inline]
    pub fn f32(&mut self) -> Result<f32, StreamError> {
        Ok(le_f32(self.take(4)?, 0))
    }

    #[inline]
    pub fn i32(&mut self) -> Result<i32, StreamError> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    #[inline]
    pub fn u32(&mut self) -> Result<u32, StreamError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    #[inline]
    pub fn point<P: WirePoint>(&mut self) -> Result<P, StreamError> {
        Ok(P::read_le(self.take(P::WIRE_LEN)?))
    }

    /// Reads a point count written by [`ByteWriter::count`], rejecting negatives.
    pub fn count(&mut self) -> Result<usize, StreamError> {
        let raw = self.i32()?;
        usize::try_from(raw).map_err(|_| StreamError::LengthMismatch {
            offset: self.offset,
            tag: self.tag,
            expected: 0,
            actual: self.bytes.len(),
        })
    }

    /// Takes the rest of the payload as exactly `count` packed points.
    ///
    /// The whole payload is consumed; a size mismatch is reported against the
    /// full payload length, i.e. `header + count * point_size`.
    pub fn points<P: WirePoint>(&mut self, count: usize) -> Result<PointSlice<'a, P>, StreamError> {
        let expected = count
            .checked_mul(P::WIRE_LEN)
            .and_then(|n| n.checked_add(self.pos));
        match expected {
            Some(expected) if expected == self.bytes.len() => {
                let rest = self.take(self.remaining())?;
                Ok(PointSlice::new(rest))
            }
            _ => Err(StreamError::LengthMismatch {
                offset: self.offset,
                tag: self.tag,
                expected: expected.unwrap_or(usize::MAX),
                actual: self.bytes.len(),
            }),
        }
    }

    pub fn affine2(&mut self) -> Result<Affine2, StreamError> {
        let mut m = [0.0f32; 6];
        for v in &mut m {
            *v = self.f32()?;
        }
        Ok(Affine2::from_array(m))
    }

    pub fn mat4(&mut self) -> Result<Mat4, StreamError> {
        let mut m = [0.0f32; 16];
        for v in &mut m {
            *v = self.f32()?;
        }
        Ok(Mat4::from_array(m))
    }

    /// Reads an opaque style blob; the payload need not be aligned.
    #[inline]
    pub fn pod<T: Pod>(&mut self) -> Result<T, StreamError> {
        Ok(bytemuck::pod_read_unaligned(self.take(size_of::<T>())?))
    }

    /// Fails unless the whole payload was consumed.
    pub fn finish(self) -> Result<(), StreamError> {
        if self.pos == self.bytes.len() {
            Ok(())
        } else {
            Err(StreamError::LengthMismatch {
                offset: self.offset,
                tag: self.tag,
                expected: self.pos,
                actual: self.bytes.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Color, ColorStyle};

    fn reader(bytes: &[u8]) -> ByteReader<'_> {
        ByteReader::new(bytes, 0, 7)
    }

    #[test]
    fn scalars_are_little_endian() {
        let mut buf = Vec::new();
        let mut w = ByteWriter::new(&mut buf);
        w.i32(-2);
        w.f32(1.0);
        assert_eq!(buf, [0xfe, 0xff, 0xff, 0xff, 0x00, 0x00, 0x80, 0x3f]);
    }

    #[test]
    fn style_blob_survives_unaligned_read() {
        let style = ColorStyle::new(Color::white(), Color::black(), 2.5);
        let mut buf = vec![0u8]; // force misalignment
        ByteWriter::new(&mut buf).pod(&style);
        let mut r = reader(&buf[1..]);
        assert_eq!(r.pod::<ColorStyle>().unwrap(), style);
        r.finish().unwrap();
    }

    #[test]
    fn short_payload_is_truncated() {
        let mut r = reader(&[0, 0]);
        assert_eq!(r.f32(), Err(StreamError::Truncated { offset: 0 }));
    }

    #[test]
    fn trailing_bytes_fail_finish() {
        let mut r = reader(&[0; 6]);
        r.u32().unwrap();
        assert_eq!(
            r.finish(),
            Err(StreamError::LengthMismatch { offset: 0, tag: 7, expected: 4, actual: 6 })
        );
    }

    #[test]
    fn point_slice_requires_exact_length() {
        let mut buf = Vec::new();
        let mut w = ByteWriter::new(&mut buf);
        w.points(&[Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)]);

        let slice = reader(&buf).points::<Vec2>(2).unwrap();
        assert_eq!(slice.len(), 2);
        assert_eq!(slice.get(1), Some(Vec2::new(3.0, 4.0)));
        assert_eq!(slice.get(2), None);
        assert_eq!(slice.centroid(), Some(Vec2::new(2.0, 3.0)));

        assert!(matches!(
            reader(&buf).points::<Vec2>(3),
            Err(StreamError::LengthMismatch { expected: 24, actual: 16, .. })
        ));
    }

    #[test]
    fn negative_count_is_rejected() {
        let mut buf = Vec::new();
        ByteWriter::new(&mut buf).i32(-1);
        assert!(matches!(reader(&buf).count(), Err(StreamError::LengthMismatch { .. })));
    }
}

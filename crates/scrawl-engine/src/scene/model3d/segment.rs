use crate::coords::Vec3;
use crate::scene::wire::{ByteReader, ByteWriter};
use crate::scene::{BoundsContext, StreamError};
use crate::style::LineStyle;

use super::{Model3D, Tag3D};

/// Thick line segment payload.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SegmentCmd {
    pub a: Vec3,
    pub b: Vec3,
    pub diameter: f32,
    pub style: LineStyle,
}

impl SegmentCmd {
    #[inline]
    pub fn new(a: Vec3, b: Vec3, diameter: f32, style: LineStyle) -> Self {
        Self { a, b, diameter, style }
    }

    pub(crate) fn encode(&self, w: &mut ByteWriter<'_>) {
        w.point(self.a);
        w.point(self.b);
        w.f32(self.diameter);
        w.pod(&self.style);
    }

    pub(crate) fn decode(r: &mut ByteReader<'_>) -> Result<Self, StreamError> {
        Ok(Self { a: r.point()?, b: r.point()?, diameter: r.f32()?, style: r.pod()? })
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.a + self.b) * 0.5
    }

    /// Half thickness plus outline.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.diameter * 0.5 + self.style.outline_width
    }

    pub(crate) fn expand_bounds(&self, ctx: &mut BoundsContext<Vec3>) {
        let r = self.radius();
        ctx.add_vertex(self.a, r);
        ctx.add_vertex(self.b, r);
    }
}

impl Model3D {
    /// Records a segment from `a` to `b` with round thickness `diameter`.
    pub fn draw_segment(&mut self, a: Vec3, b: Vec3, diameter: f32, style: &LineStyle) {
        let cmd = SegmentCmd::new(a, b, diameter, *style);
        self.append(Tag3D::Segment, |w| cmd.encode(w));
    }
}

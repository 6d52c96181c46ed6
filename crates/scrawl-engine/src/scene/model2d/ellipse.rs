use crate::coords::Vec2;
use crate::scene::wire::{ByteReader, ByteWriter};
use crate::scene::{BoundsContext, StreamError};
use crate::style::ColorStyle;

use super::{Model2D, Tag2D};

/// Axis-aligned ellipse payload. `width`/`height` are full diameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EllipseCmd {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
    pub style: ColorStyle,
}

impl EllipseCmd {
    #[inline]
    pub fn new(center: Vec2, width: f32, height: f32, style: ColorStyle) -> Self {
        Self { center, width, height, style }
    }

    pub(crate) fn encode(&self, w: &mut ByteWriter<'_>) {
        w.point(self.center);
        w.f32(self.width);
        w.f32(self.height);
        w.pod(&self.style);
    }

    pub(crate) fn decode(r: &mut ByteReader<'_>) -> Result<Self, StreamError> {
        Ok(Self { center: r.point()?, width: r.f32()?, height: r.f32()?, style: r.pod()? })
    }

    /// The four corners of the ellipse's bounding rectangle, each thickened by
    /// the outline.
    pub(crate) fn expand_bounds(&self, ctx: &mut BoundsContext<Vec2>) {
        let h = Vec2::new(self.width.abs() * 0.5, self.height.abs() * 0.5);
        let c = self.center;
        let r = self.style.outline_width;
        for corner in [
            Vec2::new(c.x - h.x, c.y - h.y),
            Vec2::new(c.x + h.x, c.y - h.y),
            Vec2::new(c.x + h.x, c.y + h.y),
            Vec2::new(c.x - h.x, c.y + h.y),
        ] {
            ctx.add_vertex(corner, r);
        }
    }
}

impl Model2D {
    /// Records an axis-aligned ellipse.
    pub fn draw_ellipse(&mut self, center: Vec2, width: f32, height: f32, style: &ColorStyle) {
        let cmd = EllipseCmd::new(center, width, height, *style);
        self.append(Tag2D::Ellipse, |w| cmd.encode(w));
    }
}

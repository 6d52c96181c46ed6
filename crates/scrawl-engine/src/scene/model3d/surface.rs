use crate::coords::Vec3;
use crate::scene::wire::{ByteReader, ByteWriter, PointSlice};
use crate::scene::{BoundsContext, StreamError};
use crate::style::SurfaceStyle;

use super::{Model3D, Tag3D};

/// Surface payload: a vertex fan borrowed from the record bytes.
///
/// Layout: `i32 vertex_count`, `SurfaceStyle`, `vertex_count × Vec3`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SurfaceCmd<'a> {
    pub style: SurfaceStyle,
    pub vertices: PointSlice<'a, Vec3>,
}

impl<'a> SurfaceCmd<'a> {
    pub(crate) fn encode(vertices: &[Vec3], style: &SurfaceStyle, w: &mut ByteWriter<'_>) {
        w.count(vertices.len());
        w.pod(style);
        w.points(vertices);
    }

    pub(crate) fn decode(r: &mut ByteReader<'a>) -> Result<Self, StreamError> {
        let count = r.count()?;
        let style = r.pod()?;
        let vertices = r.points(count)?;
        Ok(Self { style, vertices })
    }

    /// Vertex centroid; `None` for an empty surface.
    #[inline]
    pub fn center(&self) -> Option<Vec3> {
        self.vertices.centroid()
    }

    /// Every vertex thickened by the outline. Empty surfaces add nothing.
    pub(crate) fn expand_bounds(&self, ctx: &mut BoundsContext<Vec3>) {
        let r = self.style.outline_width;
        for v in self.vertices.iter() {
            ctx.add_vertex(v, r);
        }
    }
}

impl Model3D {
    /// Records a surface from a vertex fan.
    pub fn draw_surface(&mut self, vertices: &[Vec3], style: &SurfaceStyle) {
        self.append(Tag3D::Surface, |w| SurfaceCmd::encode(vertices, style, w));
    }
}

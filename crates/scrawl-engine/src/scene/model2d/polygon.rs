use crate::coords::Vec2;
use crate::scene::wire::{ByteReader, ByteWriter, PointSlice};
use crate::scene::{BoundsContext, StreamError};
use crate::style::ColorStyle;

use super::{Model2D, Tag2D};

/// Filled polygon payload.
///
/// Layout: `i32 point_count`, `ColorStyle`, `point_count × Vec2`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PolygonCmd<'a> {
    pub points: PointSlice<'a, Vec2>,
    pub style: ColorStyle,
}

impl<'a> PolygonCmd<'a> {
    pub(crate) fn encode(points: &[Vec2], style: &ColorStyle, w: &mut ByteWriter<'_>) {
        w.count(points.len());
        w.pod(style);
        w.points(points);
    }

    pub(crate) fn decode(r: &mut ByteReader<'a>) -> Result<Self, StreamError> {
        let count = r.count()?;
        let style = r.pod()?;
        let points = r.points(count)?;
        Ok(Self { points, style })
    }

    #[inline]
    pub fn center(&self) -> Option<Vec2> {
        self.points.centroid()
    }

    pub(crate) fn expand_bounds(&self, ctx: &mut BoundsContext<Vec2>) {
        let r = self.style.outline_width;
        for p in self.points.iter() {
            ctx.add_vertex(p, r);
        }
    }
}

impl Model2D {
    /// Records a filled polygon.
    pub fn draw_polygon(&mut self, points: &[Vec2], style: &ColorStyle) {
        self.append(Tag2D::Polygon, |w| PolygonCmd::encode(points, style, w));
    }
}

use crate::coords::Vec2;
use crate::scene::wire::{ByteReader, ByteWriter, PointSlice};
use crate::scene::{BoundsContext, StreamError};
use crate::style::LineStyle;

use super::{Model2D, Tag2D};

/// Polyline payload.
///
/// Layout: `i32 point_count`, `f32 diameter`, `LineStyle`, `point_count × Vec2`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LinesCmd<'a> {
    pub points: PointSlice<'a, Vec2>,
    pub diameter: f32,
    pub style: LineStyle,
}

impl<'a> LinesCmd<'a> {
    pub(crate) fn encode(
        points: &[Vec2],
        diameter: f32,
        style: &LineStyle,
        w: &mut ByteWriter<'_>,
    ) {
        w.count(points.len());
        w.f32(diameter);
        w.pod(style);
        w.points(points);
    }

    pub(crate) fn decode(r: &mut ByteReader<'a>) -> Result<Self, StreamError> {
        let count = r.count()?;
        let diameter = r.f32()?;
        let style = r.pod()?;
        let points = r.points(count)?;
        Ok(Self { points, diameter, style })
    }

    #[inline]
    pub fn center(&self) -> Option<Vec2> {
        self.points.centroid()
    }

    pub(crate) fn expand_bounds(&self, ctx: &mut BoundsContext<Vec2>) {
        let r = self.diameter * 0.5 + self.style.outline_width;
        for p in self.points.iter() {
            ctx.add_vertex(p, r);
        }
    }
}

impl Model2D {
    /// Records a polyline through `points` with thickness `diameter`.
    pub fn draw_lines(&mut self, points: &[Vec2], diameter: f32, style: &LineStyle) {
        self.append(Tag2D::Lines, |w| LinesCmd::encode(points, diameter, style, w));
    }
}

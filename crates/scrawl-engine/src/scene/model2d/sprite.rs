use crate::coords::{Affine2, Vec2};
use crate::scene::wire::{ByteReader, ByteWriter};
use crate::scene::{BoundsContext, StreamError};
use crate::style::SpriteStyle;

use super::{Model2D, Tag2D};

/// Sprite payload. The sprite covers the unit square `[0, 1]²` in its own
/// space; `transform` places it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpriteCmd {
    pub transform: Affine2,
    pub style: SpriteStyle,
}

impl SpriteCmd {
    pub(crate) fn encode(&self, w: &mut ByteWriter<'_>) {
        w.affine2(&self.transform);
        w.pod(&self.style);
    }

    pub(crate) fn decode(r: &mut ByteReader<'_>) -> Result<Self, StreamError> {
        Ok(Self { transform: r.affine2()?, style: r.pod()? })
    }

    /// Unit-square corners in record space.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ]
        .map(|p| self.transform.transform_point(p))
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.transform.transform_point(Vec2::new(0.5, 0.5))
    }

    pub(crate) fn expand_bounds(&self, ctx: &mut BoundsContext<Vec2>) {
        for corner in self.corners() {
            ctx.add_vertex(corner, 0.0);
        }
    }
}

impl Model2D {
    /// Records a sprite mapped onto the unit square under `transform`.
    pub fn draw_sprite(&mut self, transform: &Affine2, style: &SpriteStyle) {
        let cmd = SpriteCmd { transform: *transform, style: *style };
        self.append(Tag2D::Sprite, |w| cmd.encode(w));
    }
}

use crate::coords::Vec3;
use crate::scene::wire::{ByteReader, ByteWriter};
use crate::scene::{BoundsContext, StreamError};
use crate::style::ColorStyle;

use super::{Model3D, Tag3D};

/// Sphere payload.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SphereCmd {
    pub center: Vec3,
    pub diameter: f32,
    pub style: ColorStyle,
}

impl SphereCmd {
    #[inline]
    pub fn new(center: Vec3, diameter: f32, style: ColorStyle) -> Self {
        Self { center, diameter, style }
    }

    pub(crate) fn encode(&self, w: &mut ByteWriter<'_>) {
        w.point(self.center);
        w.f32(self.diameter);
        w.pod(&self.style);
    }

    pub(crate) fn decode(r: &mut ByteReader<'_>) -> Result<Self, StreamError> {
        Ok(Self { center: r.point()?, diameter: r.f32()?, style: r.pod()? })
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.diameter * 0.5 + self.style.outline_width
    }

    pub(crate) fn expand_bounds(&self, ctx: &mut BoundsContext<Vec3>) {
        ctx.add_vertex(self.center, self.radius());
    }
}

impl Model3D {
    /// Records a sphere.
    pub fn draw_sphere(&mut self, center: Vec3, diameter: f32, style: &ColorStyle) {
        let cmd = SphereCmd::new(center, diameter, *style);
        self.append(Tag3D::Sphere, |w| cmd.encode(w));
    }
}

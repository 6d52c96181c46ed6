use crate::coords::{Affine2, Sphere, Vec2};
use crate::scene::wire::{ByteReader, ByteWriter};
use crate::scene::{BoundsContext, RefIndex, RefTable, StreamError};
use crate::style::ColorStyle;

use super::{AssetRef2D, Model2D, Tag2D};

/// Nested 2D asset payload.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AssetCmd2D {
    pub transform: Affine2,
    pub asset: RefIndex,
    pub style: ColorStyle,
}

impl AssetCmd2D {
    pub(crate) fn encode(&self, w: &mut ByteWriter<'_>) {
        w.affine2(&self.transform);
        w.u32(self.asset.0);
        w.pod(&self.style);
    }

    pub(crate) fn decode(r: &mut ByteReader<'_>) -> Result<Self, StreamError> {
        Ok(Self { transform: r.affine2()?, asset: RefIndex(r.u32()?), style: r.pod()? })
    }

    pub fn center(&self, refs: &RefTable<AssetRef2D>) -> Vec2 {
        let asset = refs.get(self.asset);
        let local = match (asset.try_bounding_box(), asset.try_bounding_sphere()) {
            (Some(b), _) if !b.is_empty() => b.center(),
            (_, Some(s)) if !s.is_empty() => s.center,
            _ => Vec2::zero(),
        };
        self.transform.transform_point(local)
    }

    pub(crate) fn expand_bounds(&self, ctx: &mut BoundsContext<Vec2>, refs: &RefTable<AssetRef2D>) {
        let asset = refs.get(self.asset);

        if let Some(b) = asset.try_bounding_box() {
            if b.is_empty() {
                return;
            }
            if self.transform.is_identity() {
                ctx.add_vertex(b.min, 0.0);
                ctx.add_vertex(b.max, 0.0);
            } else {
                for corner in b.corners() {
                    ctx.add_vertex(self.transform.transform_point(corner), 0.0);
                }
            }
        } else if let Some(s) = asset.try_bounding_sphere() {
            if !s.is_empty() {
                let center = self.transform.transform_point(s.center);
                ctx.add_sphere(Sphere::new(center, s.radius * self.transform.uniform_scale()));
            }
        } else {
            log::trace!("2d asset {} reports no bounds; skipped", self.asset);
        }
    }
}

impl Model2D {
    /// Records a reference to `asset` drawn under `transform`.
    pub fn draw_asset(&mut self, transform: &Affine2, asset: &AssetRef2D, style: &ColorStyle) {
        let index = self.add_ref(asset.clone());
        let cmd = AssetCmd2D { transform: *transform, asset: index, style: *style };
        self.append(Tag2D::Asset, |w| cmd.encode(w));
    }
}

use crate::coords::{Mat4, Sphere, Vec3};
use crate::scene::wire::{ByteReader, ByteWriter};
use crate::scene::{BoundsContext, RefIndex, RefTable, StreamError};
use crate::style::ColorStyle;

use super::{AssetRef3D, Model3D, Tag3D};

/// Nested asset payload. The handle itself lives in the reference table.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AssetCmd {
    pub transform: Mat4,
    pub asset: RefIndex,
    pub style: ColorStyle,
}

impl AssetCmd {
    pub(crate) fn encode(&self, w: &mut ByteWriter<'_>) {
        w.mat4(&self.transform);
        w.u32(self.asset.0);
        w.pod(&self.style);
    }

    pub(crate) fn decode(r: &mut ByteReader<'_>) -> Result<Self, StreamError> {
        Ok(Self { transform: r.mat4()?, asset: RefIndex(r.u32()?), style: r.pod()? })
    }

    /// Center of the asset's reported bounds, in record space.
    ///
    /// Falls back to the transformed asset origin when the asset reports nothing.
    pub fn center(&self, refs: &RefTable<AssetRef3D>) -> Vec3 {
        let asset = refs.get(self.asset);
        let local = match (asset.try_bounding_box(), asset.try_bounding_sphere()) {
            (Some(b), _) if !b.is_empty() => b.center(),
            (_, Some(s)) if !s.is_empty() => s.center,
            _ => Vec3::zero(),
        };
        self.transform.transform_point(local)
    }

    /// Box corners when the asset reports a box, else its transformed sphere.
    pub(crate) fn expand_bounds(&self, ctx: &mut BoundsContext<Vec3>, refs: &RefTable<AssetRef3D>) {
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
            log::trace!("asset {} reports no bounds; skipped", self.asset);
        }
    }
}

impl Model3D {
    /// Records a reference to `asset` drawn under `transform`.
    ///
    /// The handle is stored in the reference table; the same handle added
    /// twice occupies two entries.
    pub fn draw_asset(&mut self, transform: &Mat4, asset: &AssetRef3D, style: &ColorStyle) {
        let index = self.add_ref(asset.clone());
        let cmd = AssetCmd { transform: *transform, asset: index, style: *style };
        self.append(Tag3D::Asset, |w| cmd.encode(w));
    }
}

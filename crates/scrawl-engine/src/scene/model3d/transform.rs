use crate::coords::{Mat4, Vec3};
use crate::style::{ColorStyle, LineStyle, SurfaceStyle};

use super::{AssetRef3D, DrawingSink3D};

/// Sink adapter that moves everything drawn through it by `transform`.
///
/// Used by collapse-mode replay so an expanded asset lands where its record
/// placed it. Thicknesses scale by the transform's uniform scale; nested
/// asset transforms are composed.
pub struct TransformedSink3D<'s> {
    inner: &'s mut dyn DrawingSink3D,
    transform: Mat4,
    scale: f32,
    scratch: Vec<Vec3>,
}

impl<'s> TransformedSink3D<'s> {
    pub fn new(inner: &'s mut dyn DrawingSink3D, transform: Mat4) -> Self {
        Self { inner, scale: transform.uniform_scale(), transform, scratch: Vec::new() }
    }
}

impl DrawingSink3D for TransformedSink3D<'_> {
    fn draw_segment(&mut self, a: Vec3, b: Vec3, diameter: f32, style: &LineStyle) {
        let (a, b) = (self.transform.transform_point(a), self.transform.transform_point(b));
        self.inner.draw_segment(a, b, diameter * self.scale, style);
    }

    fn draw_sphere(&mut self, center: Vec3, diameter: f32, style: &ColorStyle) {
        let center = self.transform.transform_point(center);
        self.inner.draw_sphere(center, diameter * self.scale, style);
    }

    fn draw_surface(&mut self, vertices: &[Vec3], style: &SurfaceStyle) {
        self.scratch.clear();
        self.scratch.extend(vertices.iter().map(|&v| self.transform.transform_point(v)));
        self.inner.draw_surface(&self.scratch, style);
    }

    fn draw_asset(&mut self, transform: &Mat4, asset: &AssetRef3D, style: &ColorStyle) {
        self.inner.draw_asset(&transform.then(&self.transform), asset, style);
    }
}

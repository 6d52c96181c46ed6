use std::f32::consts::TAU;

use crate::coords::{Affine2, Vec2};
use crate::style::{ColorStyle, LineStyle, SpriteStyle};

use super::{AssetRef2D, DrawingSink2D};

/// Segments used when an ellipse has to be flattened.
pub const ELLIPSE_SEGMENTS: usize = 32;

/// 2D counterpart of [`TransformedSink3D`](crate::scene::TransformedSink3D).
///
/// Sinks only understand axis-aligned ellipses, so an ellipse under a
/// rotating or shearing transform is flattened to an
/// [`ELLIPSE_SEGMENTS`]-gon first.
pub struct TransformedSink2D<'s> {
    inner: &'s mut dyn DrawingSink2D,
    transform: Affine2,
    scale: f32,
    scratch: Vec<Vec2>,
}

impl<'s> TransformedSink2D<'s> {
    pub fn new(inner: &'s mut dyn DrawingSink2D, transform: Affine2) -> Self {
        Self { inner, scale: transform.uniform_scale(), transform, scratch: Vec::new() }
    }

    fn transform_into_scratch(&mut self, points: &[Vec2]) {
        self.scratch.clear();
        self.scratch.extend(points.iter().map(|&p| self.transform.transform_point(p)));
    }
}

impl DrawingSink2D for TransformedSink2D<'_> {
    fn draw_polygon(&mut self, points: &[Vec2], style: &ColorStyle) {
        self.transform_into_scratch(points);
        self.inner.draw_polygon(&self.scratch, style);
    }

    fn draw_lines(&mut self, points: &[Vec2], diameter: f32, style: &LineStyle) {
        self.transform_into_scratch(points);
        self.inner.draw_lines(&self.scratch, diameter * self.scale, style);
    }

    fn draw_ellipse(&mut self, center: Vec2, width: f32, height: f32, style: &ColorStyle) {
        let t = &self.transform;
        if t.is_axis_aligned() {
            let size = t.transform_vector(Vec2::new(width, height));
            self.inner.draw_ellipse(t.transform_point(center), size.x.abs(), size.y.abs(), style);
            return;
        }

        let (rx, ry) = (width * 0.5, height * 0.5);
        self.scratch.clear();
        self.scratch.extend((0..ELLIPSE_SEGMENTS).map(|i| {
            let a = i as f32 * TAU / ELLIPSE_SEGMENTS as f32;
            t.transform_point(Vec2::new(center.x + rx * a.cos(), center.y + ry * a.sin()))
        }));
        self.inner.draw_polygon(&self.scratch, style);
    }

    fn draw_sprite(&mut self, transform: &Affine2, style: &SpriteStyle) {
        self.inner.draw_sprite(&transform.then(&self.transform), style);
    }

    fn draw_asset(&mut self, transform: &Affine2, asset: &AssetRef2D, style: &ColorStyle) {
        self.inner.draw_asset(&transform.then(&self.transform), asset, style);
    }
}

use bytemuck::{Pod, Zeroable};

use super::Color;

/// Fill + outline style for closed shapes (spheres, polygons, ellipses, assets).
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct ColorStyle {
    pub fill: Color,
    pub outline: Color,
    /// Outline thickness in model units, drawn outside the shape.
    pub outline_width: f32,
}

impl ColorStyle {
    #[inline]
    pub const fn new(fill: Color, outline: Color, outline_width: f32) -> Self {
        Self { fill, outline, outline_width }
    }

    /// Fill only, no outline.
    #[inline]
    pub const fn solid(fill: Color) -> Self {
        Self::new(fill, Color::transparent(), 0.0)
    }
}

/// End-cap shape of a stroked line.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[repr(u32)]
pub enum LineCap {
    #[default]
    Butt = 0,
    Round = 1,
    Square = 2,
}

impl LineCap {
    #[inline]
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(LineCap::Butt),
            1 => Some(LineCap::Round),
            2 => Some(LineCap::Square),
            _ => None,
        }
    }
}

/// Stroke style for segments and polylines.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct LineStyle {
    pub color: Color,
    pub outline: Color,
    pub outline_width: f32,
    /// Raw [`LineCap`] value; kept as `u32` so the struct stays `Pod`.
    pub cap: u32,
}

impl LineStyle {
    #[inline]
    pub const fn new(color: Color, cap: LineCap) -> Self {
        Self { color, outline: Color::transparent(), outline_width: 0.0, cap: cap as u32 }
    }

    #[inline]
    pub const fn with_outline(mut self, outline: Color, width: f32) -> Self {
        self.outline = outline;
        self.outline_width = width;
        self
    }

    /// Decoded cap; unknown raw values fall back to `Butt`.
    #[inline]
    pub fn line_cap(&self) -> LineCap {
        LineCap::from_raw(self.cap).unwrap_or_default()
    }
}

/// Style for triangle-fan surfaces.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct SurfaceStyle {
    pub front: Color,
    pub back: Color,
    pub outline: Color,
    pub outline_width: f32,
    pub flags: u32,
}

impl SurfaceStyle {
    /// Renderer hint: interpolate normals across the fan.
    pub const SMOOTH: u32 = 1 << 0;

    #[inline]
    pub const fn two_sided(color: Color) -> Self {
        Self {
            front: color,
            back: color,
            outline: Color::transparent(),
            outline_width: 0.0,
            flags: 0,
        }
    }
}

/// Style for image sprites. `source` is a normalized `[x, y, w, h]` sub-rect
/// of whatever image the backend associates with the sprite.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SpriteStyle {
    pub tint: Color,
    pub source: [f32; 4],
    pub flags: u32,
}

impl SpriteStyle {
    /// Renderer hint: sample with nearest-neighbour filtering.
    pub const NEAREST: u32 = 1 << 0;
}

impl Default for SpriteStyle {
    fn default() -> Self {
        Self { tint: Color::white(), source: [0.0, 0.0, 1.0, 1.0], flags: 0 }
    }
}

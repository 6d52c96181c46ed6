//! 2D command stream: polygons, polylines, ellipses, sprites and nested assets.
//!
//! Mirrors [`model3d`](super::model3d) record for record; only the payloads
//! and the transform type differ.

mod asset;
mod drawable;
mod ellipse;
mod lines;
mod model;
mod polygon;
mod sprite;
mod transform;

#[cfg(test)]
mod tests;

use core::fmt;
use std::sync::Arc;

use crate::coords::{Affine2, Vec2};
use crate::style::{ColorStyle, LineStyle, SpriteStyle};

use super::buffer::RawRecord;
use super::{BoundsContext, BoundsProvider, RefTable, StreamError};

pub use asset::AssetCmd2D;
pub use drawable::{drawable_bounds, with_scratch_model, Drawable2D, DrawableAsset};
pub use ellipse::EllipseCmd;
pub use lines::LinesCmd;
pub use model::Model2D;
pub use polygon::PolygonCmd;
pub use sprite::SpriteCmd;
pub use transform::{TransformedSink2D, ELLIPSE_SEGMENTS};

/// Record tags of the 2D stream.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(i32)]
pub enum Tag2D {
    Polygon = 1,
    Lines = 2,
    Ellipse = 3,
    Sprite = 4,
    Asset = 5,
}

impl Tag2D {
    #[inline]
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            1 => Some(Tag2D::Polygon),
            2 => Some(Tag2D::Lines),
            3 => Some(Tag2D::Ellipse),
            4 => Some(Tag2D::Sprite),
            5 => Some(Tag2D::Asset),
            _ => None,
        }
    }

    #[inline]
    pub const fn raw(self) -> i32 {
        self as i32
    }
}

/// Backend entry points a 2D stream replays into.
pub trait DrawingSink2D {
    fn draw_polygon(&mut self, points: &[Vec2], style: &ColorStyle);

    fn draw_lines(&mut self, points: &[Vec2], diameter: f32, style: &LineStyle);

    fn draw_ellipse(&mut self, center: Vec2, width: f32, height: f32, style: &ColorStyle);

    fn draw_sprite(&mut self, transform: &Affine2, style: &SpriteStyle);

    fn draw_asset(&mut self, transform: &Affine2, asset: &AssetRef2D, style: &ColorStyle);
}

/// An opaque 2D asset a stream can reference. See [`Asset3D`](super::Asset3D).
pub trait Asset2D: BoundsProvider<Vec2> + fmt::Debug + Send + Sync {
    fn expand(&self, sink: &mut dyn DrawingSink2D, style: &ColorStyle);
}

pub type AssetRef2D = Arc<dyn Asset2D>;

/// One decoded 2D record.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Primitive2D<'a> {
    Polygon(PolygonCmd<'a>),
    Lines(LinesCmd<'a>),
    Ellipse(EllipseCmd),
    Sprite(SpriteCmd),
    Asset(AssetCmd2D),
}

impl<'a> Primitive2D<'a> {
    pub fn decode(record: RawRecord<'a>) -> Result<Self, StreamError> {
        let tag = Tag2D::from_raw(record.tag)
            .ok_or(StreamError::UnknownTag { offset: record.offset, tag: record.tag })?;

        let mut r = record.reader();
        let primitive = match tag {
            Tag2D::Polygon => Primitive2D::Polygon(PolygonCmd::decode(&mut r)?),
            Tag2D::Lines => Primitive2D::Lines(LinesCmd::decode(&mut r)?),
            Tag2D::Ellipse => Primitive2D::Ellipse(EllipseCmd::decode(&mut r)?),
            Tag2D::Sprite => Primitive2D::Sprite(SpriteCmd::decode(&mut r)?),
            Tag2D::Asset => Primitive2D::Asset(AssetCmd2D::decode(&mut r)?),
        };
        r.finish()?;
        Ok(primitive)
    }

    pub fn tag(&self) -> Tag2D {
        match self {
            Primitive2D::Polygon(_) => Tag2D::Polygon,
            Primitive2D::Lines(_) => Tag2D::Lines,
            Primitive2D::Ellipse(_) => Tag2D::Ellipse,
            Primitive2D::Sprite(_) => Tag2D::Sprite,
            Primitive2D::Asset(_) => Tag2D::Asset,
        }
    }

    /// `None` for polygons and polylines without points.
    pub fn center(&self, refs: &RefTable<AssetRef2D>) -> Option<Vec2> {
        match self {
            Primitive2D::Polygon(c) => c.center(),
            Primitive2D::Lines(c) => c.center(),
            Primitive2D::Ellipse(c) => Some(c.center),
            Primitive2D::Sprite(c) => Some(c.center()),
            Primitive2D::Asset(c) => Some(c.center(refs)),
        }
    }

    pub fn expand_bounds(&self, ctx: &mut BoundsContext<Vec2>, refs: &RefTable<AssetRef2D>) {
        match self {
            Primitive2D::Polygon(c) => c.expand_bounds(ctx),
            Primitive2D::Lines(c) => c.expand_bounds(ctx),
            Primitive2D::Ellipse(c) => c.expand_bounds(ctx),
            Primitive2D::Sprite(c) => c.expand_bounds(ctx),
            Primitive2D::Asset(c) => c.expand_bounds(ctx, refs),
        }
    }

    pub(crate) fn replay(
        &self,
        sink: &mut dyn DrawingSink2D,
        refs: &RefTable<AssetRef2D>,
        collapse: bool,
        scratch: &mut Vec<Vec2>,
    ) {
        match self {
            Primitive2D::Polygon(c) => {
                c.points.decode_into(scratch);
                sink.draw_polygon(scratch, &c.style);
            }
            Primitive2D::Lines(c) => {
                c.points.decode_into(scratch);
                sink.draw_lines(scratch, c.diameter, &c.style);
            }
            Primitive2D::Ellipse(c) => sink.draw_ellipse(c.center, c.width, c.height, &c.style),
            Primitive2D::Sprite(c) => sink.draw_sprite(&c.transform, &c.style),
            Primitive2D::Asset(c) => {
                let asset = refs.get(c.asset);
                if !collapse {
                    sink.draw_asset(&c.transform, asset, &c.style);
                } else if c.transform.is_identity() {
                    asset.expand(sink, &c.style);
                } else {
                    asset.expand(&mut TransformedSink2D::new(sink, c.transform), &c.style);
                }
            }
        }
    }
}

impl fmt::Display for Primitive2D<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive2D::Polygon(c) => write!(f, "polygon with {} points", c.points.len()),
            Primitive2D::Lines(c) => {
                write!(f, "lines with {} points diameter {}", c.points.len(), c.diameter)
            }
            Primitive2D::Ellipse(c) => {
                write!(f, "ellipse {} size {}x{}", c.center, c.width, c.height)
            }
            Primitive2D::Sprite(c) => write!(f, "sprite transform {}", c.transform),
            Primitive2D::Asset(c) => write!(f, "asset {} transform {}", c.asset, c.transform),
        }
    }
}

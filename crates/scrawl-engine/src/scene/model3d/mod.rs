//! 3D command stream: segments, spheres, surfaces and nested assets.
//!
//! Extending the stream:
//! - add a payload module here with its `…Cmd` codec and `Model3D::draw_*` helper
//! - add a [`Tag3D`] value and a [`Primitive3D`] variant
//! - add the matching entry point to [`DrawingSink3D`]

mod asset;
mod model;
mod segment;
mod sphere;
mod surface;
mod transform;


use core::fmt;
use std::sync::Arc;

use crate::coords::{Mat4, Vec3};
use crate::style::{ColorStyle, LineStyle, SurfaceStyle};

use super::buffer::RawRecord;
use super::{BoundsContext, BoundsProvider, RefTable, StreamError};

pub use asset::AssetCmd;
pub use model::Model3D;
pub use segment::SegmentCmd;
pub use sphere::SphereCmd;
pub use surface::SurfaceCmd;
pub use transform::TransformedSink3D;

/// Record tags of the 3D stream (the `i32` after each size field).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(i32)]
pub enum Tag3D {
    Segment = 1,
    Sphere = 2,
    Surface = 3,
    Asset = 4,
}

impl Tag3D {
    #[inline]
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            1 => Some(Tag3D::Segment),
            2 => Some(Tag3D::Sphere),
            3 => Some(Tag3D::Surface),
            4 => Some(Tag3D::Asset),
            _ => None,
        }
    }

    #[inline]
    pub const fn raw(self) -> i32 {
        self as i32
    }
}

/// Backend entry points a 3D stream replays into.
///
/// Arguments are exactly what the matching `draw_*` call recorded.
pub trait DrawingSink3D {
    fn draw_segment(&mut self, a: Vec3, b: Vec3, diameter: f32, style: &LineStyle);

    fn draw_sphere(&mut self, center: Vec3, diameter: f32, style: &ColorStyle);

    fn draw_surface(&mut self, vertices: &[Vec3], style: &SurfaceStyle);

    fn draw_asset(&mut self, transform: &Mat4, asset: &AssetRef3D, style: &ColorStyle);
}

/// An opaque 3D asset a stream can reference.
///
/// Bounds come from [`BoundsProvider`]; [`expand`](Asset3D::expand) is the
/// collapse-mode hook that draws the asset's own primitives into `sink`,
/// which already applies the referencing record's transform.
pub trait Asset3D: BoundsProvider<Vec3> + fmt::Debug + Send + Sync {
    fn expand(&self, sink: &mut dyn DrawingSink3D, style: &ColorStyle);
}

/// Shared handle stored in a 3D reference table.
pub type AssetRef3D = Arc<dyn Asset3D>;

/// One decoded 3D record. Vertex lists borrow from the stream.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Primitive3D<'a> {
    Segment(SegmentCmd),
    Sphere(SphereCmd),
    Surface(SurfaceCmd<'a>),
    Asset(AssetCmd),
}

impl<'a> Primitive3D<'a> {
    /// Decodes a framed record, validating tag and exact payload length.
    pub fn decode(record: RawRecord<'a>) -> Result<Self, StreamError> {
        let tag = Tag3D::from_raw(record.tag)
            .ok_or(StreamError::UnknownTag { offset: record.offset, tag: record.tag })?;

        let mut r = record.reader();
        let primitive = match tag {
            Tag3D::Segment => Primitive3D::Segment(SegmentCmd::decode(&mut r)?),
            Tag3D::Sphere => Primitive3D::Sphere(SphereCmd::decode(&mut r)?),
            Tag3D::Surface => Primitive3D::Surface(SurfaceCmd::decode(&mut r)?),
            Tag3D::Asset => Primitive3D::Asset(AssetCmd::decode(&mut r)?),
        };
        r.finish()?;
        Ok(primitive)
    }

    pub fn tag(&self) -> Tag3D {
        match self {
            Primitive3D::Segment(_) => Tag3D::Segment,
            Primitive3D::Sphere(_) => Tag3D::Sphere,
            Primitive3D::Surface(_) => Tag3D::Surface,
            Primitive3D::Asset(_) => Tag3D::Asset,
        }
    }

    /// Representative point used for draw ordering; `None` for empty surfaces.
    pub fn center(&self, refs: &RefTable<AssetRef3D>) -> Option<Vec3> {
        match self {
            Primitive3D::Segment(c) => Some(c.center()),
            Primitive3D::Sphere(c) => Some(c.center),
            Primitive3D::Surface(c) => c.center(),
            Primitive3D::Asset(c) => Some(c.center(refs)),
        }
    }

    pub fn expand_bounds(&self, ctx: &mut BoundsContext<Vec3>, refs: &RefTable<AssetRef3D>) {
        match self {
            Primitive3D::Segment(c) => c.expand_bounds(ctx),
            Primitive3D::Sphere(c) => c.expand_bounds(ctx),
            Primitive3D::Surface(c) => c.expand_bounds(ctx),
            Primitive3D::Asset(c) => c.expand_bounds(ctx, refs),
        }
    }

    /// Dispatches to `sink`. `scratch` holds decoded vertices between calls.
    pub(crate) fn replay(
        &self,
        sink: &mut dyn DrawingSink3D,
        refs: &RefTable<AssetRef3D>,
        collapse: bool,
        scratch: &mut Vec<Vec3>,
    ) {
        match self {
            Primitive3D::Segment(c) => sink.draw_segment(c.a, c.b, c.diameter, &c.style),
            Primitive3D::Sphere(c) => sink.draw_sphere(c.center, c.diameter, &c.style),
            Primitive3D::Surface(c) => {
                c.vertices.decode_into(scratch);
                sink.draw_surface(scratch, &c.style);
            }
            Primitive3D::Asset(c) => {
                let asset = refs.get(c.asset);
                if !collapse {
                    sink.draw_asset(&c.transform, asset, &c.style);
                } else if c.transform.is_identity() {
                    asset.expand(sink, &c.style);
                } else {
                    asset.expand(&mut TransformedSink3D::new(sink, c.transform), &c.style);
                }
            }
        }
    }
}

impl fmt::Display for Primitive3D<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive3D::Segment(c) => {
                write!(f, "segment {} -> {} diameter {}", c.a, c.b, c.diameter)
            }
            Primitive3D::Sphere(c) => write!(f, "sphere {} diameter {}", c.center, c.diameter),
            Primitive3D::Surface(c) => write!(f, "surface with {} vertices", c.vertices.len()),
            Primitive3D::Asset(c) => write!(f, "asset {} transform {}", c.asset, c.transform),
        }
    }
}

//! Deferred-drawing command streams.
//!
//! Responsibilities:
//! - store heterogeneous draw records in one append-only byte buffer
//! - keep non-inlineable payload (asset handles) in a side reference table
//! - measure bounds, resequence for drawing, replay into sinks
//! - cache derived values per version and invalidate them on mutation
//!
//! Layering, leaves first: `buffer` (framing) → `refs` → `wire` (field codecs)
//! → per-kind payload modules under `model3d` / `model2d` → `bounds`, `order`
//! → `stream` (version + cache) → `Model3D` / `Model2D`.

mod bounds;
mod buffer;
mod error;
mod order;
mod refs;
mod stream;
mod wire;

pub mod model2d;
pub mod model3d;

pub use bounds::{BoundsContext, BoundsProvider};
pub use buffer::{RawRecord, RecordBuffer, Records, RECORD_HEADER_LEN};
pub use error::StreamError;
pub use model2d::{
    Asset2D, AssetRef2D, Drawable2D, DrawableAsset, DrawingSink2D, Model2D, Primitive2D, Tag2D,
    TransformedSink2D,
};
pub use model3d::{
    Asset3D, AssetRef3D, DrawingSink3D, Model3D, Primitive3D, Tag3D, TransformedSink3D,
};
pub use order::DrawOrderKey;
pub use refs::{RefHandle, RefIndex, RefTable};
pub use stream::{ModelId, ModelKey};
pub use wire::{ByteReader, ByteWriter, PointSlice, WirePoint};

//! Style payloads carried by draw records.
//!
//! Scope:
//! - premultiplied [`Color`]
//! - fixed-size style blobs (`ColorStyle`, `LineStyle`, `SurfaceStyle`, `SpriteStyle`)
//!
//! Every payload is `#[repr(C)]` + `bytemuck::Pod`, so records copy them
//! byte-for-byte. The command log only reads `outline_width` (to grow bounds);
//! everything else is passed through to sinks untouched.

mod color;
mod payload;

pub use color::Color;
pub use payload::{ColorStyle, LineCap, LineStyle, SpriteStyle, SurfaceStyle};

//! Scrawl engine crate.
//!
//! Deferred drawing: record 3D and 2D primitives into compact command
//! streams, measure them, resequence them and replay them into any backend.

pub mod logging;
pub mod coords;
pub mod style;
pub mod scene;

use std::sync::Arc;

use crate::coords::{Aabb, Affine2, Sphere, Vec2};
use crate::scene::error::expect_intact;
use crate::scene::order::order_offsets;
use crate::scene::stream::CommandStream;
use crate::scene::wire::ByteWriter;
use crate::scene::{BoundsContext, BoundsProvider, ModelKey, RefIndex, StreamError};
use crate::style::{ColorStyle, LineStyle, SpriteStyle};

use super::{Asset2D, AssetRef2D, DrawingSink2D, Primitive2D, Tag2D};

/// Recorded 2D drawing. Same contract as [`Model3D`](crate::scene::Model3D).
#[derive(Debug, Clone)]
pub struct Model2D {
    stream: CommandStream<AssetRef2D, Vec2>,
}

impl Model2D {
    #[inline]
    pub fn new() -> Self {
        Self { stream: CommandStream::new() }
    }

    #[inline]
    pub fn with_capacity(bytes: usize, refs: usize) -> Self {
        Self { stream: CommandStream::with_capacity(bytes, refs) }
    }

    // ── mutation ──────────────────────────────────────────────────────────

    pub fn clear(&mut self) {
        self.stream.clear();
    }

    pub(super) fn append(&mut self, tag: Tag2D, write: impl FnOnce(&mut ByteWriter<'_>)) -> usize {
        self.stream.append(tag.raw(), write)
    }

    pub(super) fn add_ref(&mut self, asset: AssetRef2D) -> RefIndex {
        self.stream.add_ref(asset)
    }

    pub fn draw_model(&mut self, transform: &Affine2, model: &Arc<Model2D>, style: &ColorStyle) {
        let asset: AssetRef2D = model.clone();
        self.draw_asset(transform, &asset, style);
    }

    // ── inspection ────────────────────────────────────────────────────────

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stream.buffer().is_empty()
    }

    #[inline]
    pub fn byte_len(&self) -> usize {
        self.stream.buffer().len()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.stream.buffer().as_bytes()
    }

    pub fn record_count(&self) -> usize {
        self.stream.buffer().records().count()
    }

    #[inline]
    pub fn asset(&self, index: RefIndex) -> Option<&AssetRef2D> {
        self.stream.refs().try_get(index)
    }

    #[inline]
    pub fn asset_count(&self) -> usize {
        self.stream.refs().len()
    }

    pub fn offsets(&self) -> impl Iterator<Item = usize> + '_ {
        self.stream.buffer().records().map(|r| expect_intact(r).offset)
    }

    /// # Panics
    /// Panics if the stream is corrupt.
    pub fn records(&self) -> impl Iterator<Item = (usize, Primitive2D<'_>)> + '_ {
        self.stream.buffer().records().map(|r| {
            let record = expect_intact(r);
            (record.offset, expect_intact(Primitive2D::decode(record)))
        })
    }

    /// # Panics
    /// Panics if `offset` is not a record start of this model.
    pub fn primitive_at(&self, offset: usize) -> Primitive2D<'_> {
        let record = expect_intact(self.stream.buffer().record_at(offset));
        expect_intact(Primitive2D::decode(record))
    }

    pub fn center_of(&self, offset: usize) -> Option<Vec2> {
        self.primitive_at(offset).center(self.stream.refs())
    }

    pub fn validate(&self) -> Result<usize, StreamError> {
        let refs = self.stream.refs();
        let mut count = 0;
        for record in self.stream.buffer().records() {
            let record = record?;
            if let Primitive2D::Asset(cmd) = Primitive2D::decode(record)? {
                if refs.try_get(cmd.asset).is_none() {
                    return Err(StreamError::BadReference {
                        offset: record.offset,
                        index: cmd.asset.0,
                        len: refs.len(),
                    });
                }
            }
            count += 1;
        }
        log::debug!("model2d validated: {count} records, {} bytes", self.byte_len());
        Ok(count)
    }

    pub fn log_records(&self) {
        for (offset, primitive) in self.records() {
            log::debug!("{offset:>8}  {primitive}");
        }
    }

    // ── version key / cached bounds ───────────────────────────────────────

    #[inline]
    pub fn key(&self) -> ModelKey {
        self.stream.key()
    }

    #[inline]
    pub fn is_current(&self, key: ModelKey) -> bool {
        self.stream.is_current(key)
    }

    pub fn bounds(&self) -> BoundsContext<Vec2> {
        self.stream.bounds(|stream| {
            let mut ctx = BoundsContext::new();
            for record in stream.buffer().records() {
                let primitive = expect_intact(Primitive2D::decode(expect_intact(record)));
                primitive.expand_bounds(&mut ctx, stream.refs());
            }
            ctx
        })
    }

    pub fn bounds_for(&self, key: ModelKey) -> Option<BoundsContext<Vec2>> {
        self.is_current(key).then(|| self.bounds())
    }

    #[inline]
    pub fn bounding_box(&self) -> Aabb<Vec2> {
        self.bounds().aabb
    }

    #[inline]
    pub fn bounding_sphere(&self) -> Sphere<Vec2> {
        self.bounds().sphere
    }

    #[inline]
    pub fn content_hash(&self) -> u64 {
        self.stream.content_hash()
    }

    // ── draw order ────────────────────────────────────────────────────────

    /// Record offsets sorted by `score(center)` ascending, ties in append order.
    pub fn order_by(&self, score: impl FnMut(Vec2) -> f32) -> Vec<usize> {
        let refs = self.stream.refs();
        order_offsets(self.records().map(|(offset, p)| (offset, p.center(refs))), score)
    }

    // ── replay ────────────────────────────────────────────────────────────

    pub fn draw_to(&self, sink: &mut dyn DrawingSink2D, collapse: bool) {
        let refs = self.stream.refs();
        let mut scratch = Vec::new();
        for (_, primitive) in self.records() {
            primitive.replay(sink, refs, collapse, &mut scratch);
        }
    }

    pub fn draw_one(&self, sink: &mut dyn DrawingSink2D, offset: usize, collapse: bool) -> usize {
        self.replay_at(sink, offset, collapse, &mut Vec::new())
    }

    pub fn draw_ordered(&self, sink: &mut dyn DrawingSink2D, offsets: &[usize], collapse: bool) {
        let mut scratch = Vec::new();
        for &offset in offsets {
            self.replay_at(sink, offset, collapse, &mut scratch);
        }
    }

    fn replay_at(
        &self,
        sink: &mut dyn DrawingSink2D,
        offset: usize,
        collapse: bool,
        scratch: &mut Vec<Vec2>,
    ) -> usize {
        let record = expect_intact(self.stream.buffer().record_at(offset));
        let primitive = expect_intact(Primitive2D::decode(record));
        primitive.replay(sink, self.stream.refs(), collapse, scratch);
        record.byte_len()
    }
}

impl Default for Model2D {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingSink2D for Model2D {
    fn draw_polygon(&mut self, points: &[Vec2], style: &ColorStyle) {
        Model2D::draw_polygon(self, points, style);
    }

    fn draw_lines(&mut self, points: &[Vec2], diameter: f32, style: &LineStyle) {
        Model2D::draw_lines(self, points, diameter, style);
    }

    fn draw_ellipse(&mut self, center: Vec2, width: f32, height: f32, style: &ColorStyle) {
        Model2D::draw_ellipse(self, center, width, height, style);
    }

    fn draw_sprite(&mut self, transform: &Affine2, style: &SpriteStyle) {
        Model2D::draw_sprite(self, transform, style);
    }

    fn draw_asset(&mut self, transform: &Affine2, asset: &AssetRef2D, style: &ColorStyle) {
        Model2D::draw_asset(self, transform, asset, style);
    }
}

impl BoundsProvider<Vec2> for Model2D {
    fn try_bounding_box(&self) -> Option<Aabb<Vec2>> {
        let b = self.bounding_box();
        (!b.is_empty()).then_some(b)
    }

    fn try_bounding_sphere(&self) -> Option<Sphere<Vec2>> {
        let s = self.bounding_sphere();
        (!s.is_empty()).then_some(s)
    }
}

impl Asset2D for Model2D {
    fn expand(&self, sink: &mut dyn DrawingSink2D, _style: &ColorStyle) {
        self.draw_to(sink, true);
    }
}

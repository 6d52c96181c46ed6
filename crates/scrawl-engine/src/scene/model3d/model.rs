use std::sync::Arc;

use crate::coords::{Aabb, Mat4, Sphere, Vec3};
use crate::scene::error::expect_intact;
use crate::scene::order::order_offsets;
use crate::scene::stream::CommandStream;
use crate::scene::wire::ByteWriter;
use crate::scene::{BoundsContext, BoundsProvider, ModelKey, RefIndex, StreamError};
use crate::style::{ColorStyle, LineStyle, SurfaceStyle};

use super::{Asset3D, AssetRef3D, DrawingSink3D, Primitive3D, Tag3D};

/// Recorded 3D drawing: the public face of a 3D command stream.
///
/// - `draw_*` appends one record (see the payload modules for each kind)
/// - bounds and content hash are computed lazily and cached until the next mutation
/// - [`draw_to`](Self::draw_to) replays into any [`DrawingSink3D`]
///
/// A `Model3D` is itself a sink (replaying into one records a copy) and an
/// [`Asset3D`], so models nest by reference through `Arc`.
///
/// Mutation needs `&mut self`; replay and bounds queries only need `&self`
/// and may run from several threads at once.
#[derive(Debug, Clone)]
pub struct Model3D {
    stream: CommandStream<AssetRef3D, Vec3>,
}

impl Model3D {
    #[inline]
    pub fn new() -> Self {
        Self { stream: CommandStream::new() }
    }

    /// Pre-sizes the record buffer (`bytes`) and reference table (`refs`).
    #[inline]
    pub fn with_capacity(bytes: usize, refs: usize) -> Self {
        Self { stream: CommandStream::with_capacity(bytes, refs) }
    }

    // ── mutation ──────────────────────────────────────────────────────────

    /// Drops every record and asset handle. Keeps buffer capacity.
    pub fn clear(&mut self) {
        self.stream.clear();
    }

    pub(super) fn append(&mut self, tag: Tag3D, write: impl FnOnce(&mut ByteWriter<'_>)) -> usize {
        self.stream.append(tag.raw(), write)
    }

    pub(super) fn add_ref(&mut self, asset: AssetRef3D) -> RefIndex {
        self.stream.add_ref(asset)
    }

    /// Records a nested model (convenience over [`draw_asset`](Self::draw_asset)).
    pub fn draw_model(&mut self, transform: &Mat4, model: &Arc<Model3D>, style: &ColorStyle) {
        let asset: AssetRef3D = model.clone();
        self.draw_asset(transform, &asset, style);
    }

    // ── inspection ────────────────────────────────────────────────────────

    /// True when nothing has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stream.buffer().is_empty()
    }

    /// Encoded size of the stream in bytes.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.stream.buffer().len()
    }

    /// Raw wire bytes, for diagnostics.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.stream.buffer().as_bytes()
    }

    /// Number of records (walks the stream).
    pub fn record_count(&self) -> usize {
        self.stream.buffer().records().count()
    }

    #[inline]
    pub fn asset(&self, index: RefIndex) -> Option<&AssetRef3D> {
        self.stream.refs().try_get(index)
    }

    #[inline]
    pub fn asset_count(&self) -> usize {
        self.stream.refs().len()
    }

    /// Record start offsets in append order.
    pub fn offsets(&self) -> impl Iterator<Item = usize> + '_ {
        self.stream.buffer().records().map(|r| expect_intact(r).offset)
    }

    /// Decoded records in append order.
    ///
    /// # Panics
    /// Panics if the stream is corrupt.
    pub fn records(&self) -> impl Iterator<Item = (usize, Primitive3D<'_>)> + '_ {
        self.stream.buffer().records().map(|r| {
            let record = expect_intact(r);
            (record.offset, expect_intact(Primitive3D::decode(record)))
        })
    }

    /// Decodes the record at `offset`.
    ///
    /// # Panics
    /// Panics if `offset` is not a record start of this model.
    pub fn primitive_at(&self, offset: usize) -> Primitive3D<'_> {
        let record = expect_intact(self.stream.buffer().record_at(offset));
        expect_intact(Primitive3D::decode(record))
    }

    /// Center of the record at `offset`, as used by [`order_by`](Self::order_by).
    pub fn center_of(&self, offset: usize) -> Option<Vec3> {
        self.primitive_at(offset).center(self.stream.refs())
    }

    /// Walks the whole stream and checks framing, tags, payload lengths and
    /// asset references. Returns the record count.
    pub fn validate(&self) -> Result<usize, StreamError> {
        let refs = self.stream.refs();
        let mut count = 0;
        for record in self.stream.buffer().records() {
            let record = record?;
            if let Primitive3D::Asset(cmd) = Primitive3D::decode(record)? {
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
        log::debug!("model3d validated: {count} records, {} bytes", self.byte_len());
        Ok(count)
    }

    /// Writes the human-readable debug view at `debug` level.
    pub fn log_records(&self) {
        for (offset, primitive) in self.records() {
            log::debug!("{offset:>8}  {primitive}");
        }
    }

    // ── version key / cached bounds ───────────────────────────────────────

    /// Cache token for the current contents.
    #[inline]
    pub fn key(&self) -> ModelKey {
        self.stream.key()
    }

    /// True when `key` was taken from this model and nothing changed since.
    #[inline]
    pub fn is_current(&self, key: ModelKey) -> bool {
        self.stream.is_current(key)
    }

    /// AABB + bounding sphere of everything recorded.
    ///
    /// Computed by one full walk on first access after a mutation, then cached.
    pub fn bounds(&self) -> BoundsContext<Vec3> {
        self.stream.bounds(|stream| {
            let mut ctx = BoundsContext::new();
            for record in stream.buffer().records() {
                let primitive = expect_intact(Primitive3D::decode(expect_intact(record)));
                primitive.expand_bounds(&mut ctx, stream.refs());
            }
            ctx
        })
    }

    /// Bounds for `key`, or `None` if the key is stale or from another model.
    pub fn bounds_for(&self, key: ModelKey) -> Option<BoundsContext<Vec3>> {
        self.is_current(key).then(|| self.bounds())
    }

    /// `(+∞, −∞)` corners when empty.
    #[inline]
    pub fn bounding_box(&self) -> Aabb<Vec3> {
        self.bounds().aabb
    }

    /// Radius `-1` when empty.
    #[inline]
    pub fn bounding_sphere(&self) -> Sphere<Vec3> {
        self.bounds().sphere
    }

    /// Best-effort hash of record bytes and asset identities; cached like bounds.
    #[inline]
    pub fn content_hash(&self) -> u64 {
        self.stream.content_hash()
    }

    // ── draw order ────────────────────────────────────────────────────────

    /// Record offsets sorted by `score(center)` ascending, ties in append order.
    ///
    /// For back-to-front drawing score by negated view depth.
    pub fn order_by(&self, score: impl FnMut(Vec3) -> f32) -> Vec<usize> {
        let refs = self.stream.refs();
        order_offsets(self.records().map(|(offset, p)| (offset, p.center(refs))), score)
    }

    // ── replay ────────────────────────────────────────────────────────────

    /// Replays every record in append order.
    ///
    /// With `collapse`, asset records are expanded into the sink (recursively
    /// for nested models) instead of being forwarded to `draw_asset`.
    pub fn draw_to(&self, sink: &mut dyn DrawingSink3D, collapse: bool) {
        let refs = self.stream.refs();
        let mut scratch = Vec::new();
        for (_, primitive) in self.records() {
            primitive.replay(sink, refs, collapse, &mut scratch);
        }
    }

    /// Replays the record at `offset` and returns the bytes it occupies.
    pub fn draw_one(&self, sink: &mut dyn DrawingSink3D, offset: usize, collapse: bool) -> usize {
        self.replay_at(sink, offset, collapse, &mut Vec::new())
    }

    /// Replays records in the given order, e.g. one produced by [`order_by`](Self::order_by).
    pub fn draw_ordered(&self, sink: &mut dyn DrawingSink3D, offsets: &[usize], collapse: bool) {
        let mut scratch = Vec::new();
        for &offset in offsets {
            self.replay_at(sink, offset, collapse, &mut scratch);
        }
    }

    fn replay_at(
        &self,
        sink: &mut dyn DrawingSink3D,
        offset: usize,
        collapse: bool,
        scratch: &mut Vec<Vec3>,
    ) -> usize {
        let record = expect_intact(self.stream.buffer().record_at(offset));
        let primitive = expect_intact(Primitive3D::decode(record));
        primitive.replay(sink, self.stream.refs(), collapse, scratch);
        record.byte_len()
    }
}

impl Default for Model3D {
    fn default() -> Self {
        Self::new()
    }
}

/// Replaying into a model records the calls.
impl DrawingSink3D for Model3D {
    fn draw_segment(&mut self, a: Vec3, b: Vec3, diameter: f32, style: &LineStyle) {
        Model3D::draw_segment(self, a, b, diameter, style);
    }

    fn draw_sphere(&mut self, center: Vec3, diameter: f32, style: &ColorStyle) {
        Model3D::draw_sphere(self, center, diameter, style);
    }

    fn draw_surface(&mut self, vertices: &[Vec3], style: &SurfaceStyle) {
        Model3D::draw_surface(self, vertices, style);
    }

    fn draw_asset(&mut self, transform: &Mat4, asset: &AssetRef3D, style: &ColorStyle) {
        Model3D::draw_asset(self, transform, asset, style);
    }
}

impl BoundsProvider<Vec3> for Model3D {
    fn try_bounding_box(&self) -> Option<Aabb<Vec3>> {
        let b = self.bounding_box();
        (!b.is_empty()).then_some(b)
    }

    fn try_bounding_sphere(&self) -> Option<Sphere<Vec3>> {
        let s = self.bounding_sphere();
        (!s.is_empty()).then_some(s)
    }
}

/// Nested models expand by replaying their own records; the referencing
/// record's style does not override theirs.
impl Asset3D for Model3D {
    fn expand(&self, sink: &mut dyn DrawingSink3D, _style: &ColorStyle) {
        self.draw_to(sink, true);
    }
}

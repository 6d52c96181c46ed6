use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::coords::Point;

use super::buffer::RecordBuffer;
use super::refs::{RefHandle, RefIndex, RefTable};
use super::wire::ByteWriter;
use super::BoundsContext;

static NEXT_MODEL_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of one model instance.
///
/// Clones get a fresh id; two live models never share one.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ModelId(u64);

impl ModelId {
    fn next() -> Self {
        Self(NEXT_MODEL_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Cache token for downstream resource managers.
///
/// Equal keys mean "same model, no mutation in between". Every `draw_*` or
/// `clear` call produces a new `version`, so a key held across a mutation
/// simply stops matching. Keys never compare equal across models, even when
/// their contents are identical.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ModelKey {
    pub model: ModelId,
    pub version: u64,
}

/// Values computed lazily for one version of a stream.
///
/// Each field is filled at most once; concurrent readers may race to compute
/// it but only one result is stored.
#[derive(Debug)]
struct VersionCache<P> {
    bounds: OnceLock<BoundsContext<P>>,
    hash: OnceLock<u64>,
}

impl<P> Default for VersionCache<P> {
    fn default() -> Self {
        Self { bounds: OnceLock::new(), hash: OnceLock::new() }
    }
}

/// Records + reference table + version cache: the state shared by
/// [`Model3D`](super::Model3D) and [`Model2D`](super::Model2D).
///
/// Dimension-specific decoding stays in the models; this type only knows
/// framing, handles and when cached values go stale.
#[derive(Debug)]
pub(crate) struct CommandStream<H, P> {
    id: ModelId,
    version: u64,
    buffer: RecordBuffer,
    refs: RefTable<H>,
    cache: VersionCache<P>,
}

impl<H: RefHandle, P: Point> CommandStream<H, P> {
    pub(crate) fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    pub(crate) fn with_capacity(bytes: usize, refs: usize) -> Self {
        Self {
            id: ModelId::next(),
            version: 0,
            buffer: RecordBuffer::with_capacity(bytes),
            refs: RefTable::with_capacity(refs),
            cache: VersionCache::default(),
        }
    }

    #[inline]
    pub(crate) fn buffer(&self) -> &RecordBuffer {
        &self.buffer
    }

    #[inline]
    pub(crate) fn refs(&self) -> &RefTable<H> {
        &self.refs
    }

    #[inline]
    pub(crate) fn key(&self) -> ModelKey {
        ModelKey { model: self.id, version: self.version }
    }

    #[inline]
    pub(crate) fn is_current(&self, key: ModelKey) -> bool {
        key == self.key()
    }

    pub(crate) fn append(&mut self, tag: i32, write: impl FnOnce(&mut ByteWriter<'_>)) -> usize {
        self.invalidate();
        self.buffer.append(tag, write)
    }

    pub(crate) fn add_ref(&mut self, handle: H) -> RefIndex {
        self.invalidate();
        self.refs.add(handle)
    }

    pub(crate) fn clear(&mut self) {
        log::debug!(
            "model {} cleared ({} bytes, {} refs)",
            self.id.get(),
            self.buffer.len(),
            self.refs.len()
        );
        self.invalidate();
        self.buffer.clear();
        self.refs.clear();
    }

    fn invalidate(&mut self) {
        self.version = self.version.wrapping_add(1);
        self.cache = VersionCache::default();
    }

    /// Cached bounds for the current version; `walk` runs at most once per version.
    pub(crate) fn bounds(&self, walk: impl FnOnce(&Self) -> BoundsContext<P>) -> BoundsContext<P> {
        *self.cache.bounds.get_or_init(|| {
            let ctx = walk(self);
            log::trace!(
                "model {} v{}: bounds recomputed over {} bytes",
                self.id.get(),
                self.version,
                self.buffer.len()
            );
            ctx
        })
    }

    /// Best-effort content hash: record bytes plus handle identities.
    ///
    /// Equal hashes do not prove equal content; use [`ModelKey`] for identity.
    pub(crate) fn content_hash(&self) -> u64 {
        *self.cache.hash.get_or_init(|| {
            let mut hasher = DefaultHasher::new();
            self.buffer.as_bytes().hash(&mut hasher);
            self.refs.len().hash(&mut hasher);
            for handle in self.refs.iter() {
                handle.identity().hash(&mut hasher);
            }
            hasher.finish()
        })
    }
}

impl<H: RefHandle + Clone, P: Point> Clone for CommandStream<H, P> {
    fn clone(&self) -> Self {
        Self {
            id: ModelId::next(),
            version: 0,
            buffer: self.buffer.clone(),
            refs: self.refs.clone(),
            cache: VersionCache::default(),
        }
    }
}

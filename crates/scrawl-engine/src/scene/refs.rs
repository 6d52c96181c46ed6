use core::fmt;
use std::sync::Arc;

/// Stable index into a [`RefTable`].
///
/// Index 0 is a valid entry, not a sentinel.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct RefIndex(pub u32);

impl RefIndex {
    #[inline]
    pub const fn new(v: u32) -> Self {
        Self(v)
    }

    #[inline]
    pub const fn get(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RefIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Out-of-band storage for payload that cannot be encoded inline (asset handles).
///
/// Append-only: indices stay valid until the owning model is cleared.
/// Duplicate handles are stored twice; there is no deduplication.
#[derive(Debug, Clone)]
pub struct RefTable<H> {
    entries: Vec<H>,
}

impl<H> RefTable<H> {
    #[inline]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity) }
    }

    /// Stores `handle` and returns its index.
    ///
    /// # Panics
    /// Panics if the table already holds `u32::MAX` entries.
    pub fn add(&mut self, handle: H) -> RefIndex {
        let index = u32::try_from(self.entries.len())
            .unwrap_or_else(|_| panic!("reference table is full"));
        self.entries.push(handle);
        RefIndex(index)
    }

    /// Resolves an index produced by [`add`](Self::add).
    ///
    /// # Panics
    /// Panics when `index` is out of range; indices only come from this table,
    /// so that means the command stream is corrupt.
    #[track_caller]
    pub fn get(&self, index: RefIndex) -> &H {
        match self.entries.get(index.get()) {
            Some(h) => h,
            None => panic!(
                "corrupt command stream: reference {index} out of range (len {})",
                self.entries.len()
            ),
        }
    }

    #[inline]
    pub fn try_get(&self, index: RefIndex) -> Option<&H> {
        self.entries.get(index.get())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &H> + '_ {
        self.entries.iter()
    }

    /// Drops every handle. Only valid together with clearing the records
    /// that reference them.
    #[inline]
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<H> Default for RefTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Identity of a stored handle, used by the best-effort content hash.
pub trait RefHandle {
    fn identity(&self) -> usize;
}

impl<T: ?Sized> RefHandle for Arc<T> {
    #[inline]
    fn identity(&self) -> usize {
        Arc::as_ptr(self).cast::<()>() as usize
    }
}

use core::cmp::Ordering;

/// Sort key used to resequence records for drawing.
///
/// Ordering rules:
/// 1) `score`: ascending, compared with `f32::total_cmp` (NaN sorts last)
/// 2) `offset`: ascending (append order for equal scores)
#[derive(Debug, Copy, Clone)]
pub struct DrawOrderKey {
    pub score: f32,
    /// Byte offset of the record in its buffer.
    pub offset: usize,
}

impl DrawOrderKey {
    #[inline]
    pub const fn new(score: f32, offset: usize) -> Self {
        Self { score, offset }
    }
}

impl Ord for DrawOrderKey {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        match self.score.total_cmp(&other.score) {
            Ordering::Equal => self.offset.cmp(&other.offset),
            o => o,
        }
    }
}

impl PartialOrd for DrawOrderKey {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for DrawOrderKey {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DrawOrderKey {}

/// Scores every record by its center and returns offsets in draw order.
///
/// Records without a center (empty vertex lists) score `-∞` and come first;
/// they draw nothing, so their position only has to be deterministic.
pub(crate) fn order_offsets<P>(
    centers: impl Iterator<Item = (usize, Option<P>)>,
    mut score: impl FnMut(P) -> f32,
) -> Vec<usize> {
    let mut keys: Vec<DrawOrderKey> = centers
        .map(|(offset, center)| {
            let s = center.map_or(f32::NEG_INFINITY, &mut score);
            DrawOrderKey::new(s, offset)
        })
        .collect();

    // Offsets are unique, so the key order is total and the sort is deterministic.
    keys.sort_unstable();
    keys.into_iter().map(|k| k.offset).collect()
}

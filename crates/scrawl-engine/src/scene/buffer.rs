use super::wire::{ByteReader, ByteWriter};
use super::StreamError;

/// Bytes before the payload: `u32` size + `i32` tag.
pub const RECORD_HEADER_LEN: usize = 8;

/// One framed record borrowed from a [`RecordBuffer`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RawRecord<'a> {
    /// Byte offset of the record's size field.
    pub offset: usize,
    pub tag: i32,
    pub payload: &'a [u8],
}

impl<'a> RawRecord<'a> {
    /// The stored size field: tag + payload.
    #[inline]
    pub fn size(&self) -> usize {
        4 + self.payload.len()
    }

    /// Total bytes the record occupies, header included.
    #[inline]
    pub fn byte_len(&self) -> usize {
        4 + self.size()
    }

    #[inline]
    pub fn next_offset(&self) -> usize {
        self.offset + self.byte_len()
    }

    #[inline]
    pub fn reader(&self) -> ByteReader<'a> {
        ByteReader::new(self.payload, self.offset, self.tag)
    }
}

/// Append-only buffer of length-prefixed records.
///
/// Wire layout per record:
///
/// ```text
/// u32  size      // 4 + payload length
/// i32  tag
/// u8[size - 4]   payload
/// ```
///
/// Records are concatenated with no global header or trailer. The buffer
/// knows nothing about what tags mean.
///
/// Performance characteristics:
/// - `append()` is amortized O(payload)
/// - `clear()` keeps the allocation for reuse
#[derive(Debug, Clone, Default)]
pub struct RecordBuffer {
    bytes: Vec<u8>,
}

impl RecordBuffer {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(bytes: usize) -> Self {
        Self { bytes: Vec::with_capacity(bytes) }
    }

    /// Appends one record and returns its offset.
    ///
    /// The size field is patched after `write` has produced the payload. If
    /// `write` panics the partial record is removed while unwinding.
    ///
    /// # Panics
    /// Panics if the payload exceeds what a `u32` size field can describe.
    pub fn append(&mut self, tag: i32, write: impl FnOnce(&mut ByteWriter<'_>)) -> usize {
        let offset = self.bytes.len();
        let mut pending = PendingRecord { bytes: &mut self.bytes, offset, committed: false };
        pending.bytes.extend_from_slice(&[0; 4]);
        pending.bytes.extend_from_slice(&tag.to_le_bytes());

        write(&mut ByteWriter::new(&mut *pending.bytes));

        let size = pending.bytes.len() - offset - 4;
        let size = u32::try_from(size)
            .unwrap_or_else(|_| panic!("record of {size} bytes exceeds the u32 size field"));
        pending.bytes[offset..offset + 4].copy_from_slice(&size.to_le_bytes());
        pending.committed = true;
        offset
    }

    /// Drops every record. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decodes the framing of the record starting at `offset`.
    pub fn record_at(&self, offset: usize) -> Result<RawRecord<'_>, StreamError> {
        let truncated = StreamError::Truncated { offset };
        let header = offset
            .checked_add(RECORD_HEADER_LEN)
            .and_then(|end| self.bytes.get(offset..end))
            .ok_or(truncated.clone())?;

        let size = u32::from_le_bytes([header[0], header[1], header[2], header[3]]) as usize;
        let tag = i32::from_le_bytes([header[4], header[5], header[6], header[7]]);
        if size < 4 {
            return Err(truncated);
        }

        let payload = offset
            .checked_add(4 + size)
            .and_then(|end| self.bytes.get(offset + RECORD_HEADER_LEN..end))
            .ok_or(truncated)?;

        Ok(RawRecord { offset, tag, payload })
    }

    /// Lazily walks every record in append order.
    ///
    /// Restartable: each call starts from the beginning. Yields at most one
    /// error, after which iteration ends.
    #[inline]
    pub fn records(&self) -> Records<'_> {
        Records { buffer: self, pos: 0 }
    }
}

/// Iterator over the records of a [`RecordBuffer`].
#[derive(Debug, Clone)]
pub struct Records<'a> {
    buffer: &'a RecordBuffer,
    pos: usize,
}

/// Truncates back to `offset` on drop unless the record was committed.
struct PendingRecord<'a> {
    bytes: &'a mut Vec<u8>,
    offset: usize,
    committed: bool,
}

impl Drop for PendingRecord<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.bytes.truncate(self.offset);
        }
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<RawRecord<'a>, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.buffer.len() {
            return None;
        }
        match self.buffer.record_at(self.pos) {
            Ok(record) => {
                self.pos = record.next_offset();
                Some(Ok(record))
            }
            Err(e) => {
                self.pos = self.buffer.len();
                Some(Err(e))
            }
        }
    }
}

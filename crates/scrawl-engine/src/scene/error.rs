use std::fmt;

/// Inconsistency found while walking a command stream.
///
/// Streams are only ever written by this crate's own encoders, so any of these
/// means a bug. Façade walks panic with the formatted error; [`validate`]
/// surfaces it as a value for diagnostics.
///
/// [`validate`]: crate::scene::Model3D::validate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// The record header or a payload field runs past the end of the buffer.
    Truncated { offset: usize },
    /// The tag does not name a known primitive kind.
    UnknownTag { offset: usize, tag: i32 },
    /// The payload length disagrees with what the tag's layout requires.
    LengthMismatch { offset: usize, tag: i32, expected: usize, actual: usize },
    /// An asset record points past the end of the reference table.
    BadReference { offset: usize, index: u32, len: usize },
}

impl StreamError {
    /// Byte offset of the record the error was found in.
    pub fn offset(&self) -> usize {
        match *self {
            StreamError::Truncated { offset }
            | StreamError::UnknownTag { offset, .. }
            | StreamError::LengthMismatch { offset, .. }
            | StreamError::BadReference { offset, .. } => offset,
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            StreamError::Truncated { offset } => {
                write!(f, "record at byte {offset} is truncated")
            }
            StreamError::UnknownTag { offset, tag } => {
                write!(f, "record at byte {offset} has unknown tag {tag}")
            }
            StreamError::LengthMismatch { offset, tag, expected, actual } => write!(
                f,
                "record at byte {offset} (tag {tag}) has a {actual}-byte payload, \
                 expected {expected}"
            ),
            StreamError::BadReference { offset, index, len } => write!(
                f,
                "record at byte {offset} references asset {index} but only {len} are registered"
            ),
        }
    }
}

impl std::error::Error for StreamError {}

/// Unwraps a decode result, treating failure as a corrupted stream.
#[track_caller]
pub(crate) fn expect_intact<T>(result: Result<T, StreamError>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("corrupt command stream: {e}"),
    }
}

//! Error handling for idxview.
//!
//! Every failure the library can hit while loading, parsing or rendering an
//! IDX buffer is a variant of [`IdxError`].

use std::error::Error as StdError;
use thiserror::Error;

/// A specialized `Result` type for idxview operations.
pub type Result<T> = std::result::Result<T, IdxError>;

/// Error types for IDX operations.
///
/// # Examples
///
/// ```rust
/// use idxview::{parse_header, IdxError};
///
/// // Declares two dimensions but stops after the item count
/// let short = [0x00, 0x00, 0x08, 0x02, 0x00, 0x00, 0x00, 0x01];
///
/// match parse_header(&short) {
///     Err(IdxError::TruncatedHeader { expected, actual }) => {
///         assert_eq!(expected, 16);
///         assert_eq!(actual, 8);
///     }
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
#[derive(Error, Debug)]
pub enum IdxError {
    /// I/O error while opening or reading the input.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// The input looked compressed but could not be decompressed.
    #[error("Decompression error: {0}")]
    Decompress(#[source] Box<dyn StdError + Send + Sync>),

    /// The element type code is not one of the six IDX codes.
    ///
    /// Only raised by the strict `TryFrom<u8>` conversion; header parsing keeps
    /// the raw code and carries on.
    #[error("Unknown element type code ({0:#04x})")]
    UnknownElementType(u8),

    /// The buffer ends before the header it declares.
    #[error("Truncated header, expected at least ({expected}) bytes, found ({actual})")]
    TruncatedHeader { expected: usize, actual: usize },

    /// A read past the end of the buffer was requested.
    #[error("Byte range [{start}, {end}) is out of range for a buffer of {len} bytes")]
    OutOfRange { start: usize, end: usize, len: usize },

    /// Rendering needs a row and a column dimension.
    #[error("Expected at least 2 dimensions to render a record, found ({found})")]
    MissingDimensions { found: usize },
}

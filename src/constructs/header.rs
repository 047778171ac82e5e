use bytemuck::{Pod, Zeroable};
use tracing::debug;

use crate::{lookup_element_type, ElementType, IdxError};

pub const PREAMBLE_SIZE: usize = std::mem::size_of::<Preamble>();
pub const DIM_SIZE: usize = 4;
/// Only the first two dimensions (rows and columns) are consumed.
pub const MAX_DIMS: usize = 2;

/// Fixed 8-byte prefix shared by every IDX file
#[derive(Copy, Clone, Pod, Zeroable, Debug, PartialEq, Eq, Hash)]
#[repr(C)]
pub struct Preamble {
    pub reserved: [u8; 2],   // not validated
    pub type_code: u8,       // element type
    pub dim_count: u8,       // declared number of dimensions
    pub item_count: [u8; 4], // big-endian
}
impl Preamble {
    pub fn from_bytes(bytes: &[u8]) -> crate::Result<Self> {
        if bytes.len() < PREAMBLE_SIZE {
            return Err(IdxError::TruncatedHeader {
                expected: PREAMBLE_SIZE,
                actual: bytes.len(),
            });
        }
        Ok(bytemuck::pod_read_unaligned(&bytes[..PREAMBLE_SIZE]))
    }
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
    pub fn item_count(&self) -> u32 {
        decode_big_endian_uint(&self.item_count) as u32
    }
}

/// Decoded IDX header.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IdxHeader {
    /// Raw type code (byte 2)
    pub type_code: u8,
    /// `None` when `type_code` is not a known IDX code
    pub element_type: Option<ElementType>,
    /// Dimension count as written in the file (byte 3)
    pub declared_dims: u8,
    /// Total number of records (bytes 4..8)
    pub item_count: u32,
    /// Effective dimension sizes, at most [`MAX_DIMS`] of them
    pub dims: Vec<u32>,
}
impl IdxHeader {
    pub fn dimension_count(&self) -> usize {
        self.dims.len()
    }

    pub fn was_clamped(&self) -> bool {
        self.declared_dims as usize > MAX_DIMS
    }

    /// Byte offset of the first record.
    pub fn data_start(&self) -> usize {
        header_size(self.dimension_count())
    }

    /// Number of elements in one record.
    pub fn record_size(&self) -> usize {
        crate::record_size(&self.dims)
    }

    /// `(rows, cols)` taken from the first two dimensions.
    pub fn shape(&self) -> Option<(usize, usize)> {
        match self.dims.as_slice() {
            [rows, cols, ..] => Some((*rows as usize, *cols as usize)),
            _ => None,
        }
    }
}

/// Size of a header carrying `dim_count` dimension fields.
pub fn header_size(dim_count: usize) -> usize {
    PREAMBLE_SIZE + DIM_SIZE * dim_count
}

/// Interprets `bytes` as a big-endian unsigned integer.
///
/// Empty input decodes to 0. Inputs longer than 8 bytes keep only their
/// trailing 8 bytes.
pub fn decode_big_endian_uint(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte))
}

/// Parses the IDX header at the start of `buffer`.
///
/// A declared dimension count above [`MAX_DIMS`] is clamped: only the first two
/// dimension fields are read and the data offset is computed from the clamped
/// count.
pub fn parse_header(buffer: &[u8]) -> crate::Result<IdxHeader> {
    let preamble = Preamble::from_bytes(buffer)?;

    let declared_dims = preamble.dim_count;
    let dim_count = (declared_dims as usize).min(MAX_DIMS);
    if dim_count < declared_dims as usize {
        debug!(declared = declared_dims, "clamping dimension count to {MAX_DIMS}");
    }

    let expected = header_size(dim_count);
    if buffer.len() < expected {
        return Err(IdxError::TruncatedHeader {
            expected,
            actual: buffer.len(),
        });
    }

    let dims = buffer[PREAMBLE_SIZE..expected]
        .chunks_exact(DIM_SIZE)
        .map(|field| decode_big_endian_uint(field) as u32)
        .collect();

    Ok(IdxHeader {
        type_code: preamble.type_code,
        element_type: lookup_element_type(preamble.type_code),
        declared_dims,
        item_count: preamble.item_count(),
        dims,
    })
}

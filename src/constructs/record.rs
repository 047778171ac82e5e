use crate::{ElementType, IdxHeader};

/// Number of elements in one record: the product of `dims`, 1 when empty.
///
/// Saturates at `usize::MAX` instead of overflowing.
pub fn record_size(dims: &[u32]) -> usize {
    dims.iter().fold(1usize, |acc, &dim| acc.saturating_mul(dim as usize))
}

/// How many records the data region holds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CountMode {
    /// Every stride that starts inside the buffer, trailing partial stride included
    #[default]
    Strides,
    /// Complete records only
    Full,
}
impl CountMode {
    pub fn count(&self, buffer_len: usize, data_start: usize, record_size: usize) -> usize {
        match self {
            Self::Strides => count_records(buffer_len, data_start, record_size),
            Self::Full => count_full_records(buffer_len, data_start, record_size),
        }
    }
}

/// Counts the `record_size` strides starting in `[data_start, buffer_len)`.
///
/// A final partial stride counts as one. A `record_size` of 0 counts nothing.
pub fn count_records(buffer_len: usize, data_start: usize, record_size: usize) -> usize {
    if record_size == 0 {
        return 0;
    }
    buffer_len.saturating_sub(data_start).div_ceil(record_size)
}

/// Counts the complete `record_size` strides in `[data_start, buffer_len)`.
pub fn count_full_records(buffer_len: usize, data_start: usize, record_size: usize) -> usize {
    if record_size == 0 {
        return 0;
    }
    buffer_len.saturating_sub(data_start) / record_size
}

/// One record viewed in place
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Record<'a> {
    pub index: usize,
    pub offset: usize,
    pub bytes: &'a [u8],
}
impl<'a> Record<'a> {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
    /// Number of non-zero elements.
    pub fn lit(&self) -> usize {
        self.bytes.iter().filter(|&&b| b > 0).count()
    }
    /// Decodes the record bytes as consecutive `ty` elements.
    ///
    /// Trailing bytes that do not fill a whole element are skipped.
    pub fn values(&self, ty: ElementType) -> impl Iterator<Item = f64> + 'a {
        self.bytes
            .chunks_exact(ty.width())
            .map(move |chunk| ty.decode(chunk))
    }
}

/// Iterator over the complete records of a buffer.
///
/// Cloning forks the cursor. Call [`records`] again to walk the same records
/// from the start.
#[derive(Clone, Debug)]
pub struct Records<'a> {
    buffer: &'a [u8],
    record_size: usize,
    pos: usize,
    index: usize,
}
impl<'a> Records<'a> {
    pub fn new(buffer: &'a [u8], data_start: usize, record_size: usize) -> Self {
        Self {
            buffer,
            record_size,
            pos: data_start,
            index: 0,
        }
    }
    /// Byte offset of the next record
    pub fn position(&self) -> usize {
        self.pos
    }
}
impl<'a> Iterator for Records<'a> {
    type Item = Record<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.record_size == 0 {
            return None;
        }
        let end = self.pos.checked_add(self.record_size)?;
        let bytes = self.buffer.get(self.pos..end)?;
        let record = Record {
            index: self.index,
            offset: self.pos,
            bytes,
        };
        self.pos = end;
        self.index += 1;
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = count_full_records(self.buffer.len(), self.pos, self.record_size);
        (n, Some(n))
    }
}
impl ExactSizeIterator for Records<'_> {}

/// Records of `buffer` laid out as described by `header`.
pub fn records<'a>(buffer: &'a [u8], header: &IdxHeader) -> Records<'a> {
    Records::new(buffer, header.data_start(), header.record_size())
}

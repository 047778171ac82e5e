//! ASCII rendering of a single record.
//!
//! Each element becomes one character: [`LIT`] when the byte is non-zero,
//! [`BLANK`] otherwise. Rows are emitted lazily and the renderer holds no
//! cursor, so iterating the same [`AsciiArt`] twice yields the same lines.

use std::fmt;

use crate::IdxError;

pub const LIT: char = '#';
pub const BLANK: char = ' ';

/// A `rows x cols` window of bytes ready to be drawn.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AsciiArt<'a> {
    pixels: &'a [u8],
    rows: usize,
    cols: usize,
}
impl<'a> AsciiArt<'a> {
    /// Borrows the `rows * cols` bytes at `offset` from `buffer`.
    ///
    /// # Errors
    ///
    /// Returns [`IdxError::OutOfRange`] if the window extends past the buffer.
    pub fn new(buffer: &'a [u8], offset: usize, rows: usize, cols: usize) -> crate::Result<Self> {
        let out_of_range = |end| IdxError::OutOfRange {
            start: offset,
            end,
            len: buffer.len(),
        };
        let span = rows.checked_mul(cols).ok_or(out_of_range(usize::MAX))?;
        let end = offset.checked_add(span).ok_or(out_of_range(usize::MAX))?;
        let pixels = buffer.get(offset..end).ok_or(out_of_range(end))?;
        Ok(Self { pixels, rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of bytes covered by the window.
    pub fn span(&self) -> usize {
        self.pixels.len()
    }

    /// Iterator over the rendered rows, without line terminators.
    pub fn lines(&self) -> Lines<'a> {
        Lines {
            pixels: self.pixels,
            cols: self.cols,
            row: 0,
            rows: self.rows,
        }
    }
}
impl<'a> IntoIterator for &AsciiArt<'a> {
    type Item = String;
    type IntoIter = Lines<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines()
    }
}
impl fmt::Display for AsciiArt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Rows of an [`AsciiArt`].
#[derive(Clone, Debug)]
pub struct Lines<'a> {
    pixels: &'a [u8],
    cols: usize,
    row: usize,
    rows: usize,
}
impl Iterator for Lines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.row >= self.rows {
            return None;
        }
        let start = self.row * self.cols;
        let line = self.pixels[start..start + self.cols]
            .iter()
            .map(|&px| glyph(px))
            .collect();
        self.row += 1;
        Some(line)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.rows - self.row;
        (n, Some(n))
    }
}
impl ExactSizeIterator for Lines<'_> {}

fn glyph(px: u8) -> char {
    if px > 0 {
        LIT
    } else {
        BLANK
    }
}

/// Renders the `rows x cols` record starting at `data_start`.
pub fn render_first_record_as_ascii(
    buffer: &[u8],
    data_start: usize,
    rows: usize,
    cols: usize,
) -> crate::Result<AsciiArt<'_>> {
    AsciiArt::new(buffer, data_start, rows, cols)
}
